//! The selection state of an upload zone.
//!
//! The drag flag and the selected file are held in a single tagged value so that a drop always clears
//! the drag flag in the same step that records the dropped file.

use crate::SelectedFile;

/// The four states of an upload zone: {idle, dragging} × {no file, file}.
#[derive(Clone, Debug, PartialEq)]
pub enum ZoneState {
    /// Nothing is being dragged over the page.
    Idle {
        /// The file that will be submitted, if one was chosen.
        file: Option<SelectedFile>,
    },

    /// A drag is in progress somewhere over the page.
    Dragging {
        /// The file that will be submitted, if one was chosen.
        file: Option<SelectedFile>,
    },
}

impl Default for ZoneState {
    fn default() -> Self {
        Self::Idle { file: None }
    }
}

/// An input that moves the zone between states.
#[derive(Clone, Debug, PartialEq)]
pub enum ZoneEvent {
    /// A drag passed over the page.
    DragOver,

    /// Something was dropped. Carries the first dropped file, if there was one.
    Dropped(Option<SelectedFile>),

    /// The native file picker changed. Carries the first picked file, if there was one.
    Picked(Option<SelectedFile>),
}

/// What the zone should show for its current selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ZoneDisplay {
    /// No file yet: show the descriptive label.
    Label(String),

    /// The names of the selected files.
    Files(Vec<String>),
}

impl ZoneState {
    /// Is a drag currently over the page?
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// The file that a submission would send.
    pub fn file(&self) -> Option<&SelectedFile> {
        match self {
            Self::Idle { file } | Self::Dragging { file } => file.as_ref(),
        }
    }

    /// Move to the next state.
    ///
    /// A drop or pick without a file keeps the current selection. Nothing ever clears the drag flag
    /// except a drop.
    pub fn apply(&mut self, event: ZoneEvent) {
        let current = std::mem::take(self);

        *self = match (current, event) {
            (Self::Idle { file } | Self::Dragging { file }, ZoneEvent::DragOver) => {
                Self::Dragging { file }
            }
            (Self::Idle { file } | Self::Dragging { file }, ZoneEvent::Dropped(dropped)) => {
                Self::Idle {
                    file: dropped.or(file),
                }
            }
            (Self::Idle { file }, ZoneEvent::Picked(picked)) => Self::Idle {
                file: picked.or(file),
            },
            (Self::Dragging { file }, ZoneEvent::Picked(picked)) => Self::Dragging {
                file: picked.or(file),
            },
        };
    }

    /// The selection feedback for this state. `label` is shown until a file is chosen.
    pub fn display(&self, label: &str) -> ZoneDisplay {
        match self.file() {
            Some(file) => ZoneDisplay::Files(vec![file.name().to_string()]),
            None => ZoneDisplay::Label(label.to_string()),
        }
    }
}

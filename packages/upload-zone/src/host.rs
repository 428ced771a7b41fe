use crate::{ConversionResult, SelectedFile, ZoneEvent};
use dioxus::prelude::*;
use std::rc::Rc;

/// Receives drag and drop events captured at the window level.
pub type WindowSink = Rc<dyn Fn(ZoneEvent)>;

/// The platform services an upload zone needs beyond rendering.
///
/// The web implementation talks to the DOM directly. Provide your own through context to embed the
/// zone somewhere else, or to observe it in tests.
pub trait Host {
    /// Show a blocking message to the user.
    fn alert(&self, message: &str);

    /// Start downloading a converted file.
    fn download(&self, result: &ConversionResult);

    /// Open the native file picker behind the input with id `input_id`.
    fn open_picker(&self, input_id: &str);

    /// The first file currently held by the input with id `input_id`.
    fn picker_selection(&self, input_id: &str) -> Option<SelectedFile>;

    /// Forward every drag-over and drop anywhere in the window to `sink` until the guard is dropped.
    fn listen_window(&self, sink: WindowSink) -> ListenerGuard;
}

/// Keeps window listeners registered. Dropping it removes them.
#[must_use = "dropping the guard removes the listeners immediately"]
pub struct ListenerGuard {
    release: Option<Box<dyn FnOnce()>>,
}

impl ListenerGuard {
    /// Run `release` exactly once, when the guard is dropped.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A guard for listeners that were never registered.
    pub fn empty() -> Self {
        Self { release: None }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

/// A host without a DOM. Every side effect is only logged.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpHost;

impl Host for NoOpHost {
    fn alert(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn download(&self, result: &ConversionResult) {
        tracing::info!(url = %result.download_url, name = %result.file_name, "Download is not supported on this platform");
    }

    fn open_picker(&self, input_id: &str) {
        tracing::debug!(input_id, "File picker is not supported on this platform");
    }

    fn picker_selection(&self, _input_id: &str) -> Option<SelectedFile> {
        None
    }

    fn listen_window(&self, _sink: WindowSink) -> ListenerGuard {
        ListenerGuard::empty()
    }
}

/// The host for the current platform: the DOM on wasm, [`NoOpHost`] everywhere else.
#[cfg(target_arch = "wasm32")]
pub fn default_host() -> Rc<dyn Host> {
    Rc::new(crate::web::WebHost)
}

/// The host for the current platform: the DOM on wasm, [`NoOpHost`] everywhere else.
#[cfg(not(target_arch = "wasm32"))]
pub fn default_host() -> Rc<dyn Host> {
    Rc::new(NoOpHost)
}

/// Get the host provided through context, or the platform default.
pub fn host() -> Rc<dyn Host> {
    try_consume_context::<Rc<dyn Host>>().unwrap_or_else(default_host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn guard_releases_once_on_drop() {
        let released = Rc::new(Cell::new(0));
        let guard = ListenerGuard::new({
            let released = released.clone();
            move || released.set(released.get() + 1)
        });

        assert_eq!(released.get(), 0);
        drop(guard);
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn noop_host_never_listens() {
        let guard = NoOpHost.listen_window(Rc::new(|_| {}));
        assert!(guard.release.is_none());
        assert!(NoOpHost.picker_selection("input").is_none());
    }
}

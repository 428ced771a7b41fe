use crate::{
    host, run_conversion, ConversionClient, ConvertConfig, SelectedFile, ZoneDisplay, ZoneEvent,
    ZoneState,
};
use dioxus::core::Task;
use dioxus::html::HasFileData;
use dioxus::prelude::*;
use futures_util::StreamExt;
use std::{
    cell::RefCell,
    rc::Rc,
    sync::atomic::{AtomicUsize, Ordering},
};

static NEXT_INPUT_ID: AtomicUsize = AtomicUsize::new(0);

/// A drop target and hidden file picker that sends the chosen file to a conversion service and
/// downloads the result.
///
/// Drags and drops are captured anywhere in the window while the zone is mounted. Only the first
/// file of a drop or pick is kept, and a new choice replaces the old one.
///
/// `kind` is the label shown inside the drop target until a file is chosen and `file_formats` is the
/// `accept` filter of the native picker. `multiple` only affects the picker dialog and `error_file` is
/// reserved for a validation message.
///
/// Every submission uses the `config` of the latest render, so a parent may swap endpoints at any time.
///
/// ```rust, no_run
/// use dioxus::prelude::*;
/// use upload_zone::UploadZone;
///
/// fn app() -> Element {
///     rsx! {
///         UploadZone {
///             title: "PDF to Word",
///             kind: "Drop a PDF here or click to browse",
///             file_formats: ".pdf",
///         }
///     }
/// }
/// ```
#[component]
pub fn UploadZone(
    title: String,
    kind: String,
    file_formats: String,
    #[props(default)] multiple: bool,
    error_file: Option<String>,
    #[props(default)] config: ConvertConfig,
) -> Element {
    _ = error_file;

    let host = use_hook(host);
    let input_id = use_hook(|| {
        format!(
            "upload-zone-input-{}",
            NEXT_INPUT_ID.fetch_add(1, Ordering::Relaxed)
        )
    });
    let http = use_hook(reqwest::Client::new);
    let field_name = config.field_name.clone();

    let mut state = use_signal(ZoneState::default);
    let mut in_flight = use_signal(|| None as Option<Task>);

    // Window events arrive outside of any handler, so they are funneled through a coroutine
    let events = use_coroutine(move |mut rx: UnboundedReceiver<ZoneEvent>| async move {
        while let Some(event) = rx.next().await {
            state.write().apply(event);
        }
    });

    let listeners = use_hook({
        let host = host.clone();
        move || {
            let tx = events.tx();
            let guard = host.listen_window(Rc::new(move |event| {
                _ = tx.unbounded_send(event);
            }));
            Rc::new(RefCell::new(Some(guard)))
        }
    });
    use_drop(move || drop(listeners.borrow_mut().take()));

    let onsubmit = {
        let host = host.clone();
        let input_id = input_id.clone();
        move |evt: FormEvent| {
            evt.prevent_default();

            let file = state
                .read()
                .file()
                .cloned()
                .or_else(|| host.picker_selection(&input_id));

            // A new submission supersedes the one still waiting on the service
            if let Some(task) = in_flight.take() {
                task.cancel();
            }

            let host = host.clone();
            let client = ConversionClient::with_client(http.clone(), config.clone());
            let task = spawn(async move {
                run_conversion(&client, file, host.as_ref()).await;
            });
            in_flight.set(Some(task));
        }
    };

    // Renderers that do not attach files to the event still leave them on the input
    let onchange = {
        let host = host.clone();
        let input_id = input_id.clone();
        move |evt: FormEvent| {
            let file = evt
                .files()
                .into_iter()
                .next()
                .map(SelectedFile::from)
                .or_else(|| host.picker_selection(&input_id));
            state.write().apply(ZoneEvent::Picked(file));
        }
    };

    let onclick = {
        let host = host.clone();
        let input_id = input_id.clone();
        move |_: MouseEvent| host.open_picker(&input_id)
    };

    let dragging = state.read().is_dragging();
    let display = state.read().display(&kind);

    rsx! {
        form {
            enctype: "multipart/form-data",
            onsubmit,
            div {
                class: "upload-zone",
                ondragover: move |evt: DragEvent| {
                    evt.prevent_default();
                    state.write().apply(ZoneEvent::DragOver);
                },
                ondrop: move |evt: DragEvent| {
                    evt.prevent_default();
                    let file = evt.files().into_iter().next().map(SelectedFile::from);
                    state.write().apply(ZoneEvent::Dropped(file));
                },
                onclick,
                h2 { "{title}" }
                div {
                    class: if dragging { "drop-zone dragging" } else { "drop-zone" },
                    input {
                        id: "{input_id}",
                        r#type: "file",
                        name: "{field_name}",
                        accept: "{file_formats}",
                        multiple,
                        class: "hidden",
                        onchange,
                    }
                    Selection { display }
                }
                if dragging {
                    div { class: "on-drag",
                        h1 { "Drop it" }
                    }
                }
            }
            button { r#type: "submit", "Convert" }
        }
    }
}

/// The selection feedback inside the drop target.
#[component]
pub fn Selection(display: ZoneDisplay) -> Element {
    match display {
        ZoneDisplay::Label(label) => rsx! {
            h3 { "{label}" }
        },
        ZoneDisplay::Files(names) => rsx! {
            ul {
                for name in names {
                    li { "{name}" }
                }
            }
        },
    }
}

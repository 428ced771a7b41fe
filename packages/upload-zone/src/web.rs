//! The browser host, built directly on `web-sys`.

use crate::{ConversionResult, ConvertError, FilePayload, Host, ListenerGuard, SelectedFile};
use crate::{WindowSink, ZoneEvent};
use async_trait::async_trait;
use bytes::Bytes;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{DragEvent, HtmlAnchorElement, HtmlElement, HtmlInputElement};

/// A [`Host`] backed by the page's `window` and `document`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebHost;

impl Host for WebHost {
    fn alert(&self, message: &str) {
        gloo_dialogs::alert(message);
    }

    fn download(&self, result: &ConversionResult) {
        if let Err(err) = click_download_link(result) {
            tracing::error!(?err, url = %result.download_url, "Failed to start download");
        }
    }

    fn open_picker(&self, input_id: &str) {
        match element_by_id::<HtmlElement>(input_id) {
            Some(input) => input.click(),
            None => tracing::warn!(input_id, "File input is not mounted"),
        }
    }

    fn picker_selection(&self, input_id: &str) -> Option<SelectedFile> {
        let input = element_by_id::<HtmlInputElement>(input_id)?;
        let file = input.files()?.get(0)?;
        Some(SelectedFile::new(file))
    }

    fn listen_window(&self, sink: WindowSink) -> ListenerGuard {
        let Some(window) = web_sys::window() else {
            tracing::warn!("No window to attach drag and drop listeners to");
            return ListenerGuard::empty();
        };

        let on_dragover = Closure::<dyn FnMut(DragEvent)>::new({
            let sink = sink.clone();
            move |evt: DragEvent| {
                // Without this the browser navigates to the dropped file
                evt.prevent_default();
                sink(ZoneEvent::DragOver);
            }
        });

        let on_drop = Closure::<dyn FnMut(DragEvent)>::new(move |evt: DragEvent| {
            evt.prevent_default();
            let file = evt
                .data_transfer()
                .and_then(|transfer| transfer.files())
                .and_then(|files| files.get(0))
                .map(SelectedFile::new);
            sink(ZoneEvent::Dropped(file));
        });

        for (name, listener) in [("dragover", &on_dragover), ("drop", &on_drop)] {
            if let Err(err) =
                window.add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
            {
                tracing::error!(?err, "Failed to listen for window {name} events");
            }
        }

        ListenerGuard::new(move || {
            for (name, listener) in [("dragover", &on_dragover), ("drop", &on_drop)] {
                _ = window
                    .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref());
            }
        })
    }
}

fn element_by_id<T: JsCast>(id: &str) -> Option<T> {
    web_sys::window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into::<T>()
        .ok()
}

/// Add a temporary `<a download>` to the body, click it, and take it out again.
fn click_download_link(result: &ConversionResult) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;

    let link: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    link.set_href(&result.download_url);
    link.set_download(&result.file_name);

    body.append_child(&link)?;
    link.click();
    body.remove_child(&link)?;

    Ok(())
}

#[async_trait(?Send)]
impl FilePayload for web_sys::File {
    fn name(&self) -> String {
        web_sys::File::name(self)
    }

    fn content_type(&self) -> Option<String> {
        let content_type = self.type_();
        (!content_type.is_empty()).then_some(content_type)
    }

    async fn read_bytes(&self) -> Result<Bytes, ConvertError> {
        let buffer = JsFuture::from(self.array_buffer())
            .await
            .map_err(|err| ConvertError::Read(format!("{err:?}")))?;

        Ok(Bytes::from(js_sys::Uint8Array::new(&buffer).to_vec()))
    }
}

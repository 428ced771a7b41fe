use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    sync::{Arc, Mutex},
};
use upload_zone::{
    ConversionResult, ConvertConfig, Host, ListenerGuard, SelectedFile, WindowSink, ZoneEvent,
};

/// A host that remembers every side effect instead of performing it.
#[derive(Default)]
pub struct RecordingHost {
    pub alerts: RefCell<Vec<String>>,
    pub downloads: RefCell<Vec<ConversionResult>>,
    pub picker_opened: Cell<usize>,
    pub picker_file: RefCell<Option<SelectedFile>>,
    pub registrations: Cell<usize>,
    pub active_listeners: Rc<Cell<usize>>,
    sink: RefCell<Option<WindowSink>>,
}

impl RecordingHost {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Pretend the browser fired a window-level drag or drop.
    pub fn fire(&self, event: ZoneEvent) {
        let sink = self.sink.borrow().clone();
        let sink = sink.expect("no window listener registered");
        sink(event);
    }
}

impl Host for RecordingHost {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn download(&self, result: &ConversionResult) {
        self.downloads.borrow_mut().push(result.clone());
    }

    fn open_picker(&self, _input_id: &str) {
        self.picker_opened.set(self.picker_opened.get() + 1);
    }

    fn picker_selection(&self, _input_id: &str) -> Option<SelectedFile> {
        self.picker_file.borrow().clone()
    }

    fn listen_window(&self, sink: WindowSink) -> ListenerGuard {
        self.registrations.set(self.registrations.get() + 1);
        self.active_listeners.set(self.active_listeners.get() + 1);
        *self.sink.borrow_mut() = Some(sink);

        let active = self.active_listeners.clone();
        ListenerGuard::new(move || active.set(active.get() - 1))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReceivedPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// A local stand-in for the conversion service.
#[derive(Clone)]
pub struct Service {
    pub endpoint: String,
    pub status: StatusCode,
    pub body: &'static str,
    pub received: Arc<Mutex<Vec<ReceivedPart>>>,
    pub hits: Arc<Mutex<usize>>,
}

impl Service {
    pub fn config(&self) -> ConvertConfig {
        ConvertConfig::default().with_endpoint(self.endpoint.clone())
    }

    pub fn hits(&self) -> usize {
        *self.hits.lock().unwrap()
    }
}

async fn convert(State(service): State<Service>, mut multipart: Multipart) -> impl IntoResponse {
    *service.hits.lock().unwrap() += 1;

    while let Ok(Some(field)) = multipart.next_field().await {
        let part = ReceivedPart {
            name: field.name().unwrap_or_default().to_string(),
            file_name: field.file_name().map(str::to_string),
            content_type: field.content_type().map(str::to_string),
            bytes: field.bytes().await.unwrap().to_vec(),
        };
        service.received.lock().unwrap().push(part);
    }

    (
        service.status,
        [(header::CONTENT_TYPE, "application/json")],
        service.body,
    )
}

/// Start a service that answers every conversion with `status` and `body`.
pub async fn serve(status: StatusCode, body: &'static str) -> Service {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let service = Service {
        endpoint: format!("http://{addr}/convert/pdf-to-word"),
        status,
        body,
        received: Default::default(),
        hits: Default::default(),
    };

    let router = Router::new()
        .route("/convert/pdf-to-word", post(convert))
        .with_state(service.clone());
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

    service
}

//! A single page that converts PDFs to Word documents.
//!
//! Run with `dx serve --platform web`. Set `UPLOAD_ZONE_ENDPOINT` at build time to point the page at a
//! different conversion service.

use dioxus::logger::tracing::{info, Level};
use dioxus::prelude::*;
use upload_zone::{ConvertConfig, UploadZone};

const STYLE: Asset = asset!("/assets/converter.css");

fn main() {
    dioxus::logger::init(Level::INFO).expect("Failed to initialize logger");
    dioxus::launch(app);
}

fn app() -> Element {
    let config = use_hook(|| {
        let config = ConvertConfig::from_env();
        info!(endpoint = %config.endpoint, "Converter ready");
        config
    });

    rsx! {
        Stylesheet { href: STYLE }
        main { class: "converter",
            UploadZone {
                title: "PDF to Word",
                kind: "Drop a PDF here or click to browse",
                file_formats: ".pdf,application/pdf",
                config,
            }
        }
    }
}

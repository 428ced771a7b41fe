#![doc = include_str!("../README.md")]
#![allow(non_snake_case)]

mod component;
mod config;
mod convert;
mod file;
mod host;
mod state;

#[cfg(target_arch = "wasm32")]
mod web;

pub use component::*;
pub use config::*;
pub use convert::*;
pub use file::*;
pub use host::*;
pub use state::*;

#[cfg(target_arch = "wasm32")]
pub use web::WebHost;

pub mod prelude {
    pub use crate::{ConvertConfig, Host, SelectedFile, UploadZone};
}

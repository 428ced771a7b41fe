use crate::ConvertError;
use async_trait::async_trait;
use bytes::Bytes;
use std::{fmt, rc::Rc};

/// A file the user chose, as seen by the upload zone.
///
/// Implemented for Dioxus [`FileData`](dioxus::html::FileData), for browser `File`s on wasm, and for
/// [`MemoryFile`].
#[async_trait(?Send)]
pub trait FilePayload {
    /// The file name, without any directory components.
    fn name(&self) -> String;

    /// The MIME type reported by the platform, if it reported one.
    fn content_type(&self) -> Option<String>;

    /// Read the whole file into memory.
    async fn read_bytes(&self) -> Result<Bytes, ConvertError>;
}

/// A handle to the single file an upload zone will submit.
///
/// Cloning is cheap and two handles are equal only if they point at the same chosen file.
#[derive(Clone)]
pub struct SelectedFile {
    name: String,
    payload: Rc<dyn FilePayload>,
}

impl SelectedFile {
    pub fn new(payload: impl FilePayload + 'static) -> Self {
        Self {
            name: payload.name(),
            payload: Rc::new(payload),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> Option<String> {
        self.payload.content_type()
    }

    pub async fn read_bytes(&self) -> Result<Bytes, ConvertError> {
        self.payload.read_bytes().await
    }
}

impl PartialEq for SelectedFile {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.payload, &other.payload)
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type())
            .finish()
    }
}

impl From<dioxus::html::FileData> for SelectedFile {
    fn from(file: dioxus::html::FileData) -> Self {
        Self::new(file)
    }
}

#[async_trait(?Send)]
impl FilePayload for dioxus::html::FileData {
    fn name(&self) -> String {
        dioxus::html::FileData::name(self)
    }

    fn content_type(&self) -> Option<String> {
        dioxus::html::FileData::content_type(self)
    }

    async fn read_bytes(&self) -> Result<Bytes, ConvertError> {
        dioxus::html::FileData::read_bytes(self)
            .await
            .map_err(|err| ConvertError::Read(err.to_string()))
    }
}

/// A file whose contents are already in memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryFile {
    name: String,
    content_type: Option<String>,
    bytes: Bytes,
}

impl MemoryFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    /// Set the MIME type sent with the file.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

#[async_trait(?Send)]
impl FilePayload for MemoryFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn content_type(&self) -> Option<String> {
        self.content_type.clone()
    }

    async fn read_bytes(&self) -> Result<Bytes, ConvertError> {
        Ok(self.bytes.clone())
    }
}

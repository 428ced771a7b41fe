/// The conversion service the upload zone talks to unless configured otherwise.
pub const DEFAULT_ENDPOINT: &str = "https://file-nest-api.onrender.com/convert/pdf-to-word";

/// The download name used when the service does not suggest one.
pub const DEFAULT_FILE_NAME: &str = "converted-file.docx";

/// The multipart field that carries the file.
pub const FILE_FIELD: &str = "file";

/// The alert shown for every failed conversion.
pub const FAILURE_MESSAGE: &str = "Something went wrong during conversion.";

/// Overrides baked in at build time. wasm has no process environment, so these are read with
/// `option_env!` rather than at runtime.
const ENDPOINT_OVERRIDE: Option<&str> = option_env!("UPLOAD_ZONE_ENDPOINT");
const FILE_NAME_OVERRIDE: Option<&str> = option_env!("UPLOAD_ZONE_DEFAULT_FILE_NAME");

/// Where and how an upload zone submits files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertConfig {
    /// The URL the multipart form is POSTed to.
    pub endpoint: String,

    /// The name of the multipart field carrying the file.
    pub field_name: String,

    /// The download name used when the service does not return `fileName`.
    pub default_file_name: String,

    /// The message shown to the user when a conversion fails for any reason.
    pub failure_message: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            field_name: FILE_FIELD.to_string(),
            default_file_name: DEFAULT_FILE_NAME.to_string(),
            failure_message: FAILURE_MESSAGE.to_string(),
        }
    }
}

impl ConvertConfig {
    /// The default configuration with any `UPLOAD_ZONE_ENDPOINT` / `UPLOAD_ZONE_DEFAULT_FILE_NAME`
    /// values that were set when the crate was compiled.
    pub fn from_env() -> Self {
        Self::default().with_overrides(ENDPOINT_OVERRIDE, FILE_NAME_OVERRIDE)
    }

    /// Submit to a different endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Use a different fallback download name.
    pub fn with_default_file_name(mut self, name: impl Into<String>) -> Self {
        self.default_file_name = name.into();
        self
    }

    fn with_overrides(mut self, endpoint: Option<&str>, file_name: Option<&str>) -> Self {
        if let Some(endpoint) = non_blank(endpoint) {
            self.endpoint = endpoint.to_string();
        }

        if let Some(file_name) = non_blank(file_name) {
            self.default_file_name = file_name.to_string();
        }

        self
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

//! Sending a file to the conversion service and acting on its answer.

use crate::{ConvertConfig, Host, SelectedFile};
use reqwest::{
    multipart::{Form, Part},
    StatusCode,
};
use serde::Deserialize;

/// Everything that can go wrong between pressing "Convert" and starting the download.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("conversion service answered with status {0}")]
    Status(StatusCode),

    #[error("failed to reach the conversion service: {0}")]
    Network(#[source] reqwest::Error),

    #[error("conversion service sent an unreadable response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("invalid content type for the selected file: {0}")]
    InvalidMime(#[source] reqwest::Error),

    #[error("failed to read the selected file: {0}")]
    Read(String),
}

/// A finished conversion: where to fetch the result and what to call it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionResult {
    pub download_url: String,
    pub file_name: String,
}

/// The JSON body the conversion service answers with.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ConversionResponse {
    #[serde(rename = "downloadURL", default)]
    pub download_url: Option<String>,

    #[serde(rename = "fileName", default)]
    pub file_name: Option<String>,
}

impl ConversionResponse {
    /// Turn the response into something to download. Blank values count as missing.
    pub fn into_result(self, default_file_name: &str) -> Option<ConversionResult> {
        let download_url = self.download_url.filter(|url| !url.is_empty())?;
        let file_name = self
            .file_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| default_file_name.to_string());

        Some(ConversionResult {
            download_url,
            file_name,
        })
    }
}

/// Posts files to a conversion service.
#[derive(Clone, Debug)]
pub struct ConversionClient {
    http: reqwest::Client,
    config: ConvertConfig,
}

impl ConversionClient {
    pub fn new(config: ConvertConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(http: reqwest::Client, config: ConvertConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Upload `file` and decode the service's answer.
    ///
    /// Without a file the form is still sent, just without the file field. `Ok(None)` means the
    /// service succeeded but returned nothing to download.
    pub async fn convert(
        &self,
        file: Option<&SelectedFile>,
    ) -> Result<Option<ConversionResult>, ConvertError> {
        let form = self.form(file).await?;

        let response = self
            .http
            .post(&self.config.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(ConvertError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConvertError::Status(status));
        }

        let body: ConversionResponse = response.json().await.map_err(ConvertError::Decode)?;

        Ok(body.into_result(&self.config.default_file_name))
    }

    async fn form(&self, file: Option<&SelectedFile>) -> Result<Form, ConvertError> {
        let form = Form::new();

        let Some(file) = file else {
            tracing::warn!(
                endpoint = %self.config.endpoint,
                "Submitting conversion without a selected file"
            );
            return Ok(form);
        };

        let bytes = file.read_bytes().await?;
        let mut part = Part::stream(bytes).file_name(file.name().to_string());
        if let Some(content_type) = file.content_type() {
            part = part
                .mime_str(&content_type)
                .map_err(ConvertError::InvalidMime)?;
        }

        Ok(form.part(self.config.field_name.clone(), part))
    }
}

/// How a submission ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The service returned a file and its download was started.
    Downloaded(ConversionResult),

    /// The service succeeded but had nothing to download.
    NothingToDownload,

    /// Something failed and the user was alerted.
    Failed,
}

/// Run one submission end to end: upload, then either start exactly one download, do nothing, or
/// log the error and alert the user.
pub async fn run_conversion(
    client: &ConversionClient,
    file: Option<SelectedFile>,
    host: &dyn Host,
) -> SubmitOutcome {
    tracing::info!(
        file = file.as_ref().map(SelectedFile::name),
        endpoint = %client.config().endpoint,
        "Submitting file for conversion"
    );

    match client.convert(file.as_ref()).await {
        Ok(Some(result)) => {
            tracing::info!(url = %result.download_url, name = %result.file_name, "Conversion finished");
            host.download(&result);
            SubmitOutcome::Downloaded(result)
        }
        Ok(None) => {
            tracing::debug!("Conversion response had no download URL");
            SubmitOutcome::NothingToDownload
        }
        Err(err) => {
            tracing::error!("Upload or conversion failed: {err}");
            host.alert(&client.config().failure_message);
            SubmitOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> ConversionResponse {
        serde_json::from_str(json).expect("valid response json")
    }

    #[test]
    fn full_response_keeps_the_suggested_name() {
        let result = decode(r#"{"downloadURL": "https://x/y.docx", "fileName": "out.docx"}"#)
            .into_result("converted-file.docx");

        assert_eq!(
            result,
            Some(ConversionResult {
                download_url: "https://x/y.docx".into(),
                file_name: "out.docx".into(),
            })
        );
    }

    #[test]
    fn missing_name_falls_back_to_the_default() {
        let result = decode(r#"{"downloadURL": "https://x/y.docx"}"#)
            .into_result("converted-file.docx")
            .expect("has a download");

        assert_eq!(result.file_name, "converted-file.docx");
    }

    #[test]
    fn empty_name_falls_back_to_the_default() {
        let result = decode(r#"{"downloadURL": "https://x/y.docx", "fileName": ""}"#)
            .into_result("converted-file.docx")
            .expect("has a download");

        assert_eq!(result.file_name, "converted-file.docx");
    }

    #[test]
    fn no_url_means_nothing_to_download() {
        assert_eq!(decode("{}").into_result("converted-file.docx"), None);
        assert_eq!(
            decode(r#"{"downloadURL": "", "fileName": "out.docx"}"#).into_result("x"),
            None
        );
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let response = decode(r#"{"downloadURL": "https://x/y.docx", "expires": 3600}"#);
        assert_eq!(response.download_url.as_deref(), Some("https://x/y.docx"));
    }
}

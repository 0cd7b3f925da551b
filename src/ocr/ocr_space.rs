use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use crate::extract::{ExtractError, TextExtractor};

const BACKEND: &str = "OCR.Space";
pub const DEFAULT_ENDPOINT: &str = "https://api.ocr.space/parse/image";
/// OCR.Space's public demo key; rate limited.
pub const DEMO_API_KEY: &str = "helloworld";

#[derive(Debug, Clone)]
pub struct OcrSpaceConfig {
    pub endpoint: String,
    pub api_key: String,
    pub language: String,
    pub timeout_ms: u64,
}

impl Default for OcrSpaceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: DEMO_API_KEY.to_string(),
            language: "eng".to_string(),
            timeout_ms: 60_000,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OcrSpaceResponse {
    #[serde(default)]
    is_errored_on_processing: bool,
    #[serde(default)]
    error_message: Option<serde_json::Value>,
    #[serde(default)]
    parsed_results: Vec<ParsedResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ParsedResult {
    #[serde(default)]
    parsed_text: String,
}

/// OCR through the OCR.Space HTTP API. The whole upload is posted once; the
/// service returns one result per page.
pub struct OcrSpaceClient {
    client: Client,
    config: OcrSpaceConfig,
}

impl OcrSpaceClient {
    pub fn new(config: OcrSpaceConfig) -> Result<Self, ExtractError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self { client, config })
    }
}

impl TextExtractor for OcrSpaceClient {
    fn name(&self) -> &'static str {
        BACKEND
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let extension = image::guess_format(bytes)
            .ok()
            .and_then(|format| format.extensions_str().first().copied())
            .unwrap_or("pdf");
        let part = Part::bytes(bytes.to_vec()).file_name(format!("upload.{extension}"));
        let form = Form::new()
            .text("language", self.config.language.clone())
            .text("isOverlayRequired", "false")
            .text("filetype", extension.to_uppercase())
            .text("apikey", self.config.api_key.clone())
            .part("file", part);

        debug!(endpoint = %self.config.endpoint, bytes = bytes.len(), "posting OCR request");
        let body = self
            .client
            .post(&self.config.endpoint)
            .multipart(form)
            .send()?
            .error_for_status()?
            .text()?;
        parse_response(&body)
    }
}

fn parse_response(body: &str) -> Result<String, ExtractError> {
    let response: OcrSpaceResponse = serde_json::from_str(body)?;
    if response.is_errored_on_processing {
        let message = match response.error_message {
            Some(serde_json::Value::String(message)) => message,
            Some(serde_json::Value::Array(messages)) => messages
                .iter()
                .filter_map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join("; "),
            _ => "processing error".to_string(),
        };
        return Err(ExtractError::backend(BACKEND, message));
    }
    Ok(response
        .parsed_results
        .into_iter()
        .map(|result| result.parsed_text)
        .collect::<Vec<_>>()
        .join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn joins_parsed_pages() {
        let body = r#"{
            "ParsedResults": [
                {"ParsedText": "Finished Size: 200 x 100mm", "FileParseExitCode": 1},
                {"ParsedText": "Colourspace: DeviceCMYK"}
            ],
            "OCRExitCode": 1,
            "IsErroredOnProcessing": false
        }"#;
        assert_eq!(
            parse_response(body).unwrap(),
            "Finished Size: 200 x 100mm\nColourspace: DeviceCMYK"
        );
    }

    #[test]
    fn processing_error_is_a_backend_error() {
        let body = r#"{"IsErroredOnProcessing": true, "ErrorMessage": ["File failed validation", "Invalid key"]}"#;
        let err = parse_response(body).unwrap_err();
        assert_eq!(err.to_string(), "OCR.Space failed: File failed validation; Invalid key");
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(matches!(
            parse_response("<html>rate limited</html>"),
            Err(ExtractError::Json(_))
        ));
    }
}

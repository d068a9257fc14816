use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{OcrEngine, OcrError};

pub const DEFAULT_VISION_ENDPOINT: &str = "https://vision.googleapis.com";

/// Google Cloud Vision `images:annotate` with `TEXT_DETECTION`.
pub struct GoogleVisionClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GoogleVisionClient {
    pub fn new(endpoint: &str, api_key: &str, timeout: Option<Duration>) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnnotateResponse {
    #[serde(default)]
    pub responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateImageResponse {
    #[serde(default)]
    pub text_annotations: Vec<EntityAnnotation>,
    pub error: Option<Status>,
}

#[derive(Debug, Deserialize)]
pub struct EntityAnnotation {
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

impl AnnotateResponse {
    /// The first annotation is the whole-image transcription; the rest are
    /// individual words.
    pub fn into_full_text(self) -> Result<String, OcrError> {
        let Some(image) = self.responses.into_iter().next() else {
            return Ok(String::new());
        };

        if let Some(status) = image.error.filter(|s| !s.message.is_empty()) {
            return Err(OcrError::ServiceError(format!(
                "{} (code {})",
                status.message, status.code
            )));
        }

        Ok(image
            .text_annotations
            .into_iter()
            .next()
            .map(|a| a.description)
            .unwrap_or_default())
    }
}

#[async_trait]
impl OcrEngine for GoogleVisionClient {
    #[tracing::instrument(skip(self, image), fields(bytes = image.len()))]
    async fn detect_text(&self, image: &[u8]) -> Result<String, OcrError> {
        let body = serde_json::json!({
            "requests": [
                {
                    "image": { "content": general_purpose::STANDARD.encode(image) },
                    "features": [ { "type": "TEXT_DETECTION" } ]
                }
            ]
        });

        let url = format!("{}/v1/images:annotate", self.endpoint);

        let response = self
            .client
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| OcrError::ApiRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(OcrError::ApiRequestFailed(format!("HTTP {status}: {text}")));
        }

        let annotated: AnnotateResponse = response
            .json()
            .await
            .map_err(|e| OcrError::InvalidResponse(e.to_string()))?;

        let text = annotated.into_full_text()?;
        tracing::debug!(chars = text.chars().count(), "Text detection complete");
        Ok(text)
    }
}

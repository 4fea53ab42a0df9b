/// Inference API client
///
/// One multipart POST per prediction, no retries. The real classification
/// work happens entirely on the remote endpoint.
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Base URL of the inference server
pub const DEFAULT_API_URL: &str = "https://resulted-urgent-mortality-mentor.trycloudflare.com";

fn default_class() -> String {
    "Unknown".to_string()
}

/// Classification returned by the server.
/// Both fields are optional on the wire and fall back to defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    #[serde(default = "default_class")]
    pub predicted_class: String,
    #[serde(default)]
    pub confidence: f64,
}

/// Everything that can go wrong with a single prediction request.
/// The Display strings double as the user-facing error messages.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Invalid image file!")]
    MissingFile,
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Server error: {0}")]
    Server(u16),
    #[error("Response was not valid JSON: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Inference API client
#[derive(Debug, Clone)]
pub struct PredictClient {
    base_url: String,
    client: reqwest::Client,
}

impl PredictClient {
    /// Create a new client pointing at the default endpoint
    pub fn new() -> Self {
        Self::with_url(DEFAULT_API_URL)
    }

    /// Create a new client with a custom base URL
    pub fn with_url(url: &str) -> Self {
        Self {
            base_url: url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Get the base URL
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Upload a normalized image and await its classification.
    ///
    /// The file must already exist on disk; the upload is skipped otherwise.
    /// Timeouts are whatever the HTTP client defaults to.
    pub async fn predict(&self, image: &Path) -> Result<Prediction, PredictError> {
        if !image.exists() {
            return Err(PredictError::MissingFile);
        }

        let bytes = tokio::fs::read(image)
            .await
            .map_err(|_| PredictError::MissingFile)?;
        let file_name = image
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload.jpg".to_string());

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("image/jpeg")?;
        let form = Form::new().part("file", part);

        let url = format!("{}/predict", self.base_url);
        let response = self.client.post(&url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PredictError::Server(status.as_u16()));
        }

        // Read the body as text first so a malformed payload surfaces as a
        // parse error rather than a generic transport error
        let body = response.text().await?;
        println!("🌐 Inference response: {}", body.trim());

        let prediction: Prediction = serde_json::from_str(&body)?;
        Ok(prediction)
    }
}

impl Default for PredictClient {
    fn default() -> Self {
        Self::new()
    }
}

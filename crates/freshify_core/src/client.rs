//! Submission of a selected image to the remote prediction endpoint.

use crate::config::Config;
use crate::error::SubmitError;
use crate::selection::SelectedImage;
use reqwest::blocking::{Client, multipart};
use serde::Deserialize;

/// Multipart field the endpoint reads the upload from.
pub const UPLOAD_FIELD: &str = "foto";

/// Successful response of the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Prediction {
    #[serde(rename = "prediction")]
    pub label: String,
    /// Returned by some server versions; kept but never displayed.
    #[serde(default)]
    pub image_path: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Anything that can turn an image into a prediction.
pub trait Predictor: Send + Sync {
    fn predict(&self, image: &SelectedImage) -> Result<Prediction, SubmitError>;
}

/// Blocking HTTP implementation; run it off the UI thread.
#[derive(Debug, Clone)]
pub struct HttpPredictor {
    client: Client,
    endpoint: String,
}

impl HttpPredictor {
    pub fn new(config: &Config) -> Result<Self, SubmitError> {
        let client = Client::builder().timeout(config.request_timeout()).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Predictor for HttpPredictor {
    fn predict(&self, image: &SelectedImage) -> Result<Prediction, SubmitError> {
        let part = multipart::Part::bytes(image.bytes.to_vec())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime)?;
        let form = multipart::Form::new().part(UPLOAD_FIELD, part);

        tracing::info!(
            endpoint = %self.endpoint,
            file = %image.file_name,
            bytes = image.len(),
            "Sending prediction request"
        );
        let response = self.client.post(&self.endpoint).multipart(form).send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?;
        tracing::debug!(status, body_len = body.len(), "Prediction response received");
        interpret_response(status, &body)
    }
}

/// Map a raw HTTP status and body onto a prediction or a classified error.
pub fn interpret_response(status: u16, body: &[u8]) -> Result<Prediction, SubmitError> {
    if !(200..300).contains(&status) {
        let err: ErrorBody =
            serde_json::from_slice(body).map_err(|source| SubmitError::Parse { status, source })?;
        return Err(SubmitError::Server {
            status,
            message: err.error,
        });
    }
    serde_json::from_slice(body).map_err(|source| SubmitError::Parse { status, source })
}

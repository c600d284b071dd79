//! Error types for loading images, talking to the prediction endpoint and
//! reading configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Shown when the user submits without choosing an image first.
pub const NO_IMAGE_ALERT: &str = "Please select an image to upload.";
/// Shown for transport failures and responses that are not the expected JSON.
pub const GENERIC_ALERT: &str = "An error occurred while processing your request.";

/// Failure while acquiring an image for preview.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{name} is not a readable image: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },
}

impl LoadError {
    /// Text for the alert dialog.
    pub fn alert_message(&self) -> String {
        match self {
            LoadError::Io { path, .. } => format!("Could not read {}.", path.display()),
            LoadError::Decode { name, .. } => format!("{name} could not be opened as an image."),
        }
    }
}

/// Failure of a single submit attempt. None of these are retried.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Submit pressed with nothing selected; no request is sent.
    #[error("no image selected")]
    NoImage,
    /// A request is already outstanding.
    #[error("a prediction request is already in flight")]
    Busy,
    /// Non-2xx response carrying a structured `{"error": ...}` body.
    #[error("server responded {status}: {message}")]
    Server { status: u16, message: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response body (status {status}): {source}")]
    Parse {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

impl SubmitError {
    /// Text for the alert dialog.
    pub fn alert_message(&self) -> String {
        match self {
            SubmitError::NoImage => NO_IMAGE_ALERT.to_string(),
            SubmitError::Busy => "A prediction is already running.".to_string(),
            SubmitError::Server { message, .. } => format!("Error: {message}"),
            SubmitError::Transport(_) | SubmitError::Parse { .. } => GENERIC_ALERT.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not access config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("endpoint {url:?} is not a usable http(s) URL: {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

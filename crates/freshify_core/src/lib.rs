//! Core of the Freshify client: image acquisition, submission to the
//! prediction endpoint, and interpretation of the returned label.

pub mod client;
pub mod config;
pub mod error;
pub mod selection;
pub mod session;
pub mod verdict;
pub mod worker;

pub use client::{HttpPredictor, Prediction, Predictor, UPLOAD_FIELD, interpret_response};
pub use config::{Config, ENDPOINT_ENV, Resolved};
pub use error::{ConfigError, LoadError, SubmitError};
pub use selection::{IMAGE_EXTENSIONS, ImageSource, LoadedImage, Preview, SelectedImage};
pub use session::{Phase, Session, Ticket};
pub use verdict::{Rgb, Theme, Verdict};
pub use worker::{Worker, WorkerEvent};

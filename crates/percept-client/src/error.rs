//! Prediction client error types.

use std::path::PathBuf;

use thiserror::Error;

use percept_rest::RestError;

pub type PredictionResult<T> = Result<T, PredictionError>;

#[derive(Debug, Error)]
pub enum PredictionError {
    /// The project lacks a trained model for at least one task. Raised by
    /// the convenience wrappers before any prediction request is made.
    #[error("not all tasks in project '{project}' have a trained model available")]
    NotReady { project: String },

    /// No prediction could be retrieved for a media item. The message
    /// describes the server's answer, including mode-switch hints.
    #[error("{0}")]
    Unavailable(String),

    /// A media collection contained an item the 2D download engine cannot
    /// process (a video, or mixed media types).
    #[error("unsupported media in collection: {0}")]
    UnsupportedMedia(String),

    /// The model-group listing had none of the known response shapes.
    #[error("unexpected model group response from server: {0}")]
    UnexpectedResponse(String),

    /// An in-memory image was submitted for inference without pixel data.
    #[error(
        "image '{name}' has no pixel data loaded; fetch the pixel data before requesting a prediction"
    )]
    MissingPixelData { name: String },

    /// An image path submitted for inference could not be read.
    #[error("cannot read image file '{}'", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request failed: {0}")]
    Rest(#[from] RestError),

    #[error("malformed prediction payload: {0}")]
    Conversion(#[from] serde_json::Error),

    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

//! Prediction retrieval pipeline for the Percept platform.
//!
//! The entry point is [`PredictionClient`], which is scoped to one project
//! and provides:
//! - Single-item prediction fetching for images, video frames and videos,
//!   with normalization across server API generations and label resolution
//! - Bulk download of predictions (and saliency maps) to disk, with
//!   per-item failure isolation
//! - Direct inference on ad-hoc images outside the project's media
//!
//! All operations run strictly sequentially; the pipeline never issues
//! concurrent requests against the inference service.

mod convert;
mod download;
mod error;
mod media;
mod mode;
mod readiness;
mod submit;

pub mod client;

pub use client::{FetchOutcome, ItemPredictions, PredictionClient};
pub use download::DownloadSummary;
pub use error::{PredictionError, PredictionResult};
pub use media::MediaItem;
pub use submit::ImageInput;

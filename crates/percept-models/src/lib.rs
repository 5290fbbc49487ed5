//! Shared data models for the Percept client SDK.
//!
//! This crate provides Serde-serializable types for:
//! - Labels and scored labels
//! - Annotation shapes
//! - Predictions and their result media
//! - Media items (images, videos, video frames)
//! - Projects, tasks and model groups
//! - Prediction retrieval modes

pub mod annotation;
pub mod label;
pub mod media;
pub mod mode;
pub mod model_group;
pub mod prediction;
pub mod project;
pub mod shapes;

// Re-export common types
pub use annotation::{Annotation, AnnotationKind};
pub use label::{Label, ScoredLabel};
pub use media::{Image, ImageInformation, Video, VideoFrame, VideoInformation};
pub use mode::{ModeParseError, PredictionMode};
pub use model_group::{ModelGroup, ModelSummary};
pub use prediction::{MediaIdentifier, Prediction, ResultMedium};
pub use project::{Pipeline, Project, Task, TaskType};
pub use shapes::{Point, Shape};

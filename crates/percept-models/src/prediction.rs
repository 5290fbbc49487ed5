//! Prediction models.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::annotation::{Annotation, AnnotationKind};
use crate::label::Label;

/// Identifies the media item a prediction belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MediaIdentifier {
    Image {
        image_id: String,
    },
    Video {
        video_id: String,
    },
    VideoFrame {
        video_id: String,
        frame_index: u32,
    },
}

/// Reference to an auxiliary result image produced during inference,
/// e.g. a saliency map. The payload behind `url` is fetched lazily.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultMedium {
    pub name: String,

    #[serde(rename = "type")]
    pub media_type: String,

    /// Resource path of the media payload on the server
    pub url: String,

    /// Label the result medium applies to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_id: Option<String>,

    /// Resolved name of `label_id`, filled in by label resolution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_name: Option<String>,
}

impl ResultMedium {
    /// Human-readable name, used in downloaded file names.
    pub fn friendly_name(&self) -> String {
        match &self.label_name {
            Some(label) => format!("{}_{}", self.name, label),
            None => self.name.clone(),
        }
    }

    /// Fill in `label_name` from the project label map.
    pub fn resolve_label(&mut self, labels: &HashMap<String, Label>) {
        if let Some(label) = self.label_id.as_ref().and_then(|id| labels.get(id)) {
            self.label_name = Some(label.name.clone());
        }
    }
}

/// The result of running a project's models on one media item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Payload discriminator; only `prediction` payloads are valid results
    pub kind: AnnotationKind,

    pub annotations: Vec<Annotation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_identifier: Option<MediaIdentifier>,

    /// Auxiliary result media, e.g. saliency maps
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub maps: Vec<ResultMedium>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

impl Prediction {
    /// True if the payload is an actual prediction and not a stored annotation.
    pub fn is_prediction(&self) -> bool {
        self.kind == AnnotationKind::Prediction
    }

    /// True if the prediction carries auxiliary result media.
    pub fn has_result_media(&self) -> bool {
        !self.maps.is_empty()
    }

    /// Frame index for video-derived predictions.
    pub fn frame_index(&self) -> Option<u32> {
        match &self.media_identifier {
            Some(MediaIdentifier::VideoFrame { frame_index, .. }) => Some(*frame_index),
            _ => None,
        }
    }

    /// Resolve all label references against the project label map, in place.
    ///
    /// Covers the scored labels of every annotation as well as the labels
    /// referenced by result media.
    pub fn resolve_labels(&mut self, labels: &HashMap<String, Label>) {
        for annotation in &mut self.annotations {
            annotation.resolve_labels(labels);
        }
        for medium in &mut self.maps {
            medium.resolve_label(labels);
        }
    }
}

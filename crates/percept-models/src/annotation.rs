//! Annotation models.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::label::{Label, ScoredLabel};
use crate::shapes::Shape;

/// Discriminates stored annotations from model predictions.
///
/// The prediction endpoints are expected to return payloads of kind
/// `prediction`; anything else is rejected by the download pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationKind {
    Annotation,
    Prediction,
}

/// One labeled shape inside an annotation scene or prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub labels: Vec<ScoredLabel>,
    pub shape: Shape,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Annotation {
    /// Resolve all scored labels against the project label map.
    pub fn resolve_labels(&mut self, labels: &HashMap<String, Label>) {
        for scored in &mut self.labels {
            scored.resolve(labels);
        }
    }
}

//! Label models.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A label defined in a project's task chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Unique database ID of the label
    pub id: String,

    /// Display name
    pub name: String,

    /// Hex color string, e.g. "#ff0000ff"
    pub color: String,

    /// Label group within the task
    #[serde(default)]
    pub group: String,

    /// Parent label ID, for hierarchical label trees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// True if this label marks media without any object of interest
    #[serde(default)]
    pub is_empty: bool,
}

/// A label attached to a predicted shape, with a confidence score.
///
/// The server returns only the label ID and probability; [`ScoredLabel::resolve`]
/// fills in the display fields from the project's label map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredLabel {
    /// ID of the label this score refers to
    pub id: String,

    /// Confidence score in [0, 1]
    pub probability: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ScoredLabel {
    /// Fill in name and color from the project label map.
    ///
    /// Label IDs not present in the map are left untouched.
    pub fn resolve(&mut self, labels: &HashMap<String, Label>) {
        if let Some(label) = labels.get(&self.id) {
            self.name = Some(label.name.clone());
            self.color = Some(label.color.clone());
        }
    }
}

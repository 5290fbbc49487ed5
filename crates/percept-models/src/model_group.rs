//! Model group models, as returned by the `model_groups` endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimal information about one trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub name: String,

    pub creation_date: DateTime<Utc>,

    /// Model version within its group; absent on some server generations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    /// Score achieved on the test set, if the model finished evaluation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    #[serde(default)]
    pub active_model: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// A group of models trained for one task with one algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelGroup {
    pub name: String,

    #[serde(default)]
    pub model_template_id: String,

    pub models: Vec<ModelSummary>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ModelGroup {
    /// True if the group holds at least one model with an evaluation score.
    pub fn has_trained_models(&self) -> bool {
        self.models.iter().any(|model| model.score.is_some())
    }

    /// The most recently created model in the group, if any.
    pub fn latest_model(&self) -> Option<&ModelSummary> {
        self.models.iter().max_by_key(|model| model.creation_date)
    }
}

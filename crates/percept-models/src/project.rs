//! Project and task models.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::label::Label;

/// Kind of a task in a project's pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    /// Pipeline source node, holds the media
    Dataset,
    /// Pipeline connector node between trainable tasks
    Crop,
    Classification,
    Detection,
    Segmentation,
    InstanceSegmentation,
    RotatedDetection,
    AnomalyClassification,
    AnomalyDetection,
    AnomalySegmentation,
}

impl TaskType {
    /// True for tasks that train a model, false for pipeline plumbing nodes.
    pub fn is_trainable(&self) -> bool {
        !matches!(self, TaskType::Dataset | TaskType::Crop)
    }
}

/// One node in a project's task chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub task_type: TaskType,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<Label>,
}

/// Ordered task chain of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub tasks: Vec<Task>,
}

/// A project on the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub pipeline: Pipeline,
}

impl Project {
    /// Tasks that hold a trainable model, in chain order.
    pub fn trainable_tasks(&self) -> Vec<&Task> {
        self.pipeline
            .tasks
            .iter()
            .filter(|task| task.task_type.is_trainable())
            .collect()
    }

    /// Flatten the labels of all tasks into one map keyed by label ID.
    pub fn all_labels(&self) -> HashMap<String, Label> {
        self.pipeline
            .tasks
            .iter()
            .flat_map(|task| task.labels.iter())
            .map(|label| (label.id.clone(), label.clone()))
            .collect()
    }
}

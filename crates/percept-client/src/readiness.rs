//! Trained-model readiness check.

use std::collections::HashSet;

use serde_json::Value;

use percept_models::{ModelGroup, Project};
use percept_rest::{PlatformVersion, RestSession};

use crate::error::{PredictionError, PredictionResult};

/// Check whether every trainable task in the project has at least one model
/// group holding at least one model. Pure read; callers cache the result.
pub(crate) async fn are_models_trained(
    session: &RestSession,
    project: &Project,
    project_base: &str,
) -> PredictionResult<bool> {
    let response = session
        .get_json(&format!("{project_base}/model_groups"))
        .await?;
    let groups = parse_model_groups(response, session.version())?;

    let tasks_with_models: HashSet<&str> = groups
        .iter()
        .filter(|group| !group.models.is_empty())
        .filter_map(|group| group.task_id.as_deref())
        .collect();

    for task in project.trainable_tasks() {
        if !tasks_with_models.contains(task.id.as_str()) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Extract the model-group list from the response, whose shape depends on
/// the server generation: legacy servers answer with an `items` object or
/// a bare array, current servers with a `model_groups` object.
fn parse_model_groups(
    response: Value,
    version: PlatformVersion,
) -> PredictionResult<Vec<ModelGroup>> {
    let list = match version {
        PlatformVersion::LegacyMvp | PlatformVersion::LegacyV1 => match response {
            Value::Object(mut map) => map
                .remove("items")
                .unwrap_or_else(|| Value::Array(Vec::new())),
            Value::Array(_) => response,
            other => {
                return Err(PredictionError::UnexpectedResponse(other.to_string()));
            }
        },
        PlatformVersion::Current => match response {
            Value::Object(mut map) => map
                .remove("model_groups")
                .unwrap_or_else(|| Value::Array(Vec::new())),
            other => {
                return Err(PredictionError::UnexpectedResponse(other.to_string()));
            }
        },
    };
    Ok(serde_json::from_value(list)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn group(task_id: &str, model_count: usize) -> Value {
        let models: Vec<Value> = (0..model_count)
            .map(|i| {
                json!({
                    "name": format!("model {i}"),
                    "creation_date": "2025-02-01T10:00:00Z",
                    "score": 0.8
                })
            })
            .collect();
        json!({"name": "group", "task_id": task_id, "models": models})
    }

    #[test]
    fn test_current_shape_uses_model_groups_key() {
        let groups = parse_model_groups(
            json!({"model_groups": [group("t1", 1)]}),
            PlatformVersion::Current,
        )
        .unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].task_id.as_deref(), Some("t1"));
    }

    #[test]
    fn test_legacy_shape_uses_items_key() {
        let groups = parse_model_groups(
            json!({"items": [group("t1", 2)]}),
            PlatformVersion::LegacyMvp,
        )
        .unwrap();
        assert_eq!(groups[0].models.len(), 2);
    }

    #[test]
    fn test_legacy_shape_accepts_bare_array() {
        let groups =
            parse_model_groups(json!([group("t1", 1)]), PlatformVersion::LegacyV1).unwrap();
        assert_eq!(groups.len(), 1);
    }

    #[test]
    fn test_unexpected_shape_is_an_error() {
        assert!(matches!(
            parse_model_groups(json!("nonsense"), PlatformVersion::LegacyMvp),
            Err(PredictionError::UnexpectedResponse(_))
        ));
        assert!(matches!(
            parse_model_groups(json!([group("t1", 1)]), PlatformVersion::Current),
            Err(PredictionError::UnexpectedResponse(_))
        ));
    }
}

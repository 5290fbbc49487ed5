//! Shared fixtures for the prediction pipeline tests.
#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use percept_client::PredictionClient;
use percept_models::Project;
use percept_rest::{PlatformVersion, RestConfig, RestSession};

pub const PROJECT_BASE: &str = "/workspaces/w1/projects/p1";

pub fn test_project() -> Project {
    serde_json::from_value(json!({
        "id": "p1",
        "name": "street scenes",
        "pipeline": {
            "tasks": [
                {"id": "t0", "title": "Dataset", "task_type": "dataset"},
                {
                    "id": "t1",
                    "title": "Detection",
                    "task_type": "detection",
                    "labels": [
                        {"id": "l1", "name": "person", "color": "#0015ffff", "group": "default"}
                    ]
                }
            ]
        }
    }))
    .expect("valid project fixture")
}

pub fn client_for(server: &MockServer, version: PlatformVersion) -> PredictionClient {
    let session = RestSession::new(RestConfig::new(server.uri()))
        .expect("session builds")
        .with_version(version);
    PredictionClient::new(Arc::new(session), "w1", test_project())
}

/// Model-group listing in the current wire shape, with one trained model
/// for the detection task.
pub fn model_groups_ready() -> Value {
    json!({
        "model_groups": [
            {
                "name": "Detection group",
                "task_id": "t1",
                "models": [
                    {"name": "model 1", "creation_date": "2025-04-01T12:00:00Z", "score": 0.85}
                ]
            }
        ]
    })
}

/// Model-group listing with a group but no models yet.
pub fn model_groups_empty() -> Value {
    json!({
        "model_groups": [
            {"name": "Detection group", "task_id": "t1", "models": []}
        ]
    })
}

pub async fn mount_model_groups(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("{PROJECT_BASE}/model_groups")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// A prediction payload in the current wire format.
pub fn prediction_json() -> Value {
    json!({
        "kind": "prediction",
        "annotations": [
            {
                "labels": [{"id": "l1", "probability": 0.91}],
                "shape": {"type": "rectangle", "x": 10.0, "y": 20.0, "width": 100.0, "height": 50.0}
            }
        ]
    })
}

/// A per-frame prediction payload carrying a video-frame identifier.
pub fn frame_prediction_json(video_id: &str, frame_index: u32) -> Value {
    let mut body = prediction_json();
    body["media_identifier"] = json!({
        "type": "video_frame",
        "video_id": video_id,
        "frame_index": frame_index
    });
    body
}

/// A payload of the wrong kind, as stored-annotation endpoints return it.
pub fn annotation_json() -> Value {
    let mut body = prediction_json();
    body["kind"] = json!("annotation");
    body
}

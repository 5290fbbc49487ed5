//! Tests for single-item prediction fetching and the readiness gate.

mod common;

use serde_json::json;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::*;
use percept_client::{FetchOutcome, MediaItem, PredictionError};
use percept_models::{Image, PredictionMode, Shape, Video, VideoFrame, VideoInformation};
use percept_rest::PlatformVersion;

fn test_image() -> Image {
    Image::new("i1", "crossing", 640, 480)
}

fn test_video() -> Video {
    Video {
        id: "v1".to_string(),
        name: "traffic".to_string(),
        media_information: VideoInformation {
            width: 1280,
            height: 720,
            frame_count: 100,
            frame_stride: 10,
            duration: None,
        },
    }
}

#[tokio::test]
async fn test_not_ready_project_issues_no_prediction_requests() {
    let server = MockServer::start().await;
    mount_model_groups(&server, model_groups_empty()).await;
    Mock::given(method("GET"))
        .and(path_regex(r"/predictions/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, PlatformVersion::Current);
    let image = test_image();
    let video = test_video();

    for item in [MediaItem::from(&image), MediaItem::from(&video)] {
        match client.fetch_predictions(item).await {
            FetchOutcome::NotReady { message } => {
                assert!(message.contains("Not all tasks"), "message: {message}");
            }
            other => panic!("expected NotReady, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_not_ready_project_escalates_in_wrappers() {
    let server = MockServer::start().await;
    mount_model_groups(&server, model_groups_empty()).await;

    let client = client_for(&server, PlatformVersion::Current);
    let error = client.get_image_prediction(&test_image()).await.unwrap_err();
    assert!(matches!(error, PredictionError::NotReady { .. }));
    assert!(error.to_string().contains("street scenes"));
}

#[tokio::test]
async fn test_ready_answer_is_sticky() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{PROJECT_BASE}/model_groups")))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_groups_ready()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, PlatformVersion::Current);
    assert!(client.ready_to_predict().await.unwrap());
    // Second call must trust the cached positive answer
    assert!(client.ready_to_predict().await.unwrap());
}

#[tokio::test]
async fn test_negative_readiness_is_rechecked() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{PROJECT_BASE}/model_groups")))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_groups_empty()))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server, PlatformVersion::Current);
    assert!(!client.ready_to_predict().await.unwrap());
    assert!(!client.ready_to_predict().await.unwrap());
}

#[tokio::test]
async fn test_image_prediction_with_resolved_labels() {
    let server = MockServer::start().await;
    mount_model_groups(&server, model_groups_ready()).await;
    Mock::given(method("GET"))
        .and(path(format!(
            "{PROJECT_BASE}/media/images/i1/predictions/auto"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(prediction_json()))
        .mount(&server)
        .await;

    let client = client_for(&server, PlatformVersion::Current);
    let prediction = client.get_image_prediction(&test_image()).await.unwrap();

    assert!(prediction.is_prediction());
    let scored = &prediction.annotations[0].labels[0];
    assert_eq!(scored.name.as_deref(), Some("person"));
    assert_eq!(scored.color.as_deref(), Some("#0015ffff"));
}

#[tokio::test]
async fn test_mode_selects_request_path() {
    let server = MockServer::start().await;
    mount_model_groups(&server, model_groups_ready()).await;
    Mock::given(method("GET"))
        .and(path(format!(
            "{PROJECT_BASE}/media/images/i1/predictions/online"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(prediction_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, PlatformVersion::Current);
    client.set_mode(PredictionMode::Online);
    client.get_image_prediction(&test_image()).await.unwrap();
}

#[tokio::test]
async fn test_no_content_in_latest_mode_hints_at_mode_switch() {
    let server = MockServer::start().await;
    mount_model_groups(&server, model_groups_ready()).await;
    Mock::given(method("GET"))
        .and(path(format!(
            "{PROJECT_BASE}/media/images/i1/predictions/latest"
        )))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_for(&server, PlatformVersion::Current);
    client.set_mode(PredictionMode::Latest);
    let error = client.get_image_prediction(&test_image()).await.unwrap_err();

    let PredictionError::Unavailable(message) = error else {
        panic!("expected Unavailable");
    };
    assert!(message.contains("not available"), "message: {message}");
    assert!(
        message.contains("'auto' or 'online'"),
        "missing mode-switch hint: {message}"
    );
}

#[tokio::test]
async fn test_server_error_text_is_embedded() {
    let server = MockServer::start().await;
    mount_model_groups(&server, model_groups_ready()).await;
    Mock::given(method("GET"))
        .and(path(format!(
            "{PROJECT_BASE}/media/images/i1/predictions/auto"
        )))
        .respond_with(ResponseTemplate::new(503).set_body_string("inference workers saturated"))
        .mount(&server)
        .await;

    let client = client_for(&server, PlatformVersion::Current);
    let error = client.get_image_prediction(&test_image()).await.unwrap_err();
    assert!(
        error.to_string().contains("inference workers saturated"),
        "error: {error}"
    );
}

#[tokio::test]
async fn test_video_predictions_current_format() {
    let server = MockServer::start().await;
    mount_model_groups(&server, model_groups_ready()).await;
    Mock::given(method("GET"))
        .and(path(format!(
            "{PROJECT_BASE}/media/videos/v1/predictions/auto"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            frame_prediction_json("v1", 0),
            frame_prediction_json("v1", 10),
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server, PlatformVersion::Current);
    let predictions = client.get_video_predictions(&test_video()).await.unwrap();
    assert_eq!(predictions.len(), 2);
    assert_eq!(predictions[1].frame_index(), Some(10));
}

#[tokio::test]
async fn test_legacy_video_payload_is_unwrapped_and_rescaled() {
    let server = MockServer::start().await;
    mount_model_groups(&server, model_groups_ready()).await;

    let normalized_frame = json!({
        "kind": "prediction",
        "annotations": [
            {
                "labels": [{"id": "l1", "probability": 0.5}],
                "shape": {"type": "rectangle", "x": 0.25, "y": 0.5, "width": 0.5, "height": 0.25}
            }
        ],
        "media_identifier": {"type": "video_frame", "video_id": "v1", "frame_index": 4}
    });
    Mock::given(method("GET"))
        .and(path(format!(
            "{PROJECT_BASE}/media/videos/v1/predictions/auto"
        )))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"video_predictions": [normalized_frame]})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, PlatformVersion::LegacyV1);
    let predictions = client.get_video_predictions(&test_video()).await.unwrap();
    assert_eq!(predictions.len(), 1);

    // 1280x720 video: x=0.25 -> 320, y=0.5 -> 360
    assert_eq!(
        predictions[0].annotations[0].shape,
        Shape::Rectangle {
            x: 320.0,
            y: 360.0,
            width: 640.0,
            height: 180.0
        }
    );
    // Labels must be resolved on the legacy path too
    assert_eq!(
        predictions[0].annotations[0].labels[0].name.as_deref(),
        Some("person")
    );
}

#[tokio::test]
async fn test_video_frame_prediction_uses_frame_path() {
    let server = MockServer::start().await;
    mount_model_groups(&server, model_groups_ready()).await;
    Mock::given(method("GET"))
        .and(path(format!(
            "{PROJECT_BASE}/media/videos/v1/frames/30/predictions/auto"
        )))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(frame_prediction_json("v1", 30)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, PlatformVersion::Current);
    let frame = VideoFrame::from_video(&test_video(), 30);
    let prediction = client.get_video_frame_prediction(&frame).await.unwrap();
    assert_eq!(prediction.frame_index(), Some(30));
}

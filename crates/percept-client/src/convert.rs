//! Conversion of raw prediction payloads into [`Prediction`] values.
//!
//! The wire format changed across server generations: legacy platforms
//! return shape coordinates normalized to [0, 1] and wrap per-frame video
//! results in a `video_predictions` envelope, while current platforms use
//! absolute pixel coordinates and a bare array. One parser exists per
//! generation; the entry points dispatch on the version discriminant and
//! resolve labels before returning, so no caller can skip resolution.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use percept_models::{Label, Prediction};
use percept_rest::PlatformVersion;

/// Parse the prediction payload for a single 2D media item.
pub(crate) fn prediction_from_response(
    response: Value,
    version: PlatformVersion,
    image_width: u32,
    image_height: u32,
    labels: &HashMap<String, Label>,
) -> Result<Prediction, serde_json::Error> {
    let mut prediction = match version {
        PlatformVersion::LegacyMvp | PlatformVersion::LegacyV1 => {
            from_normalized_payload(response, image_width, image_height)?
        }
        PlatformVersion::Current => from_payload(response)?,
    };
    prediction.resolve_labels(labels);
    Ok(prediction)
}

/// Parse the prediction payload for a whole video into per-frame predictions.
pub(crate) fn video_predictions_from_response(
    response: Value,
    version: PlatformVersion,
    video_width: u32,
    video_height: u32,
    labels: &HashMap<String, Label>,
) -> Result<Vec<Prediction>, serde_json::Error> {
    let frames: Vec<Value> = match version {
        PlatformVersion::LegacyMvp | PlatformVersion::LegacyV1 => {
            let envelope: VideoPredictionsEnvelope = serde_json::from_value(response)?;
            envelope.video_predictions
        }
        PlatformVersion::Current => serde_json::from_value(response)?,
    };
    frames
        .into_iter()
        .map(|frame| prediction_from_response(frame, version, video_width, video_height, labels))
        .collect()
}

/// Parse a direct-inference response. These are always produced by current
/// servers, so only the current-format parser applies.
pub(crate) fn prediction_from_inference_response(
    response: Value,
    labels: &HashMap<String, Label>,
) -> Result<Prediction, serde_json::Error> {
    let mut prediction = from_payload(response)?;
    prediction.resolve_labels(labels);
    Ok(prediction)
}

#[derive(Deserialize)]
struct VideoPredictionsEnvelope {
    video_predictions: Vec<Value>,
}

fn from_payload(response: Value) -> Result<Prediction, serde_json::Error> {
    serde_json::from_value(response)
}

fn from_normalized_payload(
    response: Value,
    image_width: u32,
    image_height: u32,
) -> Result<Prediction, serde_json::Error> {
    let mut prediction: Prediction = serde_json::from_value(response)?;
    for annotation in &mut prediction.annotations {
        annotation.shape = annotation.shape.denormalized(image_width, image_height);
    }
    Ok(prediction)
}

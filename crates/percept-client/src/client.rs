//! Prediction client for one project.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use percept_models::{Image, Label, Prediction, PredictionMode, Project, Video, VideoFrame};
use percept_rest::{RestError, RestSession, StatusCode};

use crate::convert;
use crate::error::{PredictionError, PredictionResult};
use crate::media::MediaItem;
use crate::mode::ModeState;
use crate::readiness;

/// Predictions retrieved for one media item.
#[derive(Debug, Clone)]
pub enum ItemPredictions {
    /// One prediction, for an image or a video frame
    Single(Prediction),
    /// One prediction per inferred frame, for a whole video
    PerFrame(Vec<Prediction>),
}

/// Outcome of a single-item prediction fetch.
///
/// Transport and availability problems never escape the fetcher as errors;
/// they surface as [`FetchOutcome::NotReady`] or
/// [`FetchOutcome::Unavailable`] with a message describing the cause, so
/// bulk callers can skip the item and continue.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Fetched(ItemPredictions),
    /// The project has untrained tasks; no request was sent for the item
    NotReady { message: String },
    /// The server could not provide a prediction for the item
    Unavailable { message: String },
}

/// Client to retrieve predictions for media in one project.
pub struct PredictionClient {
    pub(crate) session: Arc<RestSession>,
    pub(crate) project: Project,
    pub(crate) project_base: String,
    pub(crate) labels: HashMap<String, Label>,
    pub(crate) mode: ModeState,
    ready: AtomicBool,
}

impl PredictionClient {
    /// Create a client for `project` in the given workspace.
    ///
    /// The project's label map is captured once here and reused for every
    /// label resolution; labels are assumed not to change mid-session.
    pub fn new(session: Arc<RestSession>, workspace_id: &str, project: Project) -> Self {
        let project_base = format!("workspaces/{workspace_id}/projects/{}", project.id);
        let labels = project.all_labels();
        Self {
            session,
            project,
            project_base,
            labels,
            mode: ModeState::new(PredictionMode::default()),
            ready: AtomicBool::new(false),
        }
    }

    /// The mode used to retrieve predictions, including any transient
    /// override held by an in-flight full-video download.
    pub fn mode(&self) -> PredictionMode {
        self.mode.effective()
    }

    /// Set the mode used to retrieve predictions. String names can be
    /// parsed through [`PredictionMode`]'s `FromStr` impl.
    pub fn set_mode(&self, mode: PredictionMode) {
        self.mode.set_base(mode);
    }

    /// True if every task in the project has a trained model, so prediction
    /// requests can succeed.
    ///
    /// The result is cached asymmetrically: once the project has been seen
    /// ready it stays ready (models are not un-trained), while a negative
    /// answer is re-verified against the server on every call.
    pub async fn ready_to_predict(&self) -> PredictionResult<bool> {
        if self.ready.load(Ordering::Relaxed) {
            return Ok(true);
        }
        let ready =
            readiness::are_models_trained(&self.session, &self.project, &self.project_base)
                .await?;
        self.ready.store(ready, Ordering::Relaxed);
        Ok(ready)
    }

    /// Fetch predictions for any media item under the effective mode.
    pub async fn fetch_predictions(&self, media_item: MediaItem<'_>) -> FetchOutcome {
        self.fetch_with_mode(media_item, self.mode.effective()).await
    }

    async fn fetch_with_mode(
        &self,
        media_item: MediaItem<'_>,
        mode: PredictionMode,
    ) -> FetchOutcome {
        match self.ready_to_predict().await {
            Ok(true) => {}
            Ok(false) => {
                return FetchOutcome::NotReady {
                    message: format!(
                        "Not all tasks in project '{}' have a trained model available. \
                         Unable to get predictions from the project.",
                        self.project.name
                    ),
                };
            }
            Err(error) => {
                return FetchOutcome::Unavailable {
                    message: format!(
                        "Unable to verify that project '{}' has trained models: {error}",
                        self.project.name
                    ),
                };
            }
        }

        let url = format!(
            "{}/predictions/{mode}",
            media_item.resource_path(&self.project_base)
        );
        let response = match self.session.get_json(&url).await {
            Ok(response) => response,
            Err(error) => {
                return FetchOutcome::Unavailable {
                    message: self.unavailable_message(media_item, mode, &error),
                };
            }
        };

        let (width, height) = media_item.dimensions();
        let version = self.session.version();
        let converted = match media_item {
            MediaItem::Image(_) | MediaItem::VideoFrame(_) => {
                convert::prediction_from_response(response, version, width, height, &self.labels)
                    .map(ItemPredictions::Single)
            }
            MediaItem::Video(_) => convert::video_predictions_from_response(
                response,
                version,
                width,
                height,
                &self.labels,
            )
            .map(ItemPredictions::PerFrame),
        };

        match converted {
            Ok(predictions) => FetchOutcome::Fetched(predictions),
            Err(error) => FetchOutcome::Unavailable {
                message: format!(
                    "Received a malformed prediction payload for {} '{}': {error}",
                    media_item.kind_noun(),
                    media_item.name()
                ),
            },
        }
    }

    fn unavailable_message(
        &self,
        media_item: MediaItem<'_>,
        mode: PredictionMode,
        error: &RestError,
    ) -> String {
        let noun = media_item.kind_noun();
        let mut message = format!("Unable to retrieve prediction for {noun}.");
        if error.status_code() == Some(StatusCode::NO_CONTENT) {
            message.push_str(&format!(
                " The prediction for the {noun} with name '{}' is not available in \
                 project '{}'.",
                media_item.name(),
                self.project.name
            ));
            if mode == PredictionMode::Latest {
                message.push_str(
                    " Try setting the mode of the prediction client to 'auto' or \
                     'online' to trigger inference upon request.",
                );
            }
        } else {
            message.push_str(&format!(" Server responded with error message: {error}"));
        }
        message
    }

    fn not_ready(&self) -> PredictionError {
        PredictionError::NotReady {
            project: self.project.name.clone(),
        }
    }

    /// Get a prediction for an image, failing fast when none is available.
    pub async fn get_image_prediction(&self, image: &Image) -> PredictionResult<Prediction> {
        match self.fetch_predictions(MediaItem::Image(image)).await {
            FetchOutcome::Fetched(ItemPredictions::Single(prediction)) => Ok(prediction),
            FetchOutcome::Fetched(ItemPredictions::PerFrame(_)) => {
                Err(PredictionError::Unavailable(format!(
                    "Received a video prediction payload for image '{}'",
                    image.name
                )))
            }
            FetchOutcome::NotReady { .. } => Err(self.not_ready()),
            FetchOutcome::Unavailable { message } => Err(PredictionError::Unavailable(message)),
        }
    }

    /// Get a prediction for a video frame, failing fast when none is
    /// available.
    pub async fn get_video_frame_prediction(
        &self,
        frame: &VideoFrame,
    ) -> PredictionResult<Prediction> {
        match self.fetch_predictions(MediaItem::VideoFrame(frame)).await {
            FetchOutcome::Fetched(ItemPredictions::Single(prediction)) => Ok(prediction),
            FetchOutcome::Fetched(ItemPredictions::PerFrame(_)) => {
                Err(PredictionError::Unavailable(format!(
                    "Received a video prediction payload for video frame '{}'",
                    frame.name
                )))
            }
            FetchOutcome::NotReady { .. } => Err(self.not_ready()),
            FetchOutcome::Unavailable { message } => Err(PredictionError::Unavailable(message)),
        }
    }

    /// Get the per-frame predictions stored for a video, failing fast when
    /// none are available.
    pub async fn get_video_predictions(
        &self,
        video: &Video,
    ) -> PredictionResult<Vec<Prediction>> {
        match self.fetch_predictions(MediaItem::Video(video)).await {
            FetchOutcome::Fetched(ItemPredictions::PerFrame(predictions)) => Ok(predictions),
            FetchOutcome::Fetched(ItemPredictions::Single(_)) => {
                Err(PredictionError::Unavailable(format!(
                    "Received a single prediction payload for video '{}'",
                    video.name
                )))
            }
            FetchOutcome::NotReady { .. } => Err(self.not_ready()),
            FetchOutcome::Unavailable { message } => Err(PredictionError::Unavailable(message)),
        }
    }
}

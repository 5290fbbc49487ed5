//! Bulk prediction download.
//!
//! Three entry points layered on one sequential 2D engine. The engine
//! isolates failures per media item: an item whose prediction cannot be
//! retrieved is counted as a skip and the batch continues. Result media
//! (saliency maps) are a best-effort secondary artifact; a failure to
//! fetch them never fails the item.

use std::mem::discriminant;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use percept_models::{Image, Prediction, PredictionMode, Video, VideoFrame};

use crate::client::{FetchOutcome, ItemPredictions, PredictionClient};
use crate::error::{PredictionError, PredictionResult};
use crate::media::MediaItem;

const PREDICTIONS_DIR: &str = "predictions";
const SALIENCY_MAPS_DIR: &str = "saliency_maps";
const DIR_MODE: u32 = 0o770;

/// Counters and timing for one bulk download pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct DownloadSummary {
    /// Number of prediction files written
    pub downloaded: usize,
    /// Number of media items skipped because no valid prediction was
    /// available
    pub skipped: usize,
    /// Wall-clock time spent
    pub elapsed: Duration,
}

impl DownloadSummary {
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    fn accumulate(&mut self, other: DownloadSummary) {
        self.downloaded += other.downloaded;
        self.skipped += other.skipped;
        self.elapsed += other.elapsed;
    }
}

/// One fetched result medium, ready to be written to disk.
struct ResultMediumData {
    friendly_name: String,
    data: Vec<u8>,
}

/// Outcome of the best-effort result-media fetch. `Unavailable` is a
/// recovered state, not an error: the item's prediction is still written.
enum ResultMedia {
    Available(Vec<ResultMediumData>),
    Unavailable,
}

impl PredictionClient {
    /// Download predictions for a list of images to `<folder>/predictions`.
    pub async fn download_predictions_for_images(
        &self,
        images: &[Image],
        folder: impl AsRef<Path>,
        include_result_media: bool,
    ) -> PredictionResult<DownloadSummary> {
        let items: Vec<MediaItem<'_>> = images.iter().map(MediaItem::Image).collect();
        self.download_for_2d_items(&items, folder.as_ref(), include_result_media, true)
            .await
    }

    /// Download per-frame predictions for one video to
    /// `<folder>/predictions`.
    ///
    /// With `inferred_frames_only` (the default mode of operation), only
    /// frames that already have a stored prediction are downloaded. When it
    /// is false, frames are enumerated with `frame_stride` (or the video's
    /// own stride) and the prediction mode is forced to `online` for the
    /// duration of the call, so inference runs for every enumerated frame.
    pub async fn download_predictions_for_video(
        &self,
        video: &Video,
        folder: impl AsRef<Path>,
        include_result_media: bool,
        inferred_frames_only: bool,
        frame_stride: Option<u32>,
    ) -> PredictionResult<DownloadSummary> {
        let (frames, _guard) = if inferred_frames_only {
            (self.inferred_frames(video).await, None)
        } else {
            let stride = frame_stride
                .filter(|stride| *stride > 0)
                .unwrap_or(video.media_information.frame_stride)
                .max(1);
            let frames: Vec<VideoFrame> = (0..video.media_information.frame_count)
                .step_by(stride as usize)
                .map(|index| VideoFrame::from_video(video, index))
                .collect();
            // Force inference for frames that have no stored prediction yet.
            // The guard clears the override on every exit path below.
            let guard = self.mode.override_scope(PredictionMode::Online);
            (frames, Some(guard))
        };

        if frames.is_empty() {
            return Ok(DownloadSummary::default());
        }
        let items: Vec<MediaItem<'_>> = frames.iter().map(MediaItem::VideoFrame).collect();
        self.download_for_2d_items(&items, folder.as_ref(), include_result_media, false)
            .await
    }

    /// Download per-frame predictions for a list of videos, sequentially.
    ///
    /// A failure on one video is logged and does not abort the remaining
    /// downloads.
    pub async fn download_predictions_for_videos(
        &self,
        videos: &[Video],
        folder: impl AsRef<Path>,
        include_result_media: bool,
        inferred_frames_only: bool,
        frame_stride: Option<u32>,
    ) -> DownloadSummary {
        let folder = folder.as_ref();
        info!(
            "Starting prediction download... saving predictions for {} videos to folder {}",
            videos.len(),
            predictions_dir(folder).display()
        );
        let mut total = DownloadSummary::default();
        for video in videos {
            match self
                .download_predictions_for_video(
                    video,
                    folder,
                    include_result_media,
                    inferred_frames_only,
                    frame_stride,
                )
                .await
            {
                Ok(summary) => total.accumulate(summary),
                Err(error) => {
                    warn!(
                        "Failed to download predictions for video '{}': {error}",
                        video.name
                    );
                }
            }
        }
        info!(
            "Video prediction download finished in {:.1} seconds.",
            total.elapsed_seconds()
        );
        total
    }

    /// Frames of `video` that already have a stored prediction.
    async fn inferred_frames(&self, video: &Video) -> Vec<VideoFrame> {
        match self.fetch_predictions(MediaItem::Video(video)).await {
            FetchOutcome::Fetched(ItemPredictions::PerFrame(predictions)) => predictions
                .iter()
                .filter_map(Prediction::frame_index)
                .map(|index| VideoFrame::from_video(video, index))
                .collect(),
            FetchOutcome::Fetched(ItemPredictions::Single(_)) => {
                warn!(
                    "Received a single prediction payload for video '{}'; \
                     no frames to download",
                    video.name
                );
                Vec::new()
            }
            FetchOutcome::NotReady { message } | FetchOutcome::Unavailable { message } => {
                warn!(
                    "No stored predictions for video '{}': {message}",
                    video.name
                );
                Vec::new()
            }
        }
    }

    /// Shared engine for lists of 2D media (images or video frames, never
    /// mixed).
    async fn download_for_2d_items(
        &self,
        items: &[MediaItem<'_>],
        folder: &Path,
        include_result_media: bool,
        verbose: bool,
    ) -> PredictionResult<DownloadSummary> {
        let (noun, noun_plural) = match items.first() {
            None | Some(MediaItem::Image(_)) => ("image", "images"),
            Some(MediaItem::VideoFrame(_)) => ("video frame", "video frames"),
            Some(MediaItem::Video(_)) => {
                return Err(PredictionError::UnsupportedMedia(
                    "videos cannot be downloaded through the 2D media engine".to_string(),
                ));
            }
        };
        if let Some(first) = items.first() {
            if items.iter().any(|item| discriminant(item) != discriminant(first)) {
                return Err(PredictionError::UnsupportedMedia(
                    "media collections must hold a single media type".to_string(),
                ));
            }
        }

        let predictions_folder = predictions_dir(folder);
        create_dir_restricted(&predictions_folder).await?;
        if verbose {
            info!(
                "Starting prediction download... saving predictions for {} {noun_plural} \
                 to folder {}",
                items.len(),
                predictions_folder.display()
            );
        }

        let started = Instant::now();
        let mut downloaded = 0usize;
        let mut skipped = 0usize;

        for item in items {
            let prediction = match self.fetch_predictions(*item).await {
                FetchOutcome::Fetched(ItemPredictions::Single(prediction)) => prediction,
                FetchOutcome::Fetched(ItemPredictions::PerFrame(_)) => {
                    // a per-frame payload for 2D media is a server-side mixup
                    skipped += 1;
                    continue;
                }
                FetchOutcome::NotReady { message } | FetchOutcome::Unavailable { message } => {
                    if verbose {
                        info!(
                            "Unable to retrieve prediction for {noun} '{}', with reason: \
                             {message}. Skipping this {noun}",
                            item.name()
                        );
                    }
                    skipped += 1;
                    continue;
                }
            };

            if !prediction.is_prediction() {
                if verbose {
                    warn!(
                        "Received invalid prediction of kind {:?} for {noun} with name '{}'",
                        prediction.kind,
                        item.name()
                    );
                }
                skipped += 1;
                continue;
            }

            if include_result_media && prediction.has_result_media() {
                match self.get_result_media(&prediction).await {
                    ResultMedia::Available(media) => {
                        let maps_folder = predictions_folder.join(SALIENCY_MAPS_DIR);
                        create_dir_restricted(&maps_folder).await?;
                        for medium in media {
                            let file_name =
                                format!("{}_{}.jpg", item.name(), medium.friendly_name);
                            tokio::fs::write(maps_folder.join(file_name), &medium.data).await?;
                        }
                    }
                    ResultMedia::Unavailable => {
                        if verbose {
                            info!(
                                "Unable to retrieve prediction result map for {noun} '{}'. \
                                 Skipping",
                                item.name()
                            );
                        }
                    }
                }
            }

            let export = serde_json::to_string_pretty(&prediction)?;
            let prediction_path = predictions_folder.join(format!("{}.json", item.name()));
            tokio::fs::write(&prediction_path, export).await?;
            downloaded += 1;
        }

        let summary = DownloadSummary {
            downloaded,
            skipped,
            elapsed: started.elapsed(),
        };
        if verbose {
            let mut message = if summary.downloaded > 0 {
                format!(
                    "Downloaded {} predictions to folder {} in {:.1} seconds.",
                    summary.downloaded,
                    predictions_folder.display(),
                    summary.elapsed_seconds()
                )
            } else {
                "No predictions were downloaded.".to_string()
            };
            if summary.skipped > 0 {
                message.push_str(&format!(
                    " Was unable to retrieve predictions for {} {noun_plural}, these \
                     {noun_plural} were skipped.",
                    summary.skipped
                ));
            }
            info!("{message}");
        }
        Ok(summary)
    }

    /// Fetch the payloads of all result media of a prediction. The first
    /// transport failure downgrades the whole set to `Unavailable`.
    async fn get_result_media(&self, prediction: &Prediction) -> ResultMedia {
        let mut media = Vec::with_capacity(prediction.maps.len());
        for medium in &prediction.maps {
            match self.session.get_bytes(&medium.url).await {
                Ok(data) => media.push(ResultMediumData {
                    friendly_name: medium.friendly_name(),
                    data,
                }),
                Err(error) => {
                    debug!("result media fetch for '{}' failed: {error}", medium.name);
                    return ResultMedia::Unavailable;
                }
            }
        }
        ResultMedia::Available(media)
    }
}

/// Target directory for prediction files. A folder that already ends in a
/// `predictions` component is used as-is.
fn predictions_dir(folder: &Path) -> PathBuf {
    if folder.ends_with(PREDICTIONS_DIR) {
        folder.to_path_buf()
    } else {
        folder.join(PREDICTIONS_DIR)
    }
}

/// Create a directory (and parents) with group-restricted permissions.
/// Pre-existing directories are not an error.
async fn create_dir_restricted(path: &Path) -> std::io::Result<()> {
    let mut builder = tokio::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(DIR_MODE);
    builder.create(path).await
}

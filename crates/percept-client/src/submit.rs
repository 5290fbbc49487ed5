//! Direct-inference submission.
//!
//! Runs inference on an arbitrary local image, outside of any media stored
//! in the project. The image is pushed to the project's `predict` endpoint
//! and is not saved on the server.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat};

use percept_models::{Image, Prediction};

use crate::client::PredictionClient;
use crate::convert;
use crate::error::{PredictionError, PredictionResult};

/// Input accepted by [`PredictionClient::predict_raw`].
#[derive(Debug)]
pub enum ImageInput {
    /// A project image whose pixel data has been fetched
    Media(Image),
    /// Raw pixel data
    Pixels(DynamicImage),
    /// Path to an image file on disk, uploaded as its raw bytes
    Path(PathBuf),
}

impl From<Image> for ImageInput {
    fn from(image: Image) -> Self {
        ImageInput::Media(image)
    }
}

impl From<DynamicImage> for ImageInput {
    fn from(pixels: DynamicImage) -> Self {
        ImageInput::Pixels(pixels)
    }
}

impl From<PathBuf> for ImageInput {
    fn from(path: PathBuf) -> Self {
        ImageInput::Path(path)
    }
}

impl From<&Path> for ImageInput {
    fn from(path: &Path) -> Self {
        ImageInput::Path(path.to_path_buf())
    }
}

impl PredictionClient {
    /// Push an image to the project and receive a prediction for it.
    ///
    /// In-memory inputs are JPEG-encoded before upload; path inputs are
    /// uploaded as-is. This path never consults the readiness gate; the
    /// server decides whether it can serve the request.
    pub async fn predict_raw(
        &self,
        image: impl Into<ImageInput>,
    ) -> PredictionResult<Prediction> {
        let body = match image.into() {
            ImageInput::Media(image) => match &image.pixel_data {
                Some(pixels) => encode_jpeg(pixels)?,
                None => {
                    return Err(PredictionError::MissingPixelData { name: image.name });
                }
            },
            ImageInput::Pixels(pixels) => encode_jpeg(&pixels)?,
            ImageInput::Path(path) => tokio::fs::read(&path)
                .await
                .map_err(|source| PredictionError::FileNotFound { path, source })?,
        };

        let response = self
            .session
            .post_jpeg(&format!("{}/predict", self.project_base), body)
            .await?;
        Ok(convert::prediction_from_inference_response(
            response,
            &self.labels,
        )?)
    }
}

/// JPEG-encode pixel data in memory. Alpha channels are dropped first;
/// the JPEG encoder rejects them.
fn encode_jpeg(pixels: &DynamicImage) -> Result<Vec<u8>, image::ImageError> {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(pixels.to_rgb8()).write_to(&mut buffer, ImageFormat::Jpeg)?;
    Ok(buffer.into_inner())
}

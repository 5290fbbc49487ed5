//! Media item models.

use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// Pixel dimensions of a 2D media item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInformation {
    pub width: u32,
    pub height: u32,
}

/// Dimensions and frame layout of a video.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VideoInformation {
    pub width: u32,
    pub height: u32,

    /// Total number of frames in the video
    pub frame_count: u32,

    /// Stride suggested by the server for sampling frames
    pub frame_stride: u32,

    /// Duration in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// An image stored in a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub id: String,
    pub name: String,
    pub media_information: ImageInformation,

    /// Pixel data, present only after an explicit fetch. Never serialized.
    #[serde(skip)]
    pub pixel_data: Option<DynamicImage>,
}

impl Image {
    pub fn new(id: impl Into<String>, name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            media_information: ImageInformation { width, height },
            pixel_data: None,
        }
    }
}

/// A video stored in a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub name: String,
    pub media_information: VideoInformation,
}

/// A single frame of a stored video.
///
/// Frames are not first-class server resources; they are addressed through
/// their parent video and synthesized client-side with [`VideoFrame::from_video`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoFrame {
    pub video_id: String,
    pub name: String,
    pub frame_index: u32,
    pub media_information: ImageInformation,
}

impl VideoFrame {
    /// Synthesize the frame item at `frame_index` of `video`.
    pub fn from_video(video: &Video, frame_index: u32) -> Self {
        Self {
            video_id: video.id.clone(),
            name: format!("{}_frame_{}", video.name, frame_index),
            frame_index,
            media_information: ImageInformation {
                width: video.media_information.width,
                height: video.media_information.height,
            },
        }
    }
}

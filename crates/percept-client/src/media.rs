//! Media item dispatch.

use percept_models::{Image, Video, VideoFrame};

/// A borrowed reference to any media item predictions can be requested for.
///
/// The union is closed: every dispatch point in the pipeline matches
/// exhaustively, so adding a media kind forces every consumer to handle it.
#[derive(Debug, Clone, Copy)]
pub enum MediaItem<'a> {
    Image(&'a Image),
    VideoFrame(&'a VideoFrame),
    Video(&'a Video),
}

impl<'a> MediaItem<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            MediaItem::Image(image) => &image.name,
            MediaItem::VideoFrame(frame) => &frame.name,
            MediaItem::Video(video) => &video.name,
        }
    }

    /// Pixel dimensions, used to rescale legacy normalized payloads.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            MediaItem::Image(image) => {
                (image.media_information.width, image.media_information.height)
            }
            MediaItem::VideoFrame(frame) => {
                (frame.media_information.width, frame.media_information.height)
            }
            MediaItem::Video(video) => {
                (video.media_information.width, video.media_information.height)
            }
        }
    }

    /// Singular noun for log and error messages.
    pub(crate) fn kind_noun(&self) -> &'static str {
        match self {
            MediaItem::Image(_) => "image",
            MediaItem::VideoFrame(_) => "video frame",
            MediaItem::Video(_) => "video",
        }
    }

    /// REST resource path of the item, relative to the session base URL.
    pub(crate) fn resource_path(&self, project_base: &str) -> String {
        match self {
            MediaItem::Image(image) => {
                format!("{project_base}/media/images/{}", image.id)
            }
            MediaItem::Video(video) => {
                format!("{project_base}/media/videos/{}", video.id)
            }
            MediaItem::VideoFrame(frame) => {
                format!(
                    "{project_base}/media/videos/{}/frames/{}",
                    frame.video_id, frame.frame_index
                )
            }
        }
    }
}

impl<'a> From<&'a Image> for MediaItem<'a> {
    fn from(image: &'a Image) -> Self {
        MediaItem::Image(image)
    }
}

impl<'a> From<&'a VideoFrame> for MediaItem<'a> {
    fn from(frame: &'a VideoFrame) -> Self {
        MediaItem::VideoFrame(frame)
    }
}

impl<'a> From<&'a Video> for MediaItem<'a> {
    fn from(video: &'a Video) -> Self {
        MediaItem::Video(video)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use percept_models::{Video, VideoFrame, VideoInformation};

    fn test_video() -> Video {
        Video {
            id: "v7".to_string(),
            name: "dashcam".to_string(),
            media_information: VideoInformation {
                width: 1280,
                height: 720,
                frame_count: 120,
                frame_stride: 12,
                duration: None,
            },
        }
    }

    #[test]
    fn test_image_resource_path() {
        let image = Image::new("i9", "crossing", 640, 480);
        let item = MediaItem::from(&image);
        assert_eq!(
            item.resource_path("workspaces/w1/projects/p1"),
            "workspaces/w1/projects/p1/media/images/i9"
        );
        assert_eq!(item.dimensions(), (640, 480));
    }

    #[test]
    fn test_frame_resource_path() {
        let video = test_video();
        let frame = VideoFrame::from_video(&video, 36);
        let item = MediaItem::from(&frame);
        assert_eq!(
            item.resource_path("workspaces/w1/projects/p1"),
            "workspaces/w1/projects/p1/media/videos/v7/frames/36"
        );
        assert_eq!(item.name(), "dashcam_frame_36");
    }

    #[test]
    fn test_video_resource_path() {
        let video = test_video();
        let item = MediaItem::from(&video);
        assert_eq!(
            item.resource_path("workspaces/w1/projects/p1"),
            "workspaces/w1/projects/p1/media/videos/v7"
        );
        assert_eq!(item.kind_noun(), "video");
    }
}

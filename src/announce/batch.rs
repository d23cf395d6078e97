//! Announcement batch assembly.

use crate::media::ImageAsset;

/// One photo in a media group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    pub asset: ImageAsset,
    pub caption: Option<String>,
}

/// What gets sent for one announcement.
///
/// Either way the caption appears exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnouncementBatch {
    /// Media group; only the first item carries the caption.
    Media(Vec<BatchItem>),
    /// No images available, caption sent as a plain message.
    Text(String),
}

impl AnnouncementBatch {
    pub fn build(images: Vec<ImageAsset>, caption: &str) -> Self {
        if images.is_empty() {
            return Self::Text(caption.to_string());
        }

        let items = images
            .into_iter()
            .enumerate()
            .map(|(i, asset)| BatchItem {
                asset,
                caption: (i == 0).then(|| caption.to_string()),
            })
            .collect();

        Self::Media(items)
    }
}

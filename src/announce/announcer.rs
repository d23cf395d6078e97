//! Announcement dispatch.

use std::sync::Arc;

use teloxide::RequestError;
use teloxide::types::ChatId;
use thiserror::Error;
use tracing::info;

use super::batch::AnnouncementBatch;
use super::sender::AnnouncementSender;
use crate::media::ImageSelector;

/// What was delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    WithImages(usize),
    TextOnly,
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("failed to send announcement to chat {chat_id}: {source}")]
    Transport {
        chat_id: ChatId,
        #[source]
        source: RequestError,
    },
}

/// Selects images and sends the announcement to a chat.
///
/// Every call re-scans the folder and sends a fresh batch; there is no
/// deduplication and no retry.
pub struct Announcer {
    sender: Arc<dyn AnnouncementSender>,
    selector: ImageSelector,
    caption: String,
}

impl Announcer {
    pub fn new(sender: Arc<dyn AnnouncementSender>, selector: ImageSelector, caption: impl Into<String>) -> Self {
        Self {
            sender,
            selector,
            caption: caption.into(),
        }
    }

    pub fn selector(&self) -> &ImageSelector {
        &self.selector
    }

    pub async fn dispatch(&self, chat_id: ChatId) -> Result<Delivery, DispatchError> {
        let images = self.selector.select().await;
        let transport = |source| DispatchError::Transport { chat_id, source };

        match AnnouncementBatch::build(images, &self.caption) {
            AnnouncementBatch::Media(items) => {
                let count = items.len();
                self.sender
                    .send_media_group(chat_id, items)
                    .await
                    .map_err(transport)?;
                info!("Sent announcement with {} image(s) to chat {}", count, chat_id);
                Ok(Delivery::WithImages(count))
            }
            AnnouncementBatch::Text(text) => {
                self.sender.send_text(chat_id, &text).await.map_err(transport)?;
                info!("Sent text-only announcement to chat {}", chat_id);
                Ok(Delivery::TextOnly)
            }
        }
    }
}

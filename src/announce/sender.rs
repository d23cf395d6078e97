//! Outbound transport for announcements.

use async_trait::async_trait;
use teloxide::RequestError;
use teloxide::prelude::*;
use teloxide::types::{InputFile, InputMedia, InputMediaPhoto};

use super::batch::BatchItem;
use crate::bot::dispatcher::ThrottledBot;
use crate::media::MediaKind;

/// Sends announcement payloads to a chat.
#[async_trait]
pub trait AnnouncementSender: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), RequestError>;

    /// Send all items as a single media group.
    async fn send_media_group(&self, chat_id: ChatId, items: Vec<BatchItem>) -> Result<(), RequestError>;
}

#[async_trait]
impl AnnouncementSender for ThrottledBot {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), RequestError> {
        self.send_message(chat_id, text.to_string()).await?;
        Ok(())
    }

    async fn send_media_group(&self, chat_id: ChatId, items: Vec<BatchItem>) -> Result<(), RequestError> {
        let media = items.into_iter().map(to_input_media);
        Requester::send_media_group(self, chat_id, media).await?;
        Ok(())
    }
}

fn to_input_media(item: BatchItem) -> InputMedia {
    match item.asset.kind {
        MediaKind::Photo => {
            let mut photo = InputMediaPhoto::new(InputFile::file(item.asset.path));
            if let Some(caption) = item.caption {
                photo = photo.caption(caption);
            }
            InputMedia::Photo(photo)
        }
    }
}

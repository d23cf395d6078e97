//! Permission checker.
//!
//! Roles are looked up live on every call. Admins get promoted and demoted
//! between commands, so nothing is cached.

use std::sync::Arc;

use async_trait::async_trait;
use teloxide::RequestError;
use teloxide::prelude::*;
use teloxide::types::{ChatId, UserId};
use tracing::debug;

use crate::events::MemberStatus;

/// Source of live membership status.
#[async_trait]
pub trait ChatRoster: Send + Sync {
    async fn member_status(&self, chat_id: ChatId, user_id: UserId) -> Result<MemberStatus, RequestError>;
}

#[async_trait]
impl ChatRoster for Bot {
    async fn member_status(&self, chat_id: ChatId, user_id: UserId) -> Result<MemberStatus, RequestError> {
        let member = self.get_chat_member(chat_id, user_id).await?;
        Ok(member.status().into())
    }
}

/// Permission checker.
#[derive(Clone)]
pub struct Permissions {
    roster: Arc<dyn ChatRoster>,
}

impl Permissions {
    pub fn new(roster: Arc<dyn ChatRoster>) -> Self {
        Self { roster }
    }

    /// Check if a user is an administrator or the owner of the chat.
    pub async fn is_admin(&self, chat_id: ChatId, user_id: UserId) -> anyhow::Result<bool> {
        let status = self.roster.member_status(chat_id, user_id).await?;
        debug!("User {} in chat {} has status {:?}", user_id, chat_id, status);
        Ok(status.is_privileged())
    }
}

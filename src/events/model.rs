//! Membership events decoded from Telegram updates.

use teloxide::types::{ChatId, ChatMemberStatus, ChatMemberUpdated, UserId};
use thiserror::Error;

/// Membership status of a user in a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberStatus {
    Left,
    Kicked,
    Member,
    Administrator,
    Owner,
    Restricted,
}

impl MemberStatus {
    #[cfg(test)]
    pub const ALL: [MemberStatus; 6] = [
        MemberStatus::Left,
        MemberStatus::Kicked,
        MemberStatus::Member,
        MemberStatus::Administrator,
        MemberStatus::Owner,
        MemberStatus::Restricted,
    ];

    /// Administrator or owner of the chat.
    pub fn is_privileged(self) -> bool {
        matches!(self, MemberStatus::Administrator | MemberStatus::Owner)
    }
}

impl From<ChatMemberStatus> for MemberStatus {
    fn from(status: ChatMemberStatus) -> Self {
        match status {
            ChatMemberStatus::Owner => MemberStatus::Owner,
            ChatMemberStatus::Administrator => MemberStatus::Administrator,
            ChatMemberStatus::Member => MemberStatus::Member,
            ChatMemberStatus::Restricted => MemberStatus::Restricted,
            ChatMemberStatus::Left => MemberStatus::Left,
            ChatMemberStatus::Banned => MemberStatus::Kicked,
        }
    }
}

/// A single membership transition for one user in one chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipEvent {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub user_name: String,
    pub is_bot: bool,
    pub old_status: MemberStatus,
    pub new_status: MemberStatus,
}

#[derive(Debug, Error)]
pub enum EventError {
    #[error("member update in chat {chat_id} changes subject from {old} to {new}")]
    SubjectMismatch {
        chat_id: ChatId,
        old: UserId,
        new: UserId,
    },
}

impl TryFrom<&ChatMemberUpdated> for MembershipEvent {
    type Error = EventError;

    fn try_from(update: &ChatMemberUpdated) -> Result<Self, Self::Error> {
        let old = &update.old_chat_member;
        let new = &update.new_chat_member;

        if old.user.id != new.user.id {
            return Err(EventError::SubjectMismatch {
                chat_id: update.chat.id,
                old: old.user.id,
                new: new.user.id,
            });
        }

        Ok(Self {
            chat_id: update.chat.id,
            user_id: new.user.id,
            user_name: new.user.full_name(),
            is_bot: new.user.is_bot,
            old_status: old.status().into(),
            new_status: new.status().into(),
        })
    }
}

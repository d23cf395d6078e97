//! /test_welcome command plugin.
//!
//! Lets a chat administrator fire the welcome announcement by hand.

use teloxide::prelude::*;
use teloxide::types::{ReplyParameters, UserId};
use tracing::{error, info};

use crate::announce::{Announcer, Delivery};
use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::permissions::Permissions;

/// Result of a manual trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    Delivered(Delivery),
    GroupOnly,
    Rejected,
    Failed,
}

/// Check the caller's role and dispatch once if allowed.
pub async fn manual_trigger(
    permissions: &Permissions,
    announcer: &Announcer,
    chat_id: ChatId,
    in_group: bool,
    user_id: UserId,
) -> TriggerOutcome {
    if !in_group {
        return TriggerOutcome::GroupOnly;
    }

    match permissions.is_admin(chat_id, user_id).await {
        Ok(true) => {}
        Ok(false) => {
            info!("User {} is not an admin of chat {}, rejecting /test_welcome", user_id, chat_id);
            return TriggerOutcome::Rejected;
        }
        Err(e) => {
            error!("Failed to check admin status of {} in chat {}: {}", user_id, chat_id, e);
            return TriggerOutcome::Failed;
        }
    }

    match announcer.dispatch(chat_id).await {
        Ok(delivery) => TriggerOutcome::Delivered(delivery),
        Err(e) => {
            error!("Test welcome failed: {}", e);
            TriggerOutcome::Failed
        }
    }
}

/// Handle /test_welcome command.
pub async fn test_welcome_command(bot: ThrottledBot, msg: Message, state: AppState) -> anyhow::Result<()> {
    let user_id = match msg.from.as_ref() {
        Some(user) => user.id,
        None => return Ok(()),
    };
    let in_group = msg.chat.is_group() || msg.chat.is_supergroup();

    let outcome = manual_trigger(&state.permissions, &state.announcer, msg.chat.id, in_group, user_id).await;

    let reply = match outcome {
        TriggerOutcome::Delivered(_) => return Ok(()),
        TriggerOutcome::GroupOnly => "⚠️ This command only works in groups.",
        TriggerOutcome::Rejected => "❌ Only group administrators can use this command.",
        TriggerOutcome::Failed => "⚠️ Could not send the welcome message right now. Please try again later.",
    };

    bot.send_message(msg.chat.id, reply)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::announce::testing::{RecordingSender, Sent};
    use crate::events::MemberStatus;
    use crate::media::ImageSelector;
    use crate::permissions::testing::FixedRoster;

    const CHAT: ChatId = ChatId(-100777);
    const USER: UserId = UserId(11);

    struct Fixture {
        _dir: tempfile::TempDir,
        sender: Arc<RecordingSender>,
        announcer: Announcer,
    }

    fn fixture(sender: RecordingSender) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let sender = Arc::new(sender);
        let announcer = Announcer::new(sender.clone(), ImageSelector::new(dir.path(), 10), "hello");
        Fixture {
            _dir: dir,
            sender,
            announcer,
        }
    }

    fn perms(status: MemberStatus) -> Permissions {
        Permissions::new(Arc::new(FixedRoster::with(CHAT, USER, status)))
    }

    #[tokio::test]
    async fn test_non_admins_never_dispatch() {
        let f = fixture(RecordingSender::default());
        for status in [MemberStatus::Member, MemberStatus::Restricted, MemberStatus::Left] {
            let outcome = manual_trigger(&perms(status), &f.announcer, CHAT, true, USER).await;
            assert_eq!(outcome, TriggerOutcome::Rejected);
        }
        assert!(f.sender.sent().is_empty());
    }

    #[tokio::test]
    async fn test_admin_and_owner_dispatch_exactly_once() {
        for status in [MemberStatus::Administrator, MemberStatus::Owner] {
            let f = fixture(RecordingSender::default());
            let outcome = manual_trigger(&perms(status), &f.announcer, CHAT, true, USER).await;

            assert_eq!(outcome, TriggerOutcome::Delivered(Delivery::TextOnly));
            assert_eq!(f.sender.sent(), vec![Sent::Text(CHAT, "hello".to_string())]);
        }
    }

    #[tokio::test]
    async fn test_private_chat_is_refused_before_lookup() {
        let f = fixture(RecordingSender::default());
        let roster = Arc::new(FixedRoster::with(CHAT, USER, MemberStatus::Owner));
        let perms = Permissions::new(roster.clone());

        let outcome = manual_trigger(&perms, &f.announcer, CHAT, false, USER).await;
        assert_eq!(outcome, TriggerOutcome::GroupOnly);
        assert_eq!(*roster.lookups.lock(), 0);
        assert!(f.sender.sent().is_empty());
    }

    #[tokio::test]
    async fn test_failures_map_to_failed() {
        let f = fixture(RecordingSender::failing());
        let outcome = manual_trigger(&perms(MemberStatus::Owner), &f.announcer, CHAT, true, USER).await;
        assert_eq!(outcome, TriggerOutcome::Failed);

        let f = fixture(RecordingSender::default());
        let unknown = Permissions::new(Arc::new(FixedRoster::default()));
        let outcome = manual_trigger(&unknown, &f.announcer, CHAT, true, USER).await;
        assert_eq!(outcome, TriggerOutcome::Failed);
        assert!(f.sender.sent().is_empty());
    }
}

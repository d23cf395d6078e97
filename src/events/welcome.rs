//! Welcome event handler.
//!
//! Announces new members. Nothing here ever returns an error to the
//! dispatcher: bad updates and queue failures are logged and dropped.

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::ChatMemberUpdated;
use tracing::{debug, error, info, warn};

use super::detector::{JoinDecision, JoinDetector};
use super::model::MembershipEvent;
use crate::announce::{AnnounceQueue, Ticket, Trigger};
use crate::bot::dispatcher::AppState;

/// Returns the handler for chat member updates.
pub fn handler() -> UpdateHandler<anyhow::Error> {
    dptree::endpoint(member_update_handler)
}

async fn member_update_handler(update: ChatMemberUpdated, state: AppState) -> anyhow::Result<()> {
    route_update(&update, &state.detector, &state.queue);
    Ok(())
}

/// Decode a raw member update and route it. Updates that fail to decode are
/// logged and dropped.
fn route_update(update: &ChatMemberUpdated, detector: &JoinDetector, queue: &AnnounceQueue) -> Option<Ticket> {
    match MembershipEvent::try_from(update) {
        Ok(event) => route_event(&event, detector, queue),
        Err(e) => {
            warn!("Ignoring malformed member update: {}", e);
            None
        }
    }
}

/// Decide on an event and queue the announcement if it qualifies.
fn route_event(event: &MembershipEvent, detector: &JoinDetector, queue: &AnnounceQueue) -> Option<Ticket> {
    match detector.evaluate(event) {
        JoinDecision::NotAJoin => {
            debug!(
                "Member {} in chat {}: {:?} -> {:?}, not a join",
                event.user_id, event.chat_id, event.old_status, event.new_status
            );
            None
        }
        JoinDecision::ChatNotAllowed => {
            info!("Chat {} is not in the allow-list, skipping announcement", event.chat_id);
            None
        }
        JoinDecision::BotUser => {
            info!("Bot {} joined chat {}, skipping announcement", event.user_name, event.chat_id);
            None
        }
        JoinDecision::Announce(chat_id) => {
            info!("New member {} ({}) joined chat {}", event.user_name, event.user_id, chat_id);
            match queue.submit(chat_id, Trigger::MemberJoined(event.user_id)) {
                Ok(ticket) => Some(ticket),
                Err(e) => {
                    error!("Could not queue announcement for chat {}: {}", chat_id, e);
                    None
                }
            }
        }
    }
}

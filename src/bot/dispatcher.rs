//! Message dispatcher setup.
//!
//! Builds the dispatcher with all command handlers and event handlers.

use std::sync::Arc;

use teloxide::adaptors::Throttle;
use teloxide::dispatching::{DefaultKey, UpdateHandler};
use teloxide::prelude::*;
use tracing::trace;

use crate::announce::{AnnounceQueue, Announcer};
use crate::events::{self, JoinDetector};
use crate::permissions::Permissions;
use crate::plugins;

/// Bot type with Throttle adaptor for automatic rate limiting.
pub type ThrottledBot = Throttle<Bot>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Sends announcements directly (used by `/test_welcome`).
    pub announcer: Arc<Announcer>,

    /// Background queue for join-triggered announcements.
    pub queue: AnnounceQueue,

    /// Join rule plus allow-list.
    pub detector: Arc<JoinDetector>,

    /// Live admin checks.
    pub permissions: Permissions,
}

impl AppState {
    /// Create a new application state.
    pub fn new(bot: &ThrottledBot, announcer: Arc<Announcer>, queue: AnnounceQueue, detector: JoinDetector) -> Self {
        // Role lookups go straight to the inner Bot.
        let permissions = Permissions::new(Arc::new(bot.inner().clone()));

        Self {
            announcer,
            queue,
            detector: Arc::new(detector),
            permissions,
        }
    }
}

/// Build the dispatcher with all handlers.
pub fn build_dispatcher(bot: ThrottledBot, state: AppState) -> Dispatcher<ThrottledBot, anyhow::Error, DefaultKey> {
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .default_handler(|upd| async move {
            trace!("Unhandled update {:?}", upd.id);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("An error has occurred in the dispatcher"))
        .enable_ctrlc_handler()
        .build()
}

/// Build the handler schema.
fn schema() -> UpdateHandler<anyhow::Error> {
    use teloxide::dispatching::UpdateFilterExt;

    let message_handler = Update::filter_message().branch(plugins::command_handler());

    // Chat member events (welcome new members)
    let member_handler = Update::filter_chat_member().branch(events::event_handler());

    dptree::entry().branch(message_handler).branch(member_handler)
}

//! Bot runtime - Polling and Webhook runners.

use teloxide::dispatching::DefaultKey;
use teloxide::prelude::*;
use teloxide::update_listeners::Polling;
use tracing::info;

use super::dispatcher::ThrottledBot;
use super::status::ListenerStatus;
use super::webhook;
use crate::config::{BotMode, Config};

/// Run the bot with the configured mode until it is stopped (Ctrl+C).
pub async fn run(
    config: &Config,
    bot: ThrottledBot,
    mut dispatcher: Dispatcher<ThrottledBot, anyhow::Error, DefaultKey>,
    status: &ListenerStatus,
) -> anyhow::Result<()> {
    let result = match config.bot_mode {
        BotMode::Polling => {
            info!("Starting bot in polling mode...");
            // Updates queued while the bot was offline are dropped.
            let listener = Polling::builder(bot).drop_pending_updates().build();
            status.mark_running();
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("Error from the update listener"),
                )
                .await;
            Ok(())
        }
        BotMode::Webhook => {
            info!("Starting bot in webhook mode...");
            webhook::start_webhook(config, dispatcher, bot, status).await
        }
    };

    status.mark_stopped();
    info!("Update listener stopped");
    result
}

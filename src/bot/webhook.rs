//! Webhook mode implementation for the bot.
//!
//! Uses teloxide's built-in axum webhook support to:
//! - Automatically call `setWebhook` on Telegram
//! - Spawn an axum HTTP server to receive updates
//! - Automatically call `deleteWebhook` on shutdown

use std::net::SocketAddr;

use anyhow::Context;
use teloxide::dispatching::DefaultKey;
use teloxide::prelude::*;
use teloxide::types::AllowedUpdate;
use teloxide::update_listeners::webhooks::{self, Options};
use tracing::info;

use super::dispatcher::ThrottledBot;
use super::status::ListenerStatus;
use crate::config::{Config, ConfigError};

/// Update kinds the bot handles. Telegram only sends `chat_member`
/// updates when asked for them explicitly.
const ALLOWED_UPDATES: [AllowedUpdate; 2] = [AllowedUpdate::Message, AllowedUpdate::ChatMember];

/// Start the bot in webhook mode.
///
/// On shutdown (Ctrl+C), the webhook is automatically deleted.
pub async fn start_webhook(
    config: &Config,
    mut dispatcher: Dispatcher<ThrottledBot, anyhow::Error, DefaultKey>,
    bot: ThrottledBot,
    status: &ListenerStatus,
) -> anyhow::Result<()> {
    let url = config.webhook_url.clone().ok_or(ConfigError::MissingWebhookUrl)?;

    // Server address - listen on all interfaces at the configured port
    let address = SocketAddr::from(([0, 0, 0, 0], config.webhook_port));

    let mut options = Options::new(address, url.clone()).drop_pending_updates();

    if let Some(ref secret) = config.webhook_secret {
        options = options.secret_token(secret.clone());
        info!("Webhook secret token configured");
    }

    // The listener's own setWebhook call keeps whatever allowed_updates
    // were registered last, so register them first.
    bot.inner()
        .set_webhook(url.clone())
        .allowed_updates(ALLOWED_UPDATES)
        .await
        .context("failed to register allowed updates")?;

    info!("🔗 Setting webhook URL: {}", url);
    info!("📡 Listening on: {}", address);

    let listener = webhooks::axum(bot.inner().clone(), options)
        .await
        .context("failed to set up webhook")?;

    info!("✅ Webhook setup complete, waiting for updates...");
    status.mark_running();

    let error_handler = LoggingErrorHandler::with_custom_text("Error from update listener");

    dispatcher
        .dispatch_with_listener(listener, error_handler)
        .await;

    Ok(())
}

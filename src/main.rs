//! Joinbell - Telegram welcome bot
//!
//! Greets new group members with a random set of photos and a caption.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `media` - Image folder scanning and random selection
//! - `events` - Membership decoding and join detection
//! - `announce` - Batch assembly, sending, background queue
//! - `permissions` - Live admin checks
//! - `bot` - Dispatcher and runtime (with Throttle for API rate limiting)
//! - `plugins` - Command handlers
//! - `api` - Optional admin HTTP surface

mod announce;
mod api;
mod bot;
mod config;
mod events;
mod media;
mod permissions;
mod plugins;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use teloxide::adaptors::throttle::Limits;
use teloxide::prelude::*;
use tokio::sync::oneshot;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use announce::{AnnounceQueue, Announcer, DEFAULT_QUEUE_CAPACITY};
use api::ApiState;
use bot::{AppState, ListenerStatus};
use config::Config;
use events::JoinDetector;
use media::ImageSelector;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("joinbell=info,teloxide=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Joinbell bot...");

    // Configuration errors are fatal: nothing starts listening.
    let config = Config::from_env().context("invalid configuration")?;
    info!("Configuration loaded successfully");
    info!("Bot mode: {:?}", config.bot_mode);

    if config.allowed_chat_ids.is_empty() {
        info!("No ALLOWED_CHAT_IDS configured, announcing in every chat");
    } else {
        info!("Announcements limited to {} chat(s)", config.allowed_chat_ids.len());
    }

    prepare_images_folder(&config.images_folder).await?;
    let selector = ImageSelector::new(&config.images_folder, config.max_images);
    let image_count = selector.list_names().await.names.len();
    if image_count == 0 {
        warn!(
            "No images in {}, only text messages will be sent",
            config.images_folder.display()
        );
    } else {
        info!(
            "Found {} image(s) in {}, sending up to {} per announcement",
            image_count,
            config.images_folder.display(),
            config.max_images
        );
    }

    // Initialize bot with Throttle for automatic rate limiting
    let bot = Bot::new(&config.bot_token).throttle(Limits::default());
    info!("Bot initialized with rate limiting (Throttle)");

    let me = bot.get_me().await.context("failed to reach Telegram (is the token valid?)")?;
    info!("Bot username: @{}", me.username());

    let announcer = Arc::new(Announcer::new(
        Arc::new(bot.clone()),
        selector,
        config.welcome_message.clone(),
    ));

    let (queue, jobs) = AnnounceQueue::new(DEFAULT_QUEUE_CAPACITY);
    let worker = announce::spawn_worker(announcer.clone(), jobs);

    let status = ListenerStatus::default();

    let admin_api = config.admin_addr.map(|addr| {
        let state = ApiState {
            announcer: announcer.clone(),
            queue: queue.clone(),
            status: status.clone(),
            api_token: config.admin_api_token.as_deref().map(Arc::from),
        };
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let shutdown = async move {
                stop_rx.await.ok();
            };
            if let Err(e) = api::serve(addr, state, shutdown).await {
                error!("Admin API failed: {:#}", e);
            }
        });
        (stop_tx, handle)
    });

    let detector = JoinDetector::new(config.allowed_chat_ids.clone());
    let state = AppState::new(&bot, announcer, queue, detector);
    let dispatcher = bot::build_dispatcher(bot.clone(), state);

    let result = bot::run(&config, bot, dispatcher, &status).await;

    if let Some((stop_tx, handle)) = admin_api {
        stop_tx.send(()).ok();
        handle.await.ok();
    }

    // Every queue handle is gone now; let pending announcements finish.
    worker.await?;
    info!("Joinbell stopped");

    result
}

/// Create the image folder if it does not exist yet.
async fn prepare_images_folder(folder: &Path) -> anyhow::Result<()> {
    if tokio::fs::try_exists(folder).await.unwrap_or(false) {
        return Ok(());
    }

    tokio::fs::create_dir_all(folder)
        .await
        .with_context(|| format!("failed to create image folder {}", folder.display()))?;
    info!("Created image folder: {}", folder.display());

    Ok(())
}

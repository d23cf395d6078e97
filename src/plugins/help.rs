//! /help command plugin.

use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::bot::dispatcher::{AppState, ThrottledBot};
use crate::media::IMAGE_EXTENSIONS;

/// Handle /help command.
pub async fn help_handler(bot: ThrottledBot, msg: Message, state: AppState) -> anyhow::Result<()> {
    bot.send_message(msg.chat.id, help_text(state.announcer.selector().max_images()))
        .parse_mode(ParseMode::Html)
        .await?;

    Ok(())
}

fn help_text(max_images: usize) -> String {
    format!(
        "<b>🤖 Welcome bot</b>\n\n\
        <b>📋 What it does</b>\n\
        • Sends a welcome message when a new user joins the group\n\
        • The message carries a random selection of photos and a caption\n\n\
        <b>🎯 Setup</b>\n\
        1. Add the bot to your group\n\
        2. Make the bot an administrator\n\
        3. New members trigger the welcome message automatically\n\n\
        <b>⚙️ Commands</b>\n\
        /start - Start the bot\n\
        /help - Show this help\n\
        /test_welcome - Send a test welcome message (group admins only)\n\n\
        <b>📁 Images</b>\n\
        • Supported formats: {}\n\
        • Up to {} photos per message",
        IMAGE_EXTENSIONS.join(", "),
        max_images
    )
}

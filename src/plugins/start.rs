//! /start command plugin.

use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::bot::dispatcher::{AppState, ThrottledBot};

const START_TEXT: &str = "<b>Hi!</b> 👋\n\n\
I greet new members of your group with a photo set and a welcome message.\n\n\
<b>Features:</b>\n\
• Detects users joining the group\n\
• Sends a random set of welcome photos\n\n\
<b>Commands:</b>\n\
/help - Show help\n\
/test_welcome - Preview the welcome message";

/// Handle the /start command.
pub async fn start_handler(bot: ThrottledBot, msg: Message, _state: AppState) -> anyhow::Result<()> {
    bot.send_message(msg.chat.id, START_TEXT)
        .parse_mode(ParseMode::Html)
        .await?;

    Ok(())
}

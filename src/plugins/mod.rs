//! Plugin system for command handlers.
//!
//! Add new plugins by:
//! 1. Creating a new file in this directory
//! 2. Adding `pub mod your_plugin;` below
//! 3. Adding the handler to `command_handler()`

pub mod help;
pub mod start;
pub mod test_welcome;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::bot::dispatcher::{AppState, ThrottledBot};

/// All bot commands.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "snake_case", description = "Available commands:")]
pub enum Command {
    #[command(description = "Start the bot")]
    Start(String),

    #[command(description = "Show help")]
    Help,

    #[command(description = "Send a test welcome message (admins only)")]
    TestWelcome,
}

/// Build the combined command handler.
pub fn command_handler() -> UpdateHandler<anyhow::Error> {
    use dptree::case;

    teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start(args)].endpoint(handle_start))
        .branch(case![Command::Help].endpoint(help::help_handler))
        .branch(case![Command::TestWelcome].endpoint(test_welcome::test_welcome_command))
}

/// Handle /start; deep-link payloads are ignored.
async fn handle_start(bot: ThrottledBot, msg: Message, state: AppState, _args: String) -> anyhow::Result<()> {
    start::start_handler(bot, msg, state).await
}

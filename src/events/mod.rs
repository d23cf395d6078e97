//! Event handler system.
//!
//! Chat member updates are decoded into [`MembershipEvent`] at the boundary,
//! run through the [`JoinDetector`], and handed to the announcement queue.

pub mod detector;
pub mod model;
pub mod welcome;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

pub use detector::JoinDetector;
pub use model::MemberStatus;

/// Build the combined event handler for chat member updates.
pub fn event_handler() -> UpdateHandler<anyhow::Error> {
    dptree::entry().branch(welcome::handler())
}

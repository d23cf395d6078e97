//! Bot module - Core bot functionality.

pub mod dispatcher;
mod runtime;
pub mod status;
mod webhook;

pub use dispatcher::{AppState, build_dispatcher};
pub use runtime::run;
pub use status::ListenerStatus;

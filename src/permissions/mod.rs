//! Permission system for checking user roles.
//!
//! Used to gate `/test_welcome` to chat administrators and the owner.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let perms = Permissions::new(Arc::new(bot.inner().clone()));
//!
//! if perms.is_admin(chat_id, user_id).await? {
//!     // ...
//! }
//! ```

mod checker;

pub use checker::Permissions;

#[cfg(test)]
pub(crate) use checker::testing;

//! Announcement media.
//!
//! Images live in a plain folder managed by operators. Nothing is cached:
//! the folder is re-scanned on every announcement, so files added or removed
//! between sends are picked up immediately.

mod selector;

pub use selector::{IMAGE_EXTENSIONS, ImageAsset, ImageSelector, MediaKind};

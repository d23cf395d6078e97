//! Listener liveness flag shared with the admin HTTP surface.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

/// Whether the update listener is currently running.
#[derive(Clone, Default)]
pub struct ListenerStatus {
    running: Arc<AtomicBool>,
    started_at: Arc<RwLock<Option<DateTime<Utc>>>>,
}

impl ListenerStatus {
    pub fn mark_running(&self) {
        *self.started_at.write() = Some(Utc::now());
        self.running.store(true, Ordering::SeqCst);
    }

    pub fn mark_stopped(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// When the listener last started.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        *self.started_at.read()
    }
}

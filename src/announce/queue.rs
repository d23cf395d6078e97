//! Background announcement queue.
//!
//! Callers that must not wait for Telegram (member joins, the HTTP trigger)
//! submit a job and get a [`Ticket`] back immediately. A single worker task
//! performs the sends; completion and failure are only logged.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use teloxide::types::{ChatId, UserId};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use super::announcer::Announcer;

/// Default number of jobs that may wait for the worker.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Why an announcement was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    MemberJoined(UserId),
    Admin,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::MemberJoined(user_id) => write!(f, "join of user {user_id}"),
            Trigger::Admin => f.write_str("admin request"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnounceJob {
    pub id: u64,
    pub chat_id: ChatId,
    pub trigger: Trigger,
}

/// Acknowledgement that a job was accepted (not that it was sent).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub job_id: u64,
    pub chat_id: ChatId,
}

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("announcement queue is full")]
    Full,
    #[error("announcement worker has stopped")]
    Closed,
}

/// Submission handle for the announcement worker.
#[derive(Clone)]
pub struct AnnounceQueue {
    tx: mpsc::Sender<AnnounceJob>,
    next_id: Arc<AtomicU64>,
}

impl AnnounceQueue {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<AnnounceJob>) {
        let (tx, rx) = mpsc::channel(capacity);
        let queue = Self {
            tx,
            next_id: Arc::new(AtomicU64::new(1)),
        };
        (queue, rx)
    }

    /// Enqueue an announcement without waiting for it.
    pub fn submit(&self, chat_id: ChatId, trigger: Trigger) -> Result<Ticket, QueueError> {
        let job_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let job = AnnounceJob {
            id: job_id,
            chat_id,
            trigger,
        };

        self.tx.try_send(job).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => QueueError::Full,
            mpsc::error::TrySendError::Closed(_) => QueueError::Closed,
        })?;

        Ok(Ticket { job_id, chat_id })
    }
}

/// Spawn the worker. It exits once every [`AnnounceQueue`] handle is dropped.
pub fn spawn_worker(announcer: Arc<Announcer>, rx: mpsc::Receiver<AnnounceJob>) -> JoinHandle<()> {
    tokio::spawn(run_worker(announcer, rx))
}

async fn run_worker(announcer: Arc<Announcer>, mut rx: mpsc::Receiver<AnnounceJob>) {
    while let Some(job) = rx.recv().await {
        match announcer.dispatch(job.chat_id).await {
            Ok(delivery) => info!(
                "Job {} ({}) delivered to chat {}: {:?}",
                job.id, job.trigger, job.chat_id, delivery
            ),
            Err(e) => error!("Job {} ({}) failed: {}", job.id, job.trigger, e),
        }
    }
    info!("Announcement worker stopped");
}

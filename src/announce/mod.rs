//! Announcement pipeline: batch assembly, sending, and the background queue.

mod announcer;
mod batch;
mod queue;
mod sender;

pub use announcer::{Announcer, Delivery};
pub use queue::{AnnounceJob, AnnounceQueue, DEFAULT_QUEUE_CAPACITY, QueueError, Ticket, Trigger, spawn_worker};

#[cfg(test)]
pub(crate) use announcer::testing;

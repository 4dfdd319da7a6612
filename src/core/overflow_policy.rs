//! Queueing behaviour of the per-level channels
//!
//! By default every level's queue is a rendezvous channel: a producer hands
//! its message straight to the dispatch thread and blocks until the thread
//! is ready to take it. A bounded buffer with an overflow policy can be
//! configured instead.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a producer does when a buffered level queue is full.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverflowPolicy {
    /// Block until the dispatch thread makes room
    #[default]
    Block,

    /// Discard the message being logged
    DropNewest,

    /// Evict the oldest queued message of that level, then enqueue
    DropOldest,
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::Block => write!(f, "Block"),
            OverflowPolicy::DropNewest => write!(f, "DropNewest"),
            OverflowPolicy::DropOldest => write!(f, "DropOldest"),
        }
    }
}

/// Capacity and overflow behaviour shared by all level queues.
///
/// # Example
///
/// ```
/// use leveled_logger::{OverflowPolicy, QueueMode};
///
/// // Default: unbuffered hand-off, producers wait for the dispatch thread
/// assert_eq!(QueueMode::default(), QueueMode::Rendezvous);
///
/// let mode = QueueMode::Buffered { capacity: 256, overflow: OverflowPolicy::DropOldest };
/// assert_eq!(mode.capacity(), 256);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueueMode {
    /// Zero-capacity channel; every enqueue waits for the dispatch thread
    #[default]
    Rendezvous,

    /// Bounded buffer per level
    Buffered {
        capacity: usize,
        #[serde(default)]
        overflow: OverflowPolicy,
    },
}

impl QueueMode {
    pub fn capacity(&self) -> usize {
        match self {
            QueueMode::Rendezvous => 0,
            QueueMode::Buffered { capacity, .. } => *capacity,
        }
    }

    /// Overflow handling in effect; a rendezvous queue always blocks.
    pub fn overflow(&self) -> OverflowPolicy {
        match self {
            QueueMode::Rendezvous => OverflowPolicy::Block,
            QueueMode::Buffered { overflow, .. } => *overflow,
        }
    }
}

// Queue Error Types

use std::fmt;
use thiserror::Error;

/// Construction errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    #[error("Queue capacity must be positive")]
    ZeroCapacity,
}

/// Push failures hand the rejected item back to the caller
///
/// A plain `push` on an open queue never fails; it waits.
#[derive(Error, PartialEq, Eq)]
pub enum PushError<T> {
    #[error("Queue is closed")]
    Closed(T),

    #[error("Queue is full")]
    Full(T),

    #[error("Timed out waiting for a free slot")]
    Timeout(T),
}

impl<T> PushError<T> {
    /// Recover the item that was not enqueued
    pub fn into_inner(self) -> T {
        match self {
            PushError::Closed(item) | PushError::Full(item) | PushError::Timeout(item) => item,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, PushError::Closed(_))
    }
}

// Manual impl so the item type does not need to be Debug
impl<T> fmt::Debug for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PushError::Closed(_) => f.write_str("Closed(..)"),
            PushError::Full(_) => f.write_str("Full(..)"),
            PushError::Timeout(_) => f.write_str("Timeout(..)"),
        }
    }
}

/// Pop failures
///
/// A plain `pop` on an open queue never fails; it waits.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopError {
    /// Queue was closed and is drained, or was aborted
    #[error("Queue is closed")]
    Closed,

    #[error("Queue is empty")]
    Empty,

    #[error("Timed out waiting for an item")]
    Timeout,
}

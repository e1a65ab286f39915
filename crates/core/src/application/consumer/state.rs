// Consumer state, readable from other threads

use serde::Serialize;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Consumer lifecycle
///
/// `Waiting` -> `Processing` -> `Waiting` ... -> `Stopped`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsumerState {
    /// Blocked in (or about to call) pop
    Waiting,
    /// Running the order handler
    Processing,
    /// Queue closed; the loop has exited
    Stopped,
}

impl std::fmt::Display for ConsumerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsumerState::Waiting => write!(f, "WAITING"),
            ConsumerState::Processing => write!(f, "PROCESSING"),
            ConsumerState::Stopped => write!(f, "STOPPED"),
        }
    }
}

impl ConsumerState {
    fn to_u8(self) -> u8 {
        match self {
            ConsumerState::Waiting => 0,
            ConsumerState::Processing => 1,
            ConsumerState::Stopped => 2,
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => ConsumerState::Waiting,
            1 => ConsumerState::Processing,
            _ => ConsumerState::Stopped,
        }
    }
}

/// Shared handle to a consumer's current state
#[derive(Debug, Clone)]
pub struct ConsumerStateCell(Arc<AtomicU8>);

impl ConsumerStateCell {
    pub fn new() -> Self {
        Self(Arc::new(AtomicU8::new(ConsumerState::Waiting.to_u8())))
    }

    pub fn get(&self) -> ConsumerState {
        ConsumerState::from_u8(self.0.load(Ordering::Acquire))
    }

    pub(super) fn set(&self, state: ConsumerState) {
        self.0.store(state.to_u8(), Ordering::Release);
    }
}

impl Default for ConsumerStateCell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_waiting() {
        assert_eq!(ConsumerStateCell::new().get(), ConsumerState::Waiting);
    }

    #[test]
    fn test_clones_share_state() {
        let cell = ConsumerStateCell::new();
        let observer = cell.clone();

        cell.set(ConsumerState::Processing);
        assert_eq!(observer.get(), ConsumerState::Processing);
        cell.set(ConsumerState::Stopped);
        assert_eq!(observer.get(), ConsumerState::Stopped);
    }
}

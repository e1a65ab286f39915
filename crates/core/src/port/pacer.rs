// Pacer Port - simulated work and rest delays
//
// Menu times are expressed in minutes; the pacer decides how long a
// "minute" lasts on the wall clock and how the calling thread waits it out.

use std::time::Duration;

/// Thread-local delay provider
pub trait Pacer: Send + Sync {
    /// Wall-clock length of `minutes` menu minutes
    fn minutes(&self, minutes: u32) -> Duration;

    /// Block the calling thread for `duration`
    fn pause(&self, duration: Duration);
}

/// Real sleeping pacer (production)
pub struct ThreadSleepPacer {
    minute: Duration,
}

impl ThreadSleepPacer {
    pub fn new(minute: Duration) -> Self {
        Self { minute }
    }
}

impl Default for ThreadSleepPacer {
    fn default() -> Self {
        Self::new(crate::application::constants::DEFAULT_MINUTE)
    }
}

impl Pacer for ThreadSleepPacer {
    fn minutes(&self, minutes: u32) -> Duration {
        self.minute.saturating_mul(minutes)
    }

    fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use parking_lot::Mutex;

    /// Records every pause; optionally sleeps a fixed short time instead
    pub struct RecordingPacer {
        minute: Duration,
        real_delay: Option<Duration>,
        pauses: Mutex<Vec<Duration>>,
    }

    impl RecordingPacer {
        /// One menu minute = 1ms, pauses return immediately
        pub fn new() -> Self {
            Self {
                minute: Duration::from_millis(1),
                real_delay: None,
                pauses: Mutex::new(Vec::new()),
            }
        }

        /// Every pause sleeps `delay` regardless of the requested duration
        pub fn with_delay(delay: Duration) -> Self {
            Self {
                real_delay: Some(delay),
                ..Self::new()
            }
        }

        pub fn pauses(&self) -> Vec<Duration> {
            self.pauses.lock().clone()
        }
    }

    impl Default for RecordingPacer {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Pacer for RecordingPacer {
        fn minutes(&self, minutes: u32) -> Duration {
            self.minute.saturating_mul(minutes)
        }

        fn pause(&self, duration: Duration) {
            self.pauses.lock().push(duration);
            if let Some(delay) = self.real_delay {
                std::thread::sleep(delay);
            }
        }
    }
}

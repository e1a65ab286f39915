// Priority Source Port - how clients pick an order's priority

use crate::domain::{DomainError, Priority};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

/// Supplies a priority for each new order
pub trait PrioritySource: Send + Sync {
    fn next_priority(&self) -> Priority;
}

/// Uniformly random priority in an inclusive range (production)
pub struct RandomPriority {
    range: RangeInclusive<Priority>,
    rng: Mutex<StdRng>,
}

impl RandomPriority {
    /// Seed from OS entropy
    pub fn new(range: RangeInclusive<Priority>) -> Result<Self, DomainError> {
        Self::with_rng(range, StdRng::from_entropy())
    }

    /// Reproducible sequence for a given seed
    pub fn seeded(range: RangeInclusive<Priority>, seed: u64) -> Result<Self, DomainError> {
        Self::with_rng(range, StdRng::seed_from_u64(seed))
    }

    fn with_rng(range: RangeInclusive<Priority>, rng: StdRng) -> Result<Self, DomainError> {
        if range.is_empty() {
            return Err(DomainError::ValidationError(format!(
                "empty priority range {}..={}",
                range.start(),
                range.end()
            )));
        }
        Ok(Self {
            range,
            rng: Mutex::new(rng),
        })
    }

    pub fn range(&self) -> &RangeInclusive<Priority> {
        &self.range
    }
}

impl PrioritySource for RandomPriority {
    fn next_priority(&self) -> Priority {
        self.rng.lock().gen_range(self.range.clone())
    }
}

pub mod mocks {
    use super::*;
    use std::collections::VecDeque;

    /// Every order gets the same priority
    pub struct FixedPriority(pub Priority);

    impl PrioritySource for FixedPriority {
        fn next_priority(&self) -> Priority {
            self.0
        }
    }

    /// Hands out a scripted list, then repeats the fallback
    pub struct ScriptedPriority {
        script: Mutex<VecDeque<Priority>>,
        fallback: Priority,
    }

    impl ScriptedPriority {
        pub fn new(script: impl IntoIterator<Item = Priority>, fallback: Priority) -> Self {
            Self {
                script: Mutex::new(script.into_iter().collect()),
                fallback,
            }
        }
    }

    impl PrioritySource for ScriptedPriority {
        fn next_priority(&self) -> Priority {
            self.script.lock().pop_front().unwrap_or(self.fallback)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mocks::ScriptedPriority;
    use super::*;

    #[test]
    fn test_random_priority_stays_in_range() {
        let source = RandomPriority::seeded(1..=5, 42).unwrap();
        for _ in 0..1000 {
            let priority = source.next_priority();
            assert!((1..=5).contains(&priority), "priority {} out of range", priority);
        }
    }

    #[test]
    fn test_random_priority_is_reproducible() {
        let a = RandomPriority::seeded(1..=5, 7).unwrap();
        let b = RandomPriority::seeded(1..=5, 7).unwrap();

        let xs: Vec<_> = (0..20).map(|_| a.next_priority()).collect();
        let ys: Vec<_> = (0..20).map(|_| b.next_priority()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_empty_range_rejected() {
        #[allow(clippy::reversed_empty_ranges)]
        let result = RandomPriority::new(5..=1);
        assert!(result.is_err());
    }

    #[test]
    fn test_scripted_priority_falls_back() {
        let source = ScriptedPriority::new([3, 1], 9);
        assert_eq!(source.next_priority(), 3);
        assert_eq!(source.next_priority(), 1);
        assert_eq!(source.next_priority(), 9);
    }
}

// Order Handler Port - what a consumer does with a dequeued order

use super::Pacer;
use crate::domain::{ConsumerId, WorkItem};
use std::sync::Arc;
use tracing::info;

/// Processing step run by a consumer for every popped item
///
/// Called outside the queue lock. A panic is contained by the consumer.
pub trait OrderHandler: Send + Sync {
    fn handle(&self, consumer_id: ConsumerId, item: &WorkItem);
}

/// Prepares the order by pausing for its work duration (production)
pub struct SimulatedPreparation {
    pacer: Arc<dyn Pacer>,
}

impl SimulatedPreparation {
    pub fn new(pacer: Arc<dyn Pacer>) -> Self {
        Self { pacer }
    }
}

impl OrderHandler for SimulatedPreparation {
    fn handle(&self, consumer_id: ConsumerId, item: &WorkItem) {
        info!(
            server = consumer_id,
            client = item.producer_id(),
            item_id = item.item_id(),
            priority = item.priority(),
            "Preparing order"
        );
        self.pacer.pause(item.work_duration());
        info!(
            server = consumer_id,
            client = item.producer_id(),
            item_id = item.item_id(),
            "Delivered order"
        );
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::domain::ItemId;
    use parking_lot::Mutex;
    use std::time::Duration;

    /// Records handled orders in the order they were processed
    pub struct RecordingHandler {
        handled: Mutex<Vec<(ConsumerId, WorkItem)>>,
        delay: Duration,
    }

    impl RecordingHandler {
        pub fn new() -> Self {
            Self::with_delay(Duration::ZERO)
        }

        /// Sleep `delay` per order to keep consumers busy
        pub fn with_delay(delay: Duration) -> Self {
            Self {
                handled: Mutex::new(Vec::new()),
                delay,
            }
        }

        pub fn handled(&self) -> Vec<(ConsumerId, WorkItem)> {
            self.handled.lock().clone()
        }

        pub fn handled_items(&self) -> Vec<WorkItem> {
            self.handled.lock().iter().map(|(_, item)| item.clone()).collect()
        }
    }

    impl Default for RecordingHandler {
        fn default() -> Self {
            Self::new()
        }
    }

    impl OrderHandler for RecordingHandler {
        fn handle(&self, consumer_id: ConsumerId, item: &WorkItem) {
            self.handled.lock().push((consumer_id, item.clone()));
            if !self.delay.is_zero() {
                std::thread::sleep(self.delay);
            }
        }
    }

    /// Panics on one specific menu item, records the rest
    pub struct PanickingHandler {
        pub poison_item: ItemId,
        pub inner: RecordingHandler,
    }

    impl PanickingHandler {
        pub fn new(poison_item: ItemId) -> Self {
            Self {
                poison_item,
                inner: RecordingHandler::new(),
            }
        }
    }

    impl OrderHandler for PanickingHandler {
        fn handle(&self, consumer_id: ConsumerId, item: &WorkItem) {
            if item.item_id() == self.poison_item {
                panic!("kitchen fire on item {}", item.item_id());
            }
            self.inner.handle(consumer_id, item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::pacer::mocks::RecordingPacer;
    use std::time::Duration;

    #[test]
    fn test_simulated_preparation_pauses_for_work_duration() {
        let pacer = Arc::new(RecordingPacer::new());
        let handler = SimulatedPreparation::new(pacer.clone());
        let item = WorkItem::new("t", 1, 2, Duration::from_millis(30), 1, 0);

        handler.handle(1, &item);
        assert_eq!(pacer.pauses(), vec![Duration::from_millis(30)]);
    }
}

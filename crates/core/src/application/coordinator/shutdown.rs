// Kitchen Shutdown Handle

use crate::application::producer::OrderQueue;
use crate::domain::WorkItem;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// How to stop the servers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShutdownMode {
    /// Refuse new orders, serve everything already queued
    Drain,
    /// Refuse new orders and drop the queued ones (they are reported, not lost)
    Abort,
}

/// Stop signal for a running kitchen
///
/// Cheap to clone; every clone controls the same queue.
#[derive(Clone)]
pub struct StopHandle {
    queue: Arc<OrderQueue>,
    abandoned: Arc<Mutex<Vec<WorkItem>>>,
}

impl StopHandle {
    pub(super) fn new(queue: Arc<OrderQueue>, abandoned: Arc<Mutex<Vec<WorkItem>>>) -> Self {
        Self { queue, abandoned }
    }

    /// Signal shutdown to all clients and servers
    pub fn stop(&self, mode: ShutdownMode) {
        info!(mode = ?mode, "Kitchen stop requested");
        match mode {
            ShutdownMode::Drain => self.queue.close(),
            ShutdownMode::Abort => {
                // Held across abort: the run cannot collect leftovers before they are recorded
                let mut abandoned = self.abandoned.lock();
                let dropped = self.queue.abort();
                for item in &dropped {
                    warn!(
                        ticket = %item.ticket(),
                        client = item.producer_id(),
                        item_id = item.item_id(),
                        priority = item.priority(),
                        "Order abandoned"
                    );
                }
                abandoned.extend(dropped);
            }
        }
    }

    /// Orders dropped by an abort and not yet collected by the run
    pub fn abandoned(&self) -> Vec<WorkItem> {
        self.abandoned.lock().clone()
    }

    /// Check if shutdown was requested
    pub fn is_stopped(&self) -> bool {
        self.queue.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle() -> (StopHandle, Arc<OrderQueue>, Arc<Mutex<Vec<WorkItem>>>) {
        let queue = Arc::new(OrderQueue::with_capacity(4).unwrap());
        let abandoned = Arc::new(Mutex::new(Vec::new()));
        (StopHandle::new(queue.clone(), abandoned.clone()), queue, abandoned)
    }

    #[test]
    fn test_drain_keeps_queued_orders() {
        let (stop, queue, abandoned) = handle();
        queue.push(WorkItem::new_test(1, 1, 1)).unwrap();

        stop.stop(ShutdownMode::Drain);
        assert!(stop.is_stopped());
        assert_eq!(queue.len(), 1);
        assert!(abandoned.lock().is_empty());
    }

    #[test]
    fn test_abort_records_abandoned_orders() {
        let (stop, queue, abandoned) = handle();
        queue.push(WorkItem::new_test(1, 1, 4)).unwrap();
        queue.push(WorkItem::new_test(2, 1, 2)).unwrap();

        stop.clone().stop(ShutdownMode::Abort);
        assert!(queue.is_empty());

        let priorities: Vec<_> = abandoned.lock().iter().map(|i| i.priority()).collect();
        assert_eq!(priorities, vec![2, 4]);
        assert_eq!(stop.abandoned().len(), 2);
    }

    #[test]
    fn test_leftovers_recorded_before_collector_sees_abort() {
        let (stop, queue, abandoned) = handle();
        for priority in 1..=3 {
            queue.push(WorkItem::new_test(priority as u32, 1, priority)).unwrap();
        }

        // Collects the leftovers as soon as it observes the abort, like a finishing run
        let collector = {
            let queue = queue.clone();
            let abandoned = abandoned.clone();
            std::thread::spawn(move || {
                while !queue.is_closed() {
                    std::thread::yield_now();
                }
                std::mem::take(&mut *abandoned.lock())
            })
        };

        stop.stop(ShutdownMode::Abort);
        let collected = collector.join().unwrap();

        assert_eq!(collected.len(), 3, "every dropped order reaches the collector");
        assert!(stop.abandoned().is_empty());
    }
}

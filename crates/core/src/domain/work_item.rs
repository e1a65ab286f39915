// Work Item Domain Model

use serde::Serialize;
use std::time::Duration;

/// Producer (client) identifier
pub type ProducerId = u32;

/// Consumer (server) identifier
pub type ConsumerId = u32;

/// Menu item identifier (opaque to the queue)
pub type ItemId = u32;

/// Priority (lower number = higher priority)
pub type Priority = i32;

/// Order ticket (UUID v4 in production)
pub type Ticket = String;

/// A single order travelling from a producer to a consumer.
///
/// Fields are private: a work item cannot change once it has been built,
/// so the priority the queue ordered it by is the priority it keeps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct WorkItem {
    ticket: Ticket,
    producer_id: ProducerId,
    item_id: ItemId,
    work_duration: Duration,
    priority: Priority,
    submitted_at: i64, // epoch ms
}

impl WorkItem {
    /// Create a new work item
    ///
    /// # Arguments
    ///
    /// * `ticket` - Unique order ticket (injected, not generated)
    /// * `producer_id` - Submitting client
    /// * `item_id` - Ordered menu item
    /// * `work_duration` - Simulated preparation time
    /// * `priority` - Rank, lower is served first
    /// * `submitted_at` - Submission timestamp in epoch ms (injected, not system time)
    pub fn new(
        ticket: impl Into<String>,
        producer_id: ProducerId,
        item_id: ItemId,
        work_duration: Duration,
        priority: Priority,
        submitted_at: i64,
    ) -> Self {
        Self {
            ticket: ticket.into(),
            producer_id,
            item_id,
            work_duration,
            priority,
            submitted_at,
        }
    }

    /// Create a test item with deterministic ticket and timestamp.
    ///
    /// Tickets are `test-1`, `test-2`, ... and timestamps step by 1000.
    /// Work duration is zero.
    ///
    /// **Note**: This method should only be used in tests. Production code
    /// injects tickets and time via providers.
    pub fn new_test(producer_id: ProducerId, item_id: ItemId, priority: Priority) -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(1);

        let counter = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        Self::new(
            format!("test-{}", counter),
            producer_id,
            item_id,
            Duration::ZERO,
            priority,
            (counter * 1000) as i64,
        )
    }

    pub fn ticket(&self) -> &str {
        &self.ticket
    }

    pub fn producer_id(&self) -> ProducerId {
        self.producer_id
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn work_duration(&self) -> Duration {
        self.work_duration
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn submitted_at(&self) -> i64 {
        self.submitted_at
    }
}

impl crate::queue::Prioritized for WorkItem {
    fn priority(&self) -> Priority {
        self.priority
    }
}

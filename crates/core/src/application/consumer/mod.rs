// Consumer - server loop draining the order queue

mod panic_guard;
mod state;

pub use panic_guard::{execute_guarded, PanicGuardResult};
pub use state::{ConsumerState, ConsumerStateCell};

use super::producer::OrderQueue;
use crate::domain::{ConsumerId, Ticket};
use crate::port::OrderHandler;
use serde::Serialize;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{error, info};

/// What one server did before it stopped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsumerReport {
    pub consumer_id: ConsumerId,
    /// Orders the handler completed
    pub processed: usize,
    /// Tickets whose handler panicked
    pub failed: Vec<Ticket>,
}

/// Server role: pop, process, repeat until the queue is closed
pub struct Consumer {
    id: ConsumerId,
    queue: Arc<OrderQueue>,
    handler: Arc<dyn OrderHandler>,
    state: ConsumerStateCell,
}

impl Consumer {
    pub fn new(id: ConsumerId, queue: Arc<OrderQueue>, handler: Arc<dyn OrderHandler>) -> Self {
        Self {
            id,
            queue,
            handler,
            state: ConsumerStateCell::new(),
        }
    }

    pub fn id(&self) -> ConsumerId {
        self.id
    }

    /// Observer for the current loop state
    pub fn state(&self) -> ConsumerStateCell {
        self.state.clone()
    }

    /// Run the server loop on the calling thread.
    ///
    /// Returns once the queue is closed and drained, or aborted. A closed
    /// queue is the only way out; the loop never abandons an order it
    /// already popped.
    pub fn run(&self) -> ConsumerReport {
        info!(server = self.id, "Server started");
        let mut report = ConsumerReport {
            consumer_id: self.id,
            ..Default::default()
        };

        loop {
            self.state.set(ConsumerState::Waiting);
            let item = match self.queue.pop() {
                Ok(item) => item,
                // pop only fails once the queue is closed
                Err(reason) => {
                    info!(server = self.id, %reason, "Server leaving");
                    break;
                }
            };

            self.state.set(ConsumerState::Processing);
            let outcome = execute_guarded(AssertUnwindSafe(|| self.handler.handle(self.id, &item)));
            match outcome {
                PanicGuardResult::Success(()) => report.processed += 1,
                PanicGuardResult::Panicked(msg) => {
                    error!(
                        server = self.id,
                        ticket = %item.ticket(),
                        panic_msg = %msg,
                        "Order failed, server continues"
                    );
                    report.failed.push(item.ticket().to_string());
                }
            }
        }

        self.state.set(ConsumerState::Stopped);
        info!(
            server = self.id,
            processed = report.processed,
            failed = report.failed.len(),
            "Server stopped"
        );
        report
    }
}

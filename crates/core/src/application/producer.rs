// Producer - a client placing one order

use crate::domain::{DomainError, ItemId, MenuItem, Priority, ProducerId, Ticket, WorkItem};
use crate::error::{AppError, Result};
use crate::port::{Catalog, IdProvider, Pacer, PrioritySource, TimeProvider};
use crate::queue::BoundedPriorityQueue;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// The shared order queue
pub type OrderQueue = BoundedPriorityQueue<WorkItem>;

/// Proof that an order made it into the queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderReceipt {
    pub ticket: Ticket,
    pub producer_id: ProducerId,
    pub item_id: ItemId,
    pub priority: Priority,
}

/// Client role: look up the dish, queue the order, then eat
pub struct Producer {
    id: ProducerId,
    queue: Arc<OrderQueue>,
    catalog: Arc<dyn Catalog>,
    priorities: Arc<dyn PrioritySource>,
    pacer: Arc<dyn Pacer>,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
}

impl Producer {
    pub fn new(
        id: ProducerId,
        queue: Arc<OrderQueue>,
        catalog: Arc<dyn Catalog>,
        priorities: Arc<dyn PrioritySource>,
        pacer: Arc<dyn Pacer>,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            id,
            queue,
            catalog,
            priorities,
            pacer,
            id_provider,
            time_provider,
        }
    }

    pub fn id(&self) -> ProducerId {
        self.id
    }

    /// Queue an order for `item_id` without the eating delay.
    ///
    /// Blocks while the queue is full.
    ///
    /// # Errors
    /// - `DomainError::UnknownItem` if the menu has no such item (nothing is queued)
    /// - `AppError::QueueClosed` if the kitchen stopped taking orders
    pub fn submit(&self, item_id: ItemId) -> Result<OrderReceipt> {
        self.enqueue(item_id).map(|(receipt, _)| receipt)
    }

    /// Queue an order, then spend the dish's eating time.
    ///
    /// The eating delay has no effect on the queue and cannot be interrupted.
    pub fn place_order(&self, item_id: ItemId) -> Result<OrderReceipt> {
        let (receipt, dish) = self.enqueue(item_id)?;

        self.pacer.pause(self.pacer.minutes(dish.eat_minutes));
        info!(client = self.id, item_id, "Client finished eating");

        Ok(receipt)
    }

    fn enqueue(&self, item_id: ItemId) -> Result<(OrderReceipt, MenuItem)> {
        let dish = match self.catalog.lookup(item_id) {
            Some(dish) => dish,
            None => {
                warn!(client = self.id, item_id, "Client chose an invalid menu item");
                return Err(DomainError::UnknownItem(item_id).into());
            }
        };

        let priority = self.priorities.next_priority();
        let item = WorkItem::new(
            self.id_provider.generate_id(),
            self.id,
            dish.id,
            self.pacer.minutes(dish.prep_minutes),
            priority,
            self.time_provider.now_millis(),
        );
        let receipt = OrderReceipt {
            ticket: item.ticket().to_string(),
            producer_id: self.id,
            item_id: dish.id,
            priority,
        };

        if let Err(rejected) = self.queue.push(item) {
            warn!(
                client = self.id,
                ticket = %receipt.ticket,
                reason = %rejected,
                "Order not accepted"
            );
            return Err(AppError::QueueClosed);
        }

        info!(
            client = self.id,
            item_id = dish.id,
            dish = %dish.name,
            priority,
            ticket = %receipt.ticket,
            "Client placed an order"
        );
        Ok((receipt, dish))
    }
}

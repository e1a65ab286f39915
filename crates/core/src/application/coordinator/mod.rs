// Coordinator - owns the client and server thread pools

mod shutdown;

pub use shutdown::{ShutdownMode, StopHandle};

use super::config::KitchenConfig;
use super::constants::{CLIENT_THREAD_PREFIX, PRIORITY_RANGE, SERVER_THREAD_PREFIX};
use super::consumer::{Consumer, ConsumerReport};
use super::producer::{OrderQueue, OrderReceipt, Producer};
use crate::domain::{ItemId, Menu, ProducerId, WorkItem};
use crate::error::{AppError, Result};
use crate::port::id_provider::UuidProvider;
use crate::port::time_provider::SystemTimeProvider;
use crate::port::{
    Catalog, IdProvider, OrderHandler, Pacer, PrioritySource, RandomPriority,
    SimulatedPreparation, TimeProvider,
};
use crate::queue::{QueueStats, QueueStatus};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{error, info, warn};

/// Collaborators shared by every client and server (DI wiring)
#[derive(Clone)]
pub struct KitchenDeps {
    pub catalog: Arc<dyn Catalog>,
    pub priorities: Arc<dyn PrioritySource>,
    pub pacer: Arc<dyn Pacer>,
    pub handler: Arc<dyn OrderHandler>,
    pub id_provider: Arc<dyn IdProvider>,
    pub time_provider: Arc<dyn TimeProvider>,
}

impl KitchenDeps {
    /// Production wiring: random priorities, UUID tickets, wall clock,
    /// servers that prepare orders by pausing on `pacer`
    pub fn production(menu: Arc<Menu>, pacer: Arc<dyn Pacer>, seed: Option<u64>) -> Result<Self> {
        let priorities = match seed {
            Some(seed) => RandomPriority::seeded(PRIORITY_RANGE, seed)?,
            None => RandomPriority::new(PRIORITY_RANGE)?,
        };

        Ok(Self {
            catalog: menu,
            priorities: Arc::new(priorities),
            handler: Arc::new(SimulatedPreparation::new(pacer.clone())),
            pacer,
            id_provider: Arc::new(UuidProvider),
            time_provider: Arc::new(SystemTimeProvider),
        })
    }
}

/// An order that never reached the queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub producer_id: ProducerId,
    pub item_id: ItemId,
    pub reason: String,
}

/// Outcome of one kitchen run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub receipts: Vec<OrderReceipt>,
    pub rejected: Vec<Rejection>,
    pub consumers: Vec<ConsumerReport>,
    /// Orders dropped from the queue by an abort
    pub abandoned: Vec<WorkItem>,
    pub stats: QueueStats,
    pub aborted: bool,
}

impl RunSummary {
    /// Orders served successfully across all servers
    pub fn total_processed(&self) -> usize {
        self.consumers.iter().map(|c| c.processed).sum()
    }

    /// Orders whose handler panicked
    pub fn total_failed(&self) -> usize {
        self.consumers.iter().map(|c| c.failed.len()).sum()
    }
}

/// Starts servers, then clients, against one shared queue; waits for the
/// clients; then stops the servers cooperatively.
pub struct Coordinator {
    config: KitchenConfig,
    deps: KitchenDeps,
    queue: Arc<OrderQueue>,
    abandoned: Arc<Mutex<Vec<WorkItem>>>,
}

impl Coordinator {
    pub fn new(config: KitchenConfig, deps: KitchenDeps) -> Result<Self> {
        config.validate()?;
        let queue = Arc::new(OrderQueue::new(config.queue_capacity()?));

        Ok(Self {
            config,
            deps,
            queue,
            abandoned: Arc::new(Mutex::new(Vec::new())),
        })
    }

    pub fn config(&self) -> &KitchenConfig {
        &self.config
    }

    /// The shared queue (for observation)
    pub fn queue(&self) -> Arc<OrderQueue> {
        Arc::clone(&self.queue)
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle::new(Arc::clone(&self.queue), Arc::clone(&self.abandoned))
    }

    /// Run the kitchen: client `i` (1-based) orders `orders[i - 1]`.
    ///
    /// A coordinator runs once; its queue is closed afterwards.
    pub fn run(&self, orders: Vec<ItemId>) -> Result<RunSummary> {
        if orders.len() != self.config.producers {
            return Err(AppError::Config(format!(
                "expected {} orders (one per client), got {}",
                self.config.producers,
                orders.len()
            )));
        }
        if self.queue.is_closed() {
            return Err(AppError::QueueClosed);
        }

        info!(
            clients = self.config.producers,
            servers = self.config.consumers,
            capacity = self.config.capacity,
            "Kitchen opening"
        );

        let servers = match self.spawn_servers() {
            Ok(servers) => servers,
            Err(e) => {
                error!(error = %e, "Failed to start servers");
                return Err(e);
            }
        };

        let clients = match self.spawn_clients(orders) {
            Ok(clients) => clients,
            Err(e) => {
                error!(error = %e, "Failed to start clients, aborting");
                self.stop_handle().stop(ShutdownMode::Abort);
                if let Err(join_err) = join_servers(servers) {
                    warn!(error = %join_err, "Servers did not stop cleanly");
                }
                return Err(e);
            }
        };

        let (receipts, rejected) = join_clients(clients);
        info!(
            placed = receipts.len(),
            rejected = rejected.len(),
            "All clients finished"
        );

        // No more orders will come: let the servers drain and leave
        self.queue.close();
        let consumers = join_servers(servers)?;

        let summary = RunSummary {
            receipts,
            rejected,
            consumers,
            abandoned: std::mem::take(&mut *self.abandoned.lock()),
            stats: self.queue.stats(),
            aborted: self.queue.status() == QueueStatus::Aborted,
        };

        info!(
            processed = summary.total_processed(),
            failed = summary.total_failed(),
            abandoned = summary.abandoned.len(),
            "Kitchen closed"
        );
        Ok(summary)
    }

    fn spawn_servers(&self) -> Result<Vec<JoinHandle<ConsumerReport>>> {
        let mut servers = Vec::with_capacity(self.config.consumers);
        for index in 0..self.config.consumers {
            let id = (index + 1) as u32;
            let consumer = Consumer::new(id, Arc::clone(&self.queue), Arc::clone(&self.deps.handler));

            let spawned = thread::Builder::new()
                .name(format!("{}-{}", SERVER_THREAD_PREFIX, id))
                .spawn(move || consumer.run());

            match spawned {
                Ok(handle) => servers.push(handle),
                Err(e) => {
                    // Release the ones already waiting on the queue
                    self.queue.abort();
                    if let Err(join_err) = join_servers(servers) {
                        warn!(error = %join_err, "Servers did not stop cleanly");
                    }
                    return Err(AppError::Io(e));
                }
            }
        }
        Ok(servers)
    }

    fn spawn_clients(&self, orders: Vec<ItemId>) -> Result<Vec<ClientThread>> {
        let mut clients = Vec::with_capacity(orders.len());
        for (index, item_id) in orders.into_iter().enumerate() {
            let id = (index + 1) as ProducerId;
            let producer = Producer::new(
                id,
                Arc::clone(&self.queue),
                Arc::clone(&self.deps.catalog),
                Arc::clone(&self.deps.priorities),
                Arc::clone(&self.deps.pacer),
                Arc::clone(&self.deps.id_provider),
                Arc::clone(&self.deps.time_provider),
            );

            let handle = thread::Builder::new()
                .name(format!("{}-{}", CLIENT_THREAD_PREFIX, id))
                .spawn(move || producer.place_order(item_id))?;

            clients.push(ClientThread {
                producer_id: id,
                item_id,
                handle,
            });
        }
        Ok(clients)
    }
}

struct ClientThread {
    producer_id: ProducerId,
    item_id: ItemId,
    handle: JoinHandle<Result<OrderReceipt>>,
}

fn join_clients(clients: Vec<ClientThread>) -> (Vec<OrderReceipt>, Vec<Rejection>) {
    let mut receipts = Vec::new();
    let mut rejected = Vec::new();

    for client in clients {
        let reason = match client.handle.join() {
            Ok(Ok(receipt)) => {
                receipts.push(receipt);
                continue;
            }
            Ok(Err(e)) => e.to_string(),
            Err(_) => {
                warn!(client = client.producer_id, "Client thread panicked");
                "client thread panicked".to_string()
            }
        };
        rejected.push(Rejection {
            producer_id: client.producer_id,
            item_id: client.item_id,
            reason,
        });
    }
    (receipts, rejected)
}

fn join_servers(servers: Vec<JoinHandle<ConsumerReport>>) -> Result<Vec<ConsumerReport>> {
    let mut reports = Vec::with_capacity(servers.len());
    let mut panicked = 0;
    for server in servers {
        match server.join() {
            Ok(report) => reports.push(report),
            Err(_) => panicked += 1,
        }
    }
    if panicked > 0 {
        return Err(AppError::Internal(format!("{} server thread(s) panicked", panicked)));
    }
    Ok(reports)
}

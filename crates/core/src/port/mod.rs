// Port Layer - Interfaces for external collaborators

pub mod catalog;
pub mod id_provider; // For deterministic testing
pub mod order_handler;
pub mod pacer;
pub mod priority_source;
pub mod time_provider;

// Re-exports
pub use catalog::Catalog;
pub use id_provider::IdProvider;
pub use order_handler::{OrderHandler, SimulatedPreparation};
pub use pacer::{Pacer, ThreadSleepPacer};
pub use priority_source::{PrioritySource, RandomPriority};
pub use time_provider::TimeProvider;

// Application Layer - Client/server roles and their coordination

pub mod config;
pub mod constants;
pub mod consumer;
pub mod coordinator;
pub mod producer;

// Re-exports
pub use config::KitchenConfig;
pub use consumer::{Consumer, ConsumerReport, ConsumerState};
pub use coordinator::{Coordinator, KitchenDeps, RunSummary, ShutdownMode, StopHandle};
pub use producer::{OrderQueue, OrderReceipt, Producer};

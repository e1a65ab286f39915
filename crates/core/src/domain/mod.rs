// Domain Layer - Pure business entities

pub mod error;
pub mod menu;
pub mod work_item;

// Re-exports
pub use error::DomainError;
pub use menu::{Menu, MenuItem};
pub use work_item::{ConsumerId, ItemId, Priority, ProducerId, Ticket, WorkItem};

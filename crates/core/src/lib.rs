// Brigade Core - Bounded priority queue, domain & roles
// NO async runtime, NO file IO (composition root lives in the kitchen crate)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;
pub mod queue;

pub use error::{AppError, Result};
pub use queue::{BoundedPriorityQueue, PopError, Prioritized, PushError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

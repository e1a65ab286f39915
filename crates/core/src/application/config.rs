// Kitchen configuration

use super::constants::{DEFAULT_CAPACITY, DEFAULT_CLIENTS, DEFAULT_SERVERS};
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Sizes of the queue and of both thread pools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitchenConfig {
    /// Order queue capacity
    pub capacity: usize,
    /// Number of client (producer) threads, one order each
    pub producers: usize,
    /// Number of server (consumer) threads
    pub consumers: usize,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            producers: DEFAULT_CLIENTS,
            consumers: DEFAULT_SERVERS,
        }
    }
}

impl KitchenConfig {
    pub fn new(capacity: usize, producers: usize, consumers: usize) -> Self {
        Self {
            capacity,
            producers,
            consumers,
        }
    }

    /// All three sizes must be positive
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(AppError::Config("queue capacity must be at least 1".to_string()));
        }
        if self.producers == 0 {
            return Err(AppError::Config("need at least 1 client".to_string()));
        }
        if self.consumers == 0 {
            return Err(AppError::Config("need at least 1 server".to_string()));
        }
        Ok(())
    }

    pub fn queue_capacity(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.capacity)
            .ok_or_else(|| AppError::Config("queue capacity must be at least 1".to_string()))
    }
}

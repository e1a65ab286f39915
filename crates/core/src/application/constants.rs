// Kitchen constants (No magic values)
use crate::domain::Priority;
use std::ops::RangeInclusive;
use std::time::Duration;

/// Most urgent priority a client can draw
pub const HIGHEST_PRIORITY: Priority = 1;

/// Least urgent priority a client can draw
pub const LOWEST_PRIORITY: Priority = 5;

/// Inclusive range clients draw order priorities from
pub const PRIORITY_RANGE: RangeInclusive<Priority> = HIGHEST_PRIORITY..=LOWEST_PRIORITY;

/// Wall-clock length of one menu minute (1s)
pub const DEFAULT_MINUTE: Duration = Duration::from_secs(1);

/// Default number of clients (producers)
pub const DEFAULT_CLIENTS: usize = 5;

/// Default number of servers (consumers)
pub const DEFAULT_SERVERS: usize = 2;

/// Default order queue capacity
pub const DEFAULT_CAPACITY: usize = 3;

/// Thread name prefix for clients
pub const CLIENT_THREAD_PREFIX: &str = "client";

/// Thread name prefix for servers
pub const SERVER_THREAD_PREFIX: &str = "server";

/// How long the binary waits for threads after an abort (5 seconds)
pub const GRACEFUL_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

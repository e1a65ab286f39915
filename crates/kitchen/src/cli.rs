//! Command-line configuration
//!
//! Every option can also come from a `BRIGADE_*` environment variable.

use anyhow::{bail, Result};
use brigade_core::application::constants::{DEFAULT_CAPACITY, DEFAULT_CLIENTS, DEFAULT_SERVERS};
use brigade_core::application::KitchenConfig;
use brigade_core::domain::{ItemId, Menu};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human readable, colored
    Pretty,
    /// One JSON object per line
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "brigade")]
#[command(about = "Restaurant kitchen: clients order, servers cook, highest priority first", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Menu file (.json, or plain text lines "<id> <name> <prep min> <eat min>")
    #[arg(long, env = "BRIGADE_MENU")]
    pub menu: PathBuf,

    /// Number of clients; each places one order
    #[arg(long, env = "BRIGADE_CLIENTS", default_value_t = DEFAULT_CLIENTS)]
    pub clients: usize,

    /// Number of servers preparing orders
    #[arg(long, env = "BRIGADE_SERVERS", default_value_t = DEFAULT_SERVERS)]
    pub servers: usize,

    /// Order queue capacity
    #[arg(long, env = "BRIGADE_CAPACITY", default_value_t = DEFAULT_CAPACITY)]
    pub capacity: usize,

    /// Menu item ordered by each client, in client order (repeat once per client).
    /// Without it every client picks a random dish.
    #[arg(long = "order", value_name = "ITEM_ID")]
    pub orders: Vec<ItemId>,

    /// Wall-clock milliseconds per menu minute
    #[arg(long, env = "BRIGADE_MINUTE_MS", default_value_t = 1000)]
    pub minute_ms: u64,

    /// Seed for priorities and random dishes (reproducible runs)
    #[arg(long, env = "BRIGADE_SEED")]
    pub seed: Option<u64>,

    /// Log output format
    #[arg(long, env = "BRIGADE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl Cli {
    pub fn kitchen_config(&self) -> KitchenConfig {
        KitchenConfig::new(self.capacity, self.clients, self.servers)
    }

    pub fn minute(&self) -> Duration {
        Duration::from_millis(self.minute_ms)
    }

    /// One dish per client: the explicit `--order` list, or random picks.
    ///
    /// Explicit ids are not checked against the menu; a client ordering
    /// something that does not exist is reported as a rejected order.
    pub fn resolve_orders(&self, menu: &Menu) -> Result<Vec<ItemId>> {
        if !self.orders.is_empty() {
            if self.orders.len() != self.clients {
                bail!(
                    "{} --order values given for {} clients",
                    self.orders.len(),
                    self.clients
                );
            }
            return Ok(self.orders.clone());
        }

        if menu.is_empty() {
            bail!("menu is empty, nothing to order");
        }

        // Different stream than the priority generator seeded with the same value
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_entropy(),
        };
        let ids: Vec<ItemId> = menu.ids().collect();
        Ok((0..self.clients)
            .filter_map(|_| ids.choose(&mut rng).copied())
            .collect())
    }
}

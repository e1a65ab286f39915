//! Brigade - Main Entry Point
//! Loads the menu, starts servers and clients, prints what happened.

mod cli;
mod menu_loader;
mod report;

use anyhow::{Context, Result};
use brigade_core::application::constants::GRACEFUL_SHUTDOWN_TIMEOUT;
use brigade_core::application::{Coordinator, KitchenDeps, ShutdownMode};
use brigade_core::port::ThreadSleepPacer;
use clap::Parser;
use cli::{Cli, LogFormat};
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Initialize logging (stderr, so the tables on stdout stay clean)
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("brigade=info,brigade_core=info"))
        .context("Failed to create env filter")?;

    match cli.log_format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_thread_names(true).with_writer(std::io::stderr))
                .init();
        }
    }

    info!("Brigade v{} starting...", VERSION);

    // 2. Load the menu
    let menu = menu_loader::load(&cli.menu)
        .with_context(|| format!("Failed to load menu from {}", cli.menu.display()))?;
    println!("{}", report::menu_table(&menu));

    // 3. Setup dependencies (DI wiring)
    let orders = cli.resolve_orders(&menu)?;
    let menu = Arc::new(menu);
    let pacer = Arc::new(ThreadSleepPacer::new(cli.minute()));
    let deps = KitchenDeps::production(menu, pacer, cli.seed)?;
    let coordinator = Coordinator::new(cli.kitchen_config(), deps)?;
    let stop = coordinator.stop_handle();
    let queue = coordinator.queue();

    // 4. Run the kitchen on its own OS thread; the runtime only watches for Ctrl+C
    let (done_tx, mut done_rx) = oneshot::channel();
    std::thread::Builder::new()
        .name("kitchen".to_string())
        .spawn(move || {
            let _ = done_tx.send(coordinator.run(orders));
        })
        .context("Failed to start kitchen thread")?;

    let outcome = tokio::select! {
        outcome = &mut done_rx => outcome,
        _ = tokio::signal::ctrl_c() => {
            warn!("Shutdown signal received. Aborting open orders...");
            stop.stop(ShutdownMode::Abort);

            match tokio::time::timeout(GRACEFUL_SHUTDOWN_TIMEOUT, done_rx).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    // Clients still eating; report what is known before leaving
                    let stats = queue.stats();
                    let abandoned = stop.abandoned();
                    warn!(
                        placed = stats.pushed,
                        taken_by_servers = stats.popped,
                        abandoned = abandoned.len(),
                        "Kitchen did not finish in time"
                    );
                    print!("{}", report::abandoned_lines(&abandoned));
                    anyhow::bail!(
                        "kitchen threads still busy after {:?}, exiting",
                        GRACEFUL_SHUTDOWN_TIMEOUT
                    )
                }
            }
        }
    };

    let summary = outcome.context("Kitchen thread exited without a result")??;
    println!("{}", report::summary_tables(&summary));

    info!("Restaurant is closed.");
    Ok(())
}

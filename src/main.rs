//! Chaos Harness
//!
//! A fault-injection service for exercising monitoring pipelines.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌────────────────────────────────────────────────────┐
//!                     │                   CHAOS HARNESS                     │
//!                     │                                                     │
//!   GET /             │  ┌──────────┐   snapshot   ┌─────────────┐          │
//!   ──────────────────┼─▶│   http   │─────────────▶│ state store │◀── file  │
//!                     │  │ handlers │              └──────▲──────┘  watcher │
//!   GET /break        │  │          │   trigger           │                 │
//!   GET /breakManual  │  │          │──────────▶ ┌────────┴──────┐          │
//!   ──────────────────┼─▶│          │            │   triggers    │          │
//!                     │  │          │            └────────▲──────┘          │
//!   GET /addcron      │  │          │   start/stop        │ every interval  │
//!   GET /removecron   │  │          │──────────▶ ┌────────┴──────┐          │
//!   ──────────────────┼─▶│          │            │ chaos job     │          │
//!                     │  └────┬─────┘            └───────────────┘          │
//!                     │       │ bad flag                                    │
//!                     │       ▼                                             │
//!                     │  ┌──────────┐   POST {type, from, timestamp}        │
//!                     │  │ reporter │───────────────────────────────────────┼──▶ collector
//!                     │  └──────────┘                                       │
//!                     └────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use chaos_harness::config::load_config;
use chaos_harness::lifecycle::{self, Shutdown};
use chaos_harness::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "chaos-harness")]
#[command(about = "Fault-injection service for exercising monitoring pipelines", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    logging::init_logging(&config.observability);
    tracing::info!("chaos-harness v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        state_file = %config.store.path,
        collector = %config.reporter.collector_url,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let shutdown = Shutdown::new();
    let harness = lifecycle::prepare(config, &shutdown).await?;
    shutdown.trigger_on_signal();

    harness.run(&shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

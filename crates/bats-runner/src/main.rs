//! # bats-runner
//!
//! Main entry point for the PITCH feed handler.
//!
//! Loads a JSON configuration file, creates a feed module for each configured
//! feed, and manages their lifecycle.
//!
//! # Usage
//!
//! ```bash
//! bats-runner config.json --log-level info
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

/// BATS PITCH Market Data Feed Runner.
#[derive(Parser)]
#[command(name = "bats-runner", about = "BATS PITCH Market Data Feed Runner")]
struct Cli {
    /// Configuration file path (JSON).
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Optional log directory for file output.
    #[arg(long)]
    log_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load configuration first so the log path can come from it.
    let config = bats_core::config::load_config(&cli.config)?;

    // 2. Initialize logging — exactly once, before any module is built.
    let log_dir = cli.log_dir.clone().or_else(|| config.log_path());
    bats_core::logging::init_logging(&cli.log_level, log_dir.as_deref(), &config.module_name());

    info!(
        "bats-runner starting — config={}, log_level={}",
        cli.config.display(),
        cli.log_level,
    );
    info!("config loaded — {} feed(s)", config.feeds.len());

    // 3. Create feed modules from the feeds array.
    let mut modules: Vec<Box<dyn bats_md::FeedModule>> = Vec::new();

    for (idx, feed_config) in config.feeds.iter().enumerate() {
        match bats_md::registry::create_feed_module(feed_config) {
            Ok(module) => {
                info!(
                    "feed[{idx}]: created module '{}' (source={})",
                    module.name(),
                    feed_config.source,
                );
                modules.push(module);
            }
            Err(e) => {
                error!(
                    "feed[{idx}]: failed to create module for '{}': {e}",
                    feed_config.source,
                );
            }
        }
    }

    // Start all modules. A feed that fails to start is logged and skipped,
    // like a feed that fails to build.
    for module in &mut modules {
        match module.start().await {
            Ok(()) => info!("module '{}' started", module.name()),
            Err(e) => error!("failed to start '{}': {e}", module.name()),
        }
    }

    info!("all {} module(s) started — press Ctrl+C to stop", modules.len());

    // 4. Wait for shutdown signal.
    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");

    // 5. Stop all modules.
    for module in &mut modules {
        info!("stopping module '{}'", module.name());
        if let Err(e) = module.stop().await {
            error!("error stopping '{}': {e}", module.name());
        }
    }

    info!("all modules stopped — goodbye");
    Ok(())
}

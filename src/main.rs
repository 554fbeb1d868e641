//! Main entry point for the qqwry CLI tool

use anyhow::Context;
use clap::Parser;
use log::info;

use qqwry::cli::Cli;
use qqwry::config::AppConfig;

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {}, using defaults", e);
        let mut config = AppConfig::default();
        config.apply_env();
        config
    });

    // Initialize logging, RUST_LOG wins over --verbose and the config file
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.log_level(&config)),
    )
    .init();

    info!("Starting qqwry v{}", env!("CARGO_PKG_VERSION"));

    // Execute CLI logic
    cli.run(config).context("qqwry failed")?;

    Ok(())
}

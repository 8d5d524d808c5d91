// crates/folio-cli/src/main.rs
//
// CLI entrypoint for the Folio citation ledger.
//
// Replays operation logs against a ledger and inspects the ledger persisted
// under the configured data directory.

mod commands;
mod config;
mod output;

use clap::{Parser, Subcommand};
use commands::lineage::LineageCmd;
use commands::period::PeriodCmd;
use commands::replay::ReplayCmd;
use config::FolioConfig;
use output::OutputFormat;

/// Folio: citation ledger tools.
#[derive(Parser, Debug)]
#[command(
    name = "folio",
    version = "0.1.0",
    about = "Folio citation ledger: authorship, citations, reputation and revenue shares"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = "~/.folio/config.toml")]
    config: String,

    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply a JSON-lines operation log.
    Replay(ReplayCmd),

    /// List registered authors.
    Authors,

    /// Show who an author cites and is cited by.
    Lineage(LineageCmd),

    /// Show the shares of a distribution period.
    Period(PeriodCmd),

    /// Display ledger counters and the state digest.
    Stats,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Config is read before logging starts so log_level can seed the filter;
    // the outcome is logged once the subscriber is installed.
    let loaded = FolioConfig::load(&cli.config);
    let config = match &loaded {
        Ok(cfg) => cfg.clone(),
        Err(_) => FolioConfig::default(),
    };

    // Initialize tracing subscriber for structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match &loaded {
        Ok(_) => tracing::info!("Loaded configuration from {}", cli.config),
        Err(e) => tracing::warn!(
            "Could not load config from {}: {}. Using defaults.",
            cli.config,
            e
        ),
    }

    let format = OutputFormat::from_flag(cli.json);
    match &cli.command {
        Commands::Replay(cmd) => commands::replay::run(cmd, &config, format)?,
        Commands::Authors => commands::authors::run(&config, format)?,
        Commands::Lineage(cmd) => commands::lineage::run(cmd, &config, format)?,
        Commands::Period(cmd) => commands::period::run(cmd, &config, format)?,
        Commands::Stats => commands::stats::run(&config, format)?,
    }

    Ok(())
}

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pageflow_core::EnhanceConfig;

mod commands;

#[derive(Parser)]
#[command(name = "pageflow")]
#[command(author, version, about = "Replay scroll-driven page scenarios against the page coordinator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of ~/.config/pageflow/config.toml
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scenario file and report the final page state
    Replay {
        /// Path to the scenario TOML
        scenario: PathBuf,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
        /// Pace steps against the wall clock
        #[arg(long)]
        realtime: bool,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => EnhanceConfig::load_from(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EnhanceConfig::load()?,
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Replay {
            scenario,
            json,
            realtime,
        } => commands::replay::run(&scenario, config, json, realtime).await,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Init { force } => commands::config::init(force),
        },
    }
}

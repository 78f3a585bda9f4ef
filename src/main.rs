//! Task-list API server
//!
//! A REST API for managing tasks and goals, with best-effort chat notices
//! when a task is marked complete.

use anyhow::Result;
use clap::Parser;
use std::fs::OpenOptions;
use std::sync::Arc;
use tasklist_api::api::{self, ApiServer};
use tasklist_api::cli::{Cli, Command};
use tasklist_api::config::Config;
use tasklist_api::db::Database;
use tasklist_api::notify::Notifier;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    // Environment first, CLI flags on top
    let mut config = Config::from_env();
    config.db_path = cli.database.clone();
    config.port = cli.port;

    match cli.command {
        Some(Command::Serve) | None => run_server(config).await?,
    }

    Ok(())
}

/// Run the API server
async fn run_server(config: Config) -> Result<()> {
    info!(
        "Starting task-list API server v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!("Database: {:?}", config.db_path);

    let db = Database::open(&config.db_path)?;
    let db = Arc::new(db);

    info!("Database initialized successfully");

    let notifier = Notifier::from_config(&config.notify).map(Arc::new);
    if notifier.is_none() {
        info!("Completion notices disabled (no SLACK_API_TOKEN set)");
    }

    let state = ApiServer::new(db, notifier);
    api::serve(state, config.port).await
}

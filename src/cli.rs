//! CLI definitions for the task-list API server.
//!
//! This module defines the CLI structure using clap's derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{DEFAULT_DB_PATH, DEFAULT_PORT};

/// Task-list API server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the SQLite database file
    #[arg(short, long, env = "TASKLIST_DB", default_value = DEFAULT_DB_PATH)]
    pub database: PathBuf,

    /// Port for the API server
    #[arg(short, long, env = "TASKLIST_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2")]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the API server (default if no subcommand given)
    Serve,
}

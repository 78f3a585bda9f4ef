//! Process configuration.
//!
//! Defaults are overridden by environment variables, which are in turn
//! overridden by CLI flags (applied in `main`). The database path and port
//! are env-backed CLI arguments; the chat credential and channel come from
//! the environment only.

use std::path::PathBuf;

use crate::notify::NotifyConfig;

/// Default database file, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "tasklist.db";

/// Default port for the API server.
pub const DEFAULT_PORT: u16 = 3131;

/// Environment variable carrying the chat bearer token.
const SLACK_TOKEN_VAR: &str = "SLACK_API_TOKEN";

/// Environment variable overriding the notice channel.
const SLACK_CHANNEL_VAR: &str = "SLACK_CHANNEL_ID";

/// Runtime configuration for the server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite database file.
    pub db_path: PathBuf,
    /// Port the API server listens on.
    pub port: u16,
    /// Completion-notice settings.
    pub notify: NotifyConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            port: DEFAULT_PORT,
            notify: NotifyConfig::default(),
        }
    }
}

impl Config {
    /// Resolve configuration from the environment. Empty variables count as
    /// unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(token) = std::env::var(SLACK_TOKEN_VAR)
            && !token.is_empty()
        {
            config.notify.token = Some(token);
        }
        if let Ok(channel) = std::env::var(SLACK_CHANNEL_VAR)
            && !channel.is_empty()
        {
            config.notify.channel = channel;
        }

        config
    }
}

//! Error types for configuration loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by a configuration load
#[derive(Debug, Error)]
pub enum LoadError {
    /// The bound config file could not be read or parsed.
    #[error("unable to read config: {source}")]
    Read {
        path: Option<PathBuf>,
        #[source]
        source: config::ConfigError,
    },

    /// The merged settings could not populate the target structure.
    #[error("unable to parse config: {0}")]
    Parse(#[source] config::ConfigError),

    /// The target's current values could not be captured.
    #[error("unable to capture current config values: {0}")]
    Snapshot(#[source] serde_json::Error),

    #[error("Invalid configuration key '{key}': {source}")]
    InvalidKey {
        key: String,
        #[source]
        source: config::ConfigError,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl LoadError {
    /// Path of the config file involved in a read failure, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            LoadError::Read { path, .. } => path.as_deref(),
            _ => None,
        }
    }
}

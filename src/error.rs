use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Log(#[from] LogError),

    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),

    #[error("Input channel closed")]
    InputClosed,

    #[error("Failed to install signal handler: {0}")]
    Signal(#[from] ctrlc::Error),
}

/// Rejected settings, caught before the timer starts.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be at least 1 minute")]
    ZeroDuration(&'static str),

    #[error("Cycle count must be at least 1")]
    ZeroCycles,
}

#[derive(Error, Debug)]
pub enum LogError {
    #[error("Failed to write session log {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to quarantine unreadable session log {}: {source}", path.display())]
    Quarantine {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize session log: {0}")]
    Serialize(#[from] serde_json::Error),
}

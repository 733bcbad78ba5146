//! Error types for simulation setup.
//!
//! The matching core itself has no fatal conditions: no-liquidity, bound
//! avoidance, tombstone skips, and unknown-id cancels are all silent normal
//! branches. Errors exist only at the configuration boundary.

use std::path::PathBuf;

/// Errors that can occur while loading or validating a simulation config.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;

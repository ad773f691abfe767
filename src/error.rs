//! Error types
//!
//! The simulation itself has no recoverable failures; these cover
//! misconfiguration (fatal) and settings/tuning I/O (recoverable).

use std::path::PathBuf;

use thiserror::Error;

/// Simulation invariant violations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    /// Level index outside the configuration table
    #[error("level {level} is not configured (table has levels 1..={levels})")]
    UnknownLevel { level: u32, levels: u32 },

    /// Level table has no entries
    #[error("level table is empty")]
    EmptyLevelTable,
}

/// Errors loading settings or tuning
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] SimError),
}

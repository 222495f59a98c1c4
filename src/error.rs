use std::path::PathBuf;
use thiserror::Error;

/// Failure to read a quote file. Callers fall back to the bundled quotes.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("quote file {0} not found")]
    NotFound(PathBuf),

    #[error("failed to parse quote file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read quote file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to load or persist the leaderboard
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score file {0} not found")]
    NotFound(PathBuf),

    #[error("failed to parse score file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to read score file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write score file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    /// Snapshot file exists but does not parse. Callers pick
    /// discard-and-restart or abort via `CorruptPolicy`.
    #[error("Corrupt snapshot at {path}: {source}")]
    CorruptSnapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Snapshot I/O error at {path}: {source}")]
    SnapshotIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

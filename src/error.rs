use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of the durable key/value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access key `{key}`")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A persisted layout that could not be decoded.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed layout snapshot")]
    Json(#[from] serde_json::Error),
    #[error("unsupported layout snapshot version {found} (newest known is {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error("failed to encode layout snapshot")]
    Encode(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

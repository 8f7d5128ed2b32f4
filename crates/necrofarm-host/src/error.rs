//! Error types for the host binary.

use std::path::PathBuf;

use necrofarm_core::{ConfigError, DispatchError};

/// Errors that can occur while running the host.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Command-line arguments were missing or malformed.
    #[error("usage error: {0}")]
    Usage(String),

    /// A snapshot or action file could not be read or written.
    #[error("failed to access {path}: {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A snapshot could not be decoded or an outcome encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file was unreadable or invalid.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The action was malformed or rejected by the engine.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

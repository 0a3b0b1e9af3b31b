//! Error types for plugin configuration storage

use std::path::PathBuf;
use thiserror::Error;

/// Plugin configuration storage errors.
#[derive(Debug, Error)]
pub enum PluginConfigError {
    /// Reading or writing the configuration file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be encoded or decoded
    #[error("Invalid plugin configuration in {}: {source}", .path.display())]
    Serialization {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for plugin configuration storage.
pub type PluginConfigResult<T> = Result<T, PluginConfigError>;

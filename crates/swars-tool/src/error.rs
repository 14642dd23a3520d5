//! Error types for the tool.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Map directory does not exist or is not a directory
    #[error("Map directory not found: {}", .0.display())]
    MapDirNotFound(PathBuf),

    /// Log filter directive could not be parsed
    #[error("Invalid log level '{level}': {reason}")]
    InvalidLogLevel {
        /// The rejected directive
        level: String,
        /// Parser message
        reason: String,
    },

    /// Copy source and destination resolve to the same path
    #[error("Source and destination are the same file: {}", .0.display())]
    SameFile(PathBuf),
}

/// Command errors.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Loading, parsing or saving a file failed
    #[error("{}: {source}", path.display())]
    Format {
        /// File being processed
        path: PathBuf,
        /// Underlying codec error
        #[source]
        source: swars_formats::Error,
    },

    /// `map-check` found a layout fault in the map's bytes
    #[error("{} is inconsistent: {source}", path.display())]
    Inconsistent {
        /// Map that failed the check
        path: PathBuf,
        /// First inconsistency found
        #[source]
        source: swars_formats::Error,
    },
}

impl ToolError {
    /// Attach `path` to a codec error
    pub fn format(path: impl Into<PathBuf>, source: swars_formats::Error) -> Self {
        Self::Format {
            path: path.into(),
            source,
        }
    }
}

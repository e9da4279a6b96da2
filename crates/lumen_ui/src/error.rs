//! # UI Error Types

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading menu configuration.
#[derive(Error, Debug)]
pub enum UiError {
    /// A configuration file could not be read or written.
    #[error("i/o error on {path}: {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration document did not parse.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for UI configuration operations.
pub type UiResult<T> = Result<T, UiError>;

//! Errors surfaced by the menu loop.

use lumen_core::RegionError;
use lumen_ui::UiError;
use thiserror::Error;

/// Menu loop errors.
#[derive(Error, Debug)]
pub enum LumenError {
    /// A memory region could not be brought up.
    #[error("memory region: {0}")]
    Region(#[from] RegionError),

    /// Settings or help text could not be loaded.
    #[error(transparent)]
    Ui(#[from] UiError),

    /// The loop configuration did not parse.
    #[error("invalid menu loop config: {0}")]
    InvalidConfig(String),
}

/// Result type for menu loop operations.
pub type LumenResult<T> = Result<T, LumenError>;

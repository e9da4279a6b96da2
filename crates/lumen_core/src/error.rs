//! # Region Error Types
//!
//! Failures while setting up or tearing down a region. Running out of space
//! during allocation is reported as `None`, not through this type.

use thiserror::Error;

use crate::memory::Region;

/// Errors that can occur while initializing a region.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegionError {
    /// The region already has a live sub-heap.
    #[error("region {0} is already initialized")]
    AlreadyInitialized(Region),

    /// The platform pool refused to record a frame state.
    #[error("could not record frame heap state {tag:#x} for region {region}")]
    StateRecordFailed {
        /// The region being initialized.
        region: Region,
        /// The state tag that was rejected.
        tag: u32,
    },

    /// The platform pool has nothing left to carve.
    #[error("platform pool for region {0} has no allocatable space")]
    PoolExhausted(Region),

    /// The carved block could not host a sub-heap.
    #[error("failed to create expanding heap of {size} bytes for region {region}")]
    HeapCreationFailed {
        /// The region being initialized.
        region: Region,
        /// Size of the carved block.
        size: usize,
    },
}

/// Result type for region setup.
pub type RegionResult<T> = Result<T, RegionError>;

//! # LUMEN Core
//!
//! Region heaps for a console platform with segmented memory pools.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        MemoryRegions                         │
//! ├───────────────────┬───────────────────┬──────────────────────┤
//! │  Region::Mem1     │  Region::Bucket   │  Region::Mem2        │
//! │  ExpandingHeap    │  ExpandingHeap    │  SystemHeap          │
//! │        ↑          │        ↑          │        ↓             │
//! │  FrameHeap (MEM1) │  FrameHeap (FG)   │  process allocator   │
//! └───────────────────┴───────────────────┴──────────────────────┘
//! ```
//!
//! ## Rules
//!
//! 1. **Exhaustion is not an error** - allocation returns `None`
//! 2. **No growth, no spillover** - a region never borrows from another
//! 3. **Minimum alignment of 4** on the platform-backed regions

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod memory;

pub use error::{RegionError, RegionResult};
pub use memory::{
    Address, ExpandingHeap, FrameHeap, MemoryRegions, PoolLayout, Region, RegionStats,
    SystemHeap,
};

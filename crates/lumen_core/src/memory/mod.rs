//! # Memory Regions
//!
//! Fixed memory regions carved out of coarse platform pools.
//!
//! ## Design Philosophy
//!
//! Each platform-backed region is set up once:
//! - One large block is carved from a frame heap
//! - An expanding heap manages that block
//! - Teardown hands the whole block back in one step

mod address;
mod expanding_heap;
mod frame_heap;
mod region;
mod system_heap;

pub use address::Address;
pub use expanding_heap::ExpandingHeap;
pub use frame_heap::FrameHeap;
pub use region::{
    MemoryRegions, PoolLayout, Region, RegionStats, GFX_FRAME_HEAP_TAG, MIN_REGION_ALIGNMENT,
};
pub use system_heap::SystemHeap;

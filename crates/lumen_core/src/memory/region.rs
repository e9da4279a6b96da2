//! # Named Memory Regions
//!
//! The three regions the rest of the application allocates from.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::address::Address;
use super::expanding_heap::ExpandingHeap;
use super::frame_heap::FrameHeap;
use super::system_heap::SystemHeap;
use crate::error::{RegionError, RegionResult};

/// Frame state tag recorded on the MEM1 pool before the region is carved.
pub const GFX_FRAME_HEAP_TAG: u32 = 0x123D_ECAF;

/// Smallest alignment handed out by the platform-backed regions.
pub const MIN_REGION_ALIGNMENT: usize = 4;

/// A named memory region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Fast embedded memory, carved from the MEM1 pool.
    Mem1,
    /// Foreground bucket, carved from the foreground pool.
    Bucket,
    /// General purpose memory, served by the process allocator.
    Mem2,
}

impl Region {
    /// Every region.
    pub const ALL: [Self; 3] = [Self::Mem1, Self::Bucket, Self::Mem2];

    /// Returns the region name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mem1 => "MEM1",
            Self::Bucket => "bucket",
            Self::Mem2 => "MEM2",
        }
    }

    /// Returns true if the region is carved from a platform pool.
    #[must_use]
    pub const fn is_platform_backed(self) -> bool {
        matches!(self, Self::Mem1 | Self::Bucket)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Address ranges of the two platform pools.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolLayout {
    /// First address of the MEM1 pool.
    pub mem1_base: usize,
    /// Size of the MEM1 pool in bytes.
    pub mem1_size: usize,
    /// First address of the foreground pool.
    pub foreground_base: usize,
    /// Size of the foreground pool in bytes.
    pub foreground_size: usize,
}

impl Default for PoolLayout {
    fn default() -> Self {
        Self {
            mem1_base: 0xF400_0000,
            mem1_size: 32 * 1024 * 1024,
            foreground_base: 0xE000_0000,
            foreground_size: 40 * 1024 * 1024,
        }
    }
}

/// Usage snapshot of a platform-backed region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegionStats {
    /// Bytes carved from the pool.
    pub capacity: usize,
    /// Bytes held by live allocations.
    pub used: usize,
    /// Bytes on the free list.
    pub free: usize,
    /// Largest single free span.
    pub largest_free: usize,
    /// Number of live allocations.
    pub allocations: usize,
}

/// Owner of the platform pools and the three regions.
///
/// # Thread Safety
///
/// Not thread-safe. Callers allocating off the main thread wrap it in a
/// `parking_lot::Mutex`.
///
/// # Example
///
/// ```rust,ignore
/// let mut regions = MemoryRegions::new(PoolLayout::default());
/// regions.initialize(Region::Mem1)?;
///
/// let texture = regions.allocate(Region::Mem1, 4096, 256);
/// regions.free(Region::Mem1, texture);
///
/// regions.destroy(Region::Mem1);
/// ```
#[derive(Debug)]
pub struct MemoryRegions {
    mem1_pool: FrameHeap,
    foreground_pool: FrameHeap,
    mem1: Option<ExpandingHeap>,
    bucket: Option<ExpandingHeap>,
    system: SystemHeap,
}

impl MemoryRegions {
    /// Creates the platform pools. No region is carved yet.
    #[must_use]
    pub fn new(layout: PoolLayout) -> Self {
        Self {
            mem1_pool: FrameHeap::new(layout.mem1_base, layout.mem1_size),
            foreground_pool: FrameHeap::new(layout.foreground_base, layout.foreground_size),
            mem1: None,
            bucket: None,
            system: SystemHeap::new(),
        }
    }

    /// Carves the region out of its platform pool.
    ///
    /// `Region::Mem2` needs no setup and always succeeds.
    ///
    /// # Errors
    ///
    /// Fails if the region is already live, or its pool cannot provide a
    /// block large enough to host a heap.
    pub fn initialize(&mut self, region: Region) -> RegionResult<()> {
        let result = match region {
            Region::Mem2 => Ok(()),
            Region::Mem1 => {
                if self.mem1.is_some() {
                    return Err(RegionError::AlreadyInitialized(region));
                }
                if !self.mem1_pool.record_state(GFX_FRAME_HEAP_TAG) {
                    return Err(RegionError::StateRecordFailed {
                        region,
                        tag: GFX_FRAME_HEAP_TAG,
                    });
                }
                match carve(&mut self.mem1_pool, region) {
                    Ok(heap) => {
                        self.mem1 = Some(heap);
                        Ok(())
                    }
                    Err(e) => {
                        let _ = self.mem1_pool.free_by_state(GFX_FRAME_HEAP_TAG);
                        Err(e)
                    }
                }
            }
            Region::Bucket => {
                if self.bucket.is_some() {
                    return Err(RegionError::AlreadyInitialized(region));
                }
                match carve(&mut self.foreground_pool, region) {
                    Ok(heap) => {
                        self.bucket = Some(heap);
                        Ok(())
                    }
                    Err(e) => {
                        self.foreground_pool.free_all();
                        Err(e)
                    }
                }
            }
        };

        match &result {
            Ok(()) => debug!(%region, capacity = self.capacity(region), "region initialized"),
            Err(e) => warn!(%region, error = %e, "region initialization failed"),
        }
        result
    }

    /// Tears the region down and hands its block back to the pool.
    ///
    /// Live allocations are dropped with the heap.
    pub fn destroy(&mut self, region: Region) {
        match region {
            Region::Mem2 => {}
            Region::Mem1 => {
                if let Some(heap) = self.mem1.take() {
                    debug!(%region, leaked = heap.allocation_count(), "region destroyed");
                }
                if !self.mem1_pool.free_by_state(GFX_FRAME_HEAP_TAG) {
                    debug!(%region, "no recorded frame state to release");
                }
            }
            Region::Bucket => {
                if let Some(heap) = self.bucket.take() {
                    debug!(%region, leaked = heap.allocation_count(), "region destroyed");
                }
                self.foreground_pool.free_all();
            }
        }
    }

    /// Returns true if the region can serve allocations.
    #[must_use]
    pub fn is_initialized(&self, region: Region) -> bool {
        match region {
            Region::Mem1 => self.mem1.is_some(),
            Region::Bucket => self.bucket.is_some(),
            Region::Mem2 => true,
        }
    }

    /// Allocates `size` bytes aligned to at least `align`.
    ///
    /// Platform-backed regions raise `align` to [`MIN_REGION_ALIGNMENT`].
    /// Returns `None` when the region is exhausted or not initialized.
    pub fn allocate(&mut self, region: Region, size: usize, align: usize) -> Option<Address> {
        match region {
            Region::Mem2 => self.system.allocate(size, align),
            Region::Mem1 | Region::Bucket => {
                let align = align.max(MIN_REGION_ALIGNMENT);
                self.heap_mut(region)?.allocate(size, align)
            }
        }
    }

    /// Returns a block to its region. `None` is ignored.
    pub fn free(&mut self, region: Region, address: Option<Address>) {
        let Some(address) = address else {
            return;
        };

        let released = match region {
            Region::Mem2 => self.system.free(address),
            Region::Mem1 | Region::Bucket => self
                .heap_mut(region)
                .is_some_and(|heap| heap.free(address)),
        };
        if !released {
            debug!(%region, %address, "free of unknown address ignored");
        }
    }

    /// Returns a usage snapshot of a platform-backed region.
    #[must_use]
    pub fn stats(&self, region: Region) -> Option<RegionStats> {
        let heap = self.heap(region)?;
        Some(RegionStats {
            capacity: heap.capacity(),
            used: heap.used_bytes(),
            free: heap.free_bytes(),
            largest_free: heap.largest_free_block(),
            allocations: heap.allocation_count(),
        })
    }

    fn capacity(&self, region: Region) -> usize {
        self.heap(region).map_or(0, ExpandingHeap::capacity)
    }

    fn heap(&self, region: Region) -> Option<&ExpandingHeap> {
        match region {
            Region::Mem1 => self.mem1.as_ref(),
            Region::Bucket => self.bucket.as_ref(),
            Region::Mem2 => None,
        }
    }

    fn heap_mut(&mut self, region: Region) -> Option<&mut ExpandingHeap> {
        match region {
            Region::Mem1 => self.mem1.as_mut(),
            Region::Bucket => self.bucket.as_mut(),
            Region::Mem2 => None,
        }
    }
}

/// Takes every allocatable byte of `pool` and puts a heap over it.
fn carve(pool: &mut FrameHeap, region: Region) -> RegionResult<ExpandingHeap> {
    let size = pool.allocatable_size(MIN_REGION_ALIGNMENT);
    if size == 0 {
        return Err(RegionError::PoolExhausted(region));
    }

    let base = pool
        .alloc(size, MIN_REGION_ALIGNMENT)
        .ok_or(RegionError::PoolExhausted(region))?;

    ExpandingHeap::create(base, size).ok_or(RegionError::HeapCreationFailed { region, size })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_layout() -> PoolLayout {
        PoolLayout {
            mem1_base: 0x1000_0000,
            mem1_size: 0x1000,
            foreground_base: 0x2000_0000,
            foreground_size: 0x800,
        }
    }

    #[test]
    fn test_initialize_and_destroy() {
        let mut regions = MemoryRegions::new(small_layout());
        assert!(!regions.is_initialized(Region::Mem1));

        regions.initialize(Region::Mem1).unwrap();
        regions.initialize(Region::Bucket).unwrap();
        assert_eq!(regions.stats(Region::Mem1).unwrap().capacity, 0x1000);
        assert_eq!(regions.stats(Region::Bucket).unwrap().capacity, 0x800);

        regions.destroy(Region::Mem1);
        regions.destroy(Region::Bucket);
        assert!(!regions.is_initialized(Region::Mem1));
        assert!(regions.allocate(Region::Mem1, 4, 4).is_none());

        // The pools were handed back, so the regions can be carved again
        regions.initialize(Region::Mem1).unwrap();
        regions.initialize(Region::Bucket).unwrap();
    }

    #[test]
    fn test_double_initialize_rejected() {
        let mut regions = MemoryRegions::new(small_layout());
        regions.initialize(Region::Bucket).unwrap();
        assert_eq!(
            regions.initialize(Region::Bucket),
            Err(RegionError::AlreadyInitialized(Region::Bucket))
        );
    }

    #[test]
    fn test_empty_pool_fails() {
        let mut layout = small_layout();
        layout.mem1_size = 0;
        let mut regions = MemoryRegions::new(layout);

        assert_eq!(
            regions.initialize(Region::Mem1),
            Err(RegionError::PoolExhausted(Region::Mem1))
        );
        // The recorded state was rolled back, a retry reports the same error
        assert_eq!(
            regions.initialize(Region::Mem1),
            Err(RegionError::PoolExhausted(Region::Mem1))
        );
    }

    #[test]
    fn test_failed_bucket_carve_rolls_back_pool() {
        let mut layout = small_layout();
        layout.foreground_size = 3;
        let mut regions = MemoryRegions::new(layout);

        assert_eq!(
            regions.initialize(Region::Bucket),
            Err(RegionError::HeapCreationFailed {
                region: Region::Bucket,
                size: 3
            })
        );
        assert_eq!(regions.foreground_pool.used(), 0);
        assert!(!regions.is_initialized(Region::Bucket));

        // Same failure on retry, not an exhausted pool
        assert_eq!(
            regions.initialize(Region::Bucket),
            Err(RegionError::HeapCreationFailed {
                region: Region::Bucket,
                size: 3
            })
        );
    }

    #[test]
    fn test_alignment_is_coerced() {
        let mut regions = MemoryRegions::new(small_layout());
        regions.initialize(Region::Mem1).unwrap();

        let _ = regions.allocate(Region::Mem1, 1, 1).unwrap();
        for align in [0, 1, 2] {
            let address = regions.allocate(Region::Mem1, 3, align).unwrap();
            assert!(address.is_aligned_to(MIN_REGION_ALIGNMENT));
        }
    }

    #[test]
    fn test_exhausted_region_returns_none() {
        let mut regions = MemoryRegions::new(small_layout());
        regions.initialize(Region::Bucket).unwrap();

        assert!(regions.allocate(Region::Bucket, 0x800, 4).is_some());
        assert!(regions.allocate(Region::Bucket, 4, 4).is_none());
    }

    #[test]
    fn test_free_none_is_noop() {
        let mut regions = MemoryRegions::new(small_layout());
        regions.initialize(Region::Mem1).unwrap();
        regions.free(Region::Mem1, None);
        regions.free(Region::Mem2, None);
        assert_eq!(regions.stats(Region::Mem1).unwrap().allocations, 0);
    }

    #[test]
    fn test_mem2_pass_through() {
        let mut regions = MemoryRegions::new(small_layout());
        regions.initialize(Region::Mem2).unwrap();

        let address = regions.allocate(Region::Mem2, 256, 64).unwrap();
        assert!(address.is_aligned_to(64));
        regions.free(Region::Mem2, Some(address));
        assert!(regions.stats(Region::Mem2).is_none());
    }

    #[test]
    fn test_regions_do_not_spill() {
        let mut regions = MemoryRegions::new(small_layout());
        regions.initialize(Region::Mem1).unwrap();
        regions.initialize(Region::Bucket).unwrap();

        assert!(regions.allocate(Region::Bucket, 0x1000, 4).is_none());
        assert_eq!(regions.stats(Region::Mem1).unwrap().allocations, 0);
    }
}

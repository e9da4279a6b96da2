//! # System Heap
//!
//! The general-purpose region: a thin pass-through to the process allocator.
//!
//! ## Safety Note
//!
//! Handing out raw process memory requires unsafe calls into `std::alloc`.
//! Every block is tracked with the layout it was allocated with, so only
//! live blocks are ever released, and always with their own layout.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::collections::HashMap;

use super::address::Address;

/// Aligned allocations served by the global allocator.
#[derive(Debug, Default)]
pub struct SystemHeap {
    /// Live blocks and the layouts they were allocated with.
    live: HashMap<usize, Layout>,
}

impl SystemHeap {
    /// Creates an empty system heap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live allocations.
    #[inline]
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.live.len()
    }

    /// Allocates `size` bytes aligned to `align`.
    ///
    /// A zero size is served as one byte. Returns `None` if `align` is not a
    /// power of two, the layout overflows, or the allocator is out of memory.
    pub fn allocate(&mut self, size: usize, align: usize) -> Option<Address> {
        let layout = Layout::from_size_align(size.max(1), align.max(1)).ok()?;

        // SAFETY: `layout` has a non-zero size.
        let ptr = unsafe { alloc::alloc(layout) };
        let address = Address::new(ptr as usize)?;

        self.live.insert(address.get(), layout);
        Some(address)
    }

    /// Releases a block. Returns false if `address` is not live.
    pub fn free(&mut self, address: Address) -> bool {
        let Some(layout) = self.live.remove(&address.get()) else {
            return false;
        };

        // SAFETY: `address` came from `alloc::alloc` with exactly `layout`
        // and was still in `live`, so it has not been released yet.
        unsafe { alloc::dealloc(address.get() as *mut u8, layout) };
        true
    }
}

impl Drop for SystemHeap {
    fn drop(&mut self) {
        for (address, layout) in self.live.drain() {
            // SAFETY: every entry in `live` is an unreleased block allocated
            // with its recorded layout.
            unsafe { alloc::dealloc(address as *mut u8, layout) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_free() {
        let mut heap = SystemHeap::new();

        let a = heap.allocate(64, 16).unwrap();
        assert!(a.is_aligned_to(16));
        assert_eq!(heap.outstanding(), 1);

        assert!(heap.free(a));
        assert!(!heap.free(a));
        assert_eq!(heap.outstanding(), 0);
    }

    #[test]
    fn test_large_alignment() {
        let mut heap = SystemHeap::new();
        let a = heap.allocate(10, 4096).unwrap();
        assert!(a.is_aligned_to(4096));
    }

    #[test]
    fn test_impossible_requests() {
        let mut heap = SystemHeap::new();
        assert!(heap.allocate(usize::MAX, 8).is_none());
        assert!(heap.allocate(16, 3).is_none());
        assert_eq!(heap.outstanding(), 0);
    }

    #[test]
    fn test_drop_releases_leftovers() {
        let mut heap = SystemHeap::new();
        for size in [1, 7, 128] {
            let _ = heap.allocate(size, 8).unwrap();
        }
        assert_eq!(heap.outstanding(), 3);
        drop(heap);
    }
}

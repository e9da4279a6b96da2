//! # Expanding Heap
//!
//! A general sub-allocator over a single carved block.

use std::collections::BTreeMap;

use super::address::{align_up, Address};

/// Allocation granularity in bytes.
const GRANULARITY: usize = 4;

/// A half-open address range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
}

impl Span {
    const fn len(self) -> usize {
        self.end - self.start
    }
}

/// A first-fit heap with per-block free and neighbour coalescing.
///
/// The heap only tracks address ranges; it never touches the memory it
/// manages. Alignment padding in front of a block stays on the free list.
///
/// # Thread Safety
///
/// This heap is NOT thread-safe. Wrap it in a mutex to share it.
#[derive(Debug)]
pub struct ExpandingHeap {
    /// The full managed range.
    range: Span,
    /// Free spans, sorted by address, never adjacent.
    free: Vec<Span>,
    /// Live blocks keyed by their start address.
    used: BTreeMap<usize, Span>,
}

impl ExpandingHeap {
    /// Creates a heap over `[base, base + size)`.
    ///
    /// Returns `None` if the range is smaller than one granule or wraps.
    #[must_use]
    pub fn create(base: Address, size: usize) -> Option<Self> {
        if size < GRANULARITY {
            return None;
        }
        let range = Span {
            start: base.get(),
            end: base.get().checked_add(size)?,
        };
        Some(Self {
            range,
            free: vec![range],
            used: BTreeMap::new(),
        })
    }

    /// Returns the total managed size in bytes.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.range.len()
    }

    /// Returns the number of live allocations.
    #[inline]
    #[must_use]
    pub fn allocation_count(&self) -> usize {
        self.used.len()
    }

    /// Returns the bytes held by live allocations.
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.used.values().map(|span| span.len()).sum()
    }

    /// Returns the bytes on the free list.
    #[must_use]
    pub fn free_bytes(&self) -> usize {
        self.free.iter().map(|span| span.len()).sum()
    }

    /// Returns the size of the largest free span.
    #[must_use]
    pub fn largest_free_block(&self) -> usize {
        self.free.iter().map(|span| span.len()).max().unwrap_or(0)
    }

    /// Returns true if `address` falls inside the managed range.
    #[inline]
    #[must_use]
    pub const fn contains(&self, address: Address) -> bool {
        address.get() >= self.range.start && address.get() < self.range.end
    }

    /// Allocates `size` bytes at `align`.
    ///
    /// Sizes are rounded up to the allocation granularity. Returns `None`
    /// when no free span can hold the block or `align` is not a power of two.
    pub fn allocate(&mut self, size: usize, align: usize) -> Option<Address> {
        if !align.is_power_of_two() {
            return None;
        }
        let size = size.max(1).checked_next_multiple_of(GRANULARITY)?;

        let (index, start) = self.free.iter().enumerate().find_map(|(index, span)| {
            let start = align_up(span.start, align)?;
            let end = start.checked_add(size)?;
            (end <= span.end).then_some((index, start))
        })?;
        let address = Address::new(start)?;

        let span = self.free[index];
        let block = Span {
            start,
            end: start + size,
        };

        let leading = Span {
            start: span.start,
            end: block.start,
        };
        let trailing = Span {
            start: block.end,
            end: span.end,
        };
        self.free.remove(index);
        if trailing.len() > 0 {
            self.free.insert(index, trailing);
        }
        if leading.len() > 0 {
            self.free.insert(index, leading);
        }

        self.used.insert(block.start, block);
        Some(address)
    }

    /// Returns a block to the free list.
    ///
    /// Returns false if `address` is not the start of a live block.
    pub fn free(&mut self, address: Address) -> bool {
        let Some(block) = self.used.remove(&address.get()) else {
            return false;
        };

        let mut index = self.free.partition_point(|span| span.start < block.start);
        self.free.insert(index, block);

        if index + 1 < self.free.len() && self.free[index].end == self.free[index + 1].start {
            self.free[index].end = self.free[index + 1].end;
            self.free.remove(index + 1);
        }
        if index > 0 && self.free[index - 1].end == self.free[index].start {
            self.free[index - 1].end = self.free[index].end;
            self.free.remove(index);
            index -= 1;
        }
        debug_assert!(self.free[index].len() >= block.len());

        true
    }
}

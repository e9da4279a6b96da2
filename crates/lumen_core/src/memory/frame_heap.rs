//! # Frame Heap
//!
//! The coarse platform pool that region heaps are carved from.

use super::address::{align_up, Address};

/// A snapshot of the allocation head, keyed by a caller-chosen tag.
#[derive(Clone, Copy, Debug)]
struct FrameState {
    tag: u32,
    head: usize,
}

/// A bump-pointer heap over a fixed address range.
///
/// Blocks cannot be freed individually. Instead the head can be rolled back
/// to a recorded state, or the whole heap released at once.
///
/// # Example
///
/// ```rust,ignore
/// let mut pool = FrameHeap::new(0xF400_0000, 32 * 1024 * 1024);
///
/// assert!(pool.record_state(0x123D_ECAF));
/// let size = pool.allocatable_size(4);
/// let block = pool.alloc(size, 4)?;
///
/// // Hand everything after the snapshot back
/// assert!(pool.free_by_state(0x123D_ECAF));
/// ```
#[derive(Debug)]
pub struct FrameHeap {
    /// First address of the range.
    base: usize,
    /// One past the last address of the range.
    end: usize,
    /// Offset of the next free byte.
    head: usize,
    /// Recorded states, oldest first.
    states: Vec<FrameState>,
}

impl FrameHeap {
    /// Creates a frame heap over `[base, base + size)`.
    #[must_use]
    pub fn new(base: usize, size: usize) -> Self {
        Self {
            base,
            end: base.saturating_add(size),
            head: 0,
            states: Vec::new(),
        }
    }

    /// Returns the first address managed by this heap.
    #[inline]
    #[must_use]
    pub const fn base(&self) -> usize {
        self.base
    }

    /// Returns the total size in bytes.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.end - self.base
    }

    /// Returns the number of bytes handed out so far.
    #[inline]
    #[must_use]
    pub const fn used(&self) -> usize {
        self.head
    }

    /// Returns how many bytes a single allocation with `align` could get.
    #[must_use]
    pub fn allocatable_size(&self, align: usize) -> usize {
        if !align.is_power_of_two() {
            return 0;
        }
        align_up(self.base + self.head, align).map_or(0, |start| self.end.saturating_sub(start))
    }

    /// Bumps the head by `size` bytes at `align`.
    ///
    /// Returns `None` if the block does not fit.
    pub fn alloc(&mut self, size: usize, align: usize) -> Option<Address> {
        if size == 0 || !align.is_power_of_two() {
            return None;
        }

        let start = align_up(self.base + self.head, align)?;
        let end = start.checked_add(size)?;
        if end > self.end {
            return None;
        }

        let address = Address::new(start)?;
        self.head = end - self.base;
        Some(address)
    }

    /// Records the current head under `tag`.
    ///
    /// Fails if `tag` is already recorded.
    #[must_use]
    pub fn record_state(&mut self, tag: u32) -> bool {
        if self.states.iter().any(|state| state.tag == tag) {
            return false;
        }
        self.states.push(FrameState {
            tag,
            head: self.head,
        });
        true
    }

    /// Rolls the head back to the state recorded under `tag`.
    ///
    /// States recorded after `tag` are discarded along with it.
    #[must_use]
    pub fn free_by_state(&mut self, tag: u32) -> bool {
        let Some(position) = self.states.iter().rposition(|state| state.tag == tag) else {
            return false;
        };
        self.head = self.states[position].head;
        self.states.truncate(position);
        true
    }

    /// Releases every block and every recorded state.
    pub fn free_all(&mut self) {
        self.head = 0;
        self.states.clear();
    }
}

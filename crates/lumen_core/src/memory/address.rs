//! Addresses handed out by the region heaps.

use std::fmt;
use std::num::NonZeroUsize;

/// A non-null address inside one of the memory regions.
///
/// Platform-backed regions hand out addresses in the console's address
/// space. The general-purpose region hands out real process addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(NonZeroUsize);

impl Address {
    /// Wraps a raw address. Returns `None` for null.
    #[inline]
    #[must_use]
    pub const fn new(raw: usize) -> Option<Self> {
        match NonZeroUsize::new(raw) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Returns the raw address.
    #[inline]
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }

    /// Returns true if the address is a multiple of `align`.
    #[inline]
    #[must_use]
    pub const fn is_aligned_to(self, align: usize) -> bool {
        align != 0 && self.get() % align == 0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.get())
    }
}

/// Rounds `value` up to the next multiple of `align` (a power of two).
#[inline]
pub(crate) fn align_up(value: usize, align: usize) -> Option<usize> {
    debug_assert!(align.is_power_of_two());
    value.checked_add(align - 1).map(|v| v & !(align - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_is_rejected() {
        assert!(Address::new(0).is_none());
        assert_eq!(Address::new(0x40).map(Address::get), Some(0x40));
    }

    #[test]
    fn test_alignment_checks() {
        let addr = Address::new(0x1000).unwrap();
        assert!(addr.is_aligned_to(4));
        assert!(addr.is_aligned_to(0x1000));
        assert!(!addr.is_aligned_to(0x2000));
        assert!(!addr.is_aligned_to(0));
    }

    #[test]
    fn test_align_up() {
        assert_eq!(align_up(5, 4), Some(8));
        assert_eq!(align_up(8, 4), Some(8));
        assert_eq!(align_up(usize::MAX, 4), None);
    }

    #[test]
    fn test_display_is_hex() {
        let addr = Address::new(0xF400_0000).unwrap();
        assert_eq!(addr.to_string(), "0xf4000000");
    }
}

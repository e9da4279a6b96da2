//! Bounded text output for dialogs.

use std::fmt;

/// A text buffer with a fixed byte capacity.
///
/// The capacity counts a terminator slot, so at most `capacity - 1` bytes of
/// text are kept. Anything past that is dropped on a `char` boundary. Writes
/// never fail: formatting into a full buffer just stops adding text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    capacity: usize,
    truncated: bool,
}

impl TextBuffer {
    /// Creates an empty buffer holding up to `capacity - 1` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity.saturating_sub(1)),
            capacity,
            truncated: false,
        }
    }

    /// Returns the capacity including the terminator slot.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the current text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the text length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns true if no text is held.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns true if text was dropped since the last clear.
    #[inline]
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Empties the buffer.
    pub fn clear(&mut self) {
        self.text.clear();
        self.truncated = false;
    }

    /// Replaces the contents with `text`, truncating as needed.
    pub fn set(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }

    /// Appends as much of `text` as fits.
    pub fn push_str(&mut self, text: &str) {
        let room = self.capacity.saturating_sub(1).saturating_sub(self.text.len());
        if text.len() <= room {
            self.text.push_str(text);
            return;
        }

        let mut cut = room;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        self.text.push_str(&text[..cut]);
        self.truncated = true;
    }
}

impl fmt::Write for TextBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write;

    #[test]
    fn test_fits() {
        let mut buf = TextBuffer::with_capacity(16);
        buf.set("hello");
        assert_eq!(buf.as_str(), "hello");
        assert!(!buf.is_truncated());
    }

    #[test]
    fn test_truncates_leaving_terminator_slot() {
        let mut buf = TextBuffer::with_capacity(6);
        buf.set("hello world");
        assert_eq!(buf.as_str(), "hello");
        assert!(buf.is_truncated());
    }

    #[test]
    fn test_truncates_on_char_boundary() {
        let mut buf = TextBuffer::with_capacity(4);
        // 'é' is two bytes; only "a" + "é" fit in three
        buf.set("aéé");
        assert_eq!(buf.as_str(), "aé");

        let mut buf = TextBuffer::with_capacity(3);
        buf.set("aéé");
        assert_eq!(buf.as_str(), "a");
    }

    #[test]
    fn test_zero_and_one_capacity_hold_nothing() {
        for capacity in [0, 1] {
            let mut buf = TextBuffer::with_capacity(capacity);
            buf.set("x");
            assert!(buf.is_empty());
        }
    }

    #[test]
    fn test_formatting_never_fails() {
        let mut buf = TextBuffer::with_capacity(8);
        write!(buf, "[{}]: {:<6}", "Up", "W").unwrap();
        assert_eq!(buf.as_str(), "[Up]: W");
        assert_eq!(buf.len(), 7);
    }

    #[test]
    fn test_set_overwrites() {
        let mut buf = TextBuffer::with_capacity(4);
        buf.set("abcdef");
        buf.set("xy");
        assert_eq!(buf.as_str(), "xy");
        assert!(!buf.is_truncated());
    }
}

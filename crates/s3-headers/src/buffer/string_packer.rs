//! Append-only bump storage over a byte array sized at construction.
//!
//! Each stored value is followed by a single terminator byte, so a value of `n` bytes
//! consumes `n + 1` bytes of capacity. Space is never compacted or reused; the only
//! way to reclaim it is to drop the packer.

use std::fmt;

/// Byte written after every stored value
const TERMINATOR: u8 = 0;

/// Location of a value stored in a [`StringPacker`].
///
/// This is a plain offset and length pair, it does not borrow or own the packer. It is
/// only meaningful for the packer that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedStr {
    offset: usize,
    len: usize,
}

impl PackedStr {
    /// Offset of the first byte of the value inside the packer
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the value, excluding the terminator
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// A fixed-capacity, append-only string buffer.
pub struct StringPacker {
    buf: Box<[u8]>,
    cursor: usize,
}

impl StringPacker {
    /// Creates a packer able to hold `capacity` bytes, terminators included.
    ///
    /// This is the only allocation the packer ever performs.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { buf: vec![0; capacity].into_boxed_slice(), cursor: 0 }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Number of bytes used so far
    #[inline]
    pub fn len(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.cursor
    }

    /// Returns true once every byte of the array has been used
    #[inline]
    pub fn is_full(&self) -> bool {
        self.cursor == self.buf.len()
    }

    /// Offset the next successful [`add`](Self::add) will start writing at.
    ///
    /// The offset only designates a stored value if the following `add` reports that
    /// the value fit.
    #[inline]
    pub fn current_offset(&self) -> usize {
        self.cursor
    }

    /// Copies `src` followed by a terminator into the packer.
    ///
    /// Returns `false` without writing anything when fewer than `src.len() + 1` bytes
    /// remain; the cursor is unchanged in that case.
    pub fn add(&mut self, src: &[u8]) -> bool {
        let Some(needed) = src.len().checked_add(1) else {
            return false;
        };
        if needed > self.remaining() {
            return false;
        }

        let end = self.cursor + src.len();
        self.buf[self.cursor..end].copy_from_slice(src);
        self.buf[end] = TERMINATOR;
        self.cursor = end + 1;
        true
    }

    /// Stores `src` and returns where it landed, or `None` if it did not fit.
    pub fn push(&mut self, src: &[u8]) -> Option<PackedStr> {
        let offset = self.current_offset();
        self.add(src).then_some(PackedStr { offset, len: src.len() })
    }

    /// Returns the bytes of a stored value, without its terminator.
    ///
    /// A span that does not belong to this packer yields an empty slice.
    pub fn get(&self, packed: PackedStr) -> &[u8] {
        packed.offset.checked_add(packed.len).and_then(|end| self.buf[..self.cursor].get(packed.offset..end)).unwrap_or_default()
    }

    /// Returns a stored value as `str` when it is valid UTF-8
    pub fn get_str(&self, packed: PackedStr) -> Option<&str> {
        std::str::from_utf8(self.get(packed)).ok()
    }
}

impl fmt::Debug for StringPacker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringPacker").field("len", &self.cursor).field("capacity", &self.buf.len()).finish()
    }
}

use crate::protocol::HeaderKind;

/// Result of feeding one header line to the handler.
///
/// None of these variants is an error: a dropped header only means the matching
/// property stays absent, and the rest of the response is parsed as usual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The header was recognized and its value stored
    Captured(HeaderKind),
    /// The header name is not one this crate handles
    Ignored,
    /// The line left no trace, see [`DropReason`]
    Dropped(DropReason),
}

impl AddOutcome {
    #[inline]
    pub fn is_captured(&self) -> bool {
        matches!(self, AddOutcome::Captured(_))
    }

    #[inline]
    pub fn is_dropped(&self) -> bool {
        matches!(self, AddOutcome::Dropped(_))
    }
}

/// Why a header line was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The handler was already finalized
    Sealed,
    /// The property buffer is completely used up
    PropertiesFull,
    /// The line is shorter than the smallest possible header
    TooShort,
    /// Nothing was left after trimming whitespace and the line terminator
    Empty,
    /// The value (or metadata key) is not valid UTF-8
    NotUtf8,
    /// The value did not fit in the remaining buffer space
    NoRoom(HeaderKind),
    /// The metadata entry limit was already reached
    TooManyMetadata,
    /// `Content-Length` was empty, not decimal, or out of range
    InvalidContentLength,
}

//! Structured response properties.
//!
//! The handler stores [`PackedStr`] spans internally and resolves them into borrowed
//! `&str` views on demand, so every value returned here lives exactly as long as the
//! handler that parsed it.

use std::fmt;
use std::iter::FusedIterator;
use std::slice;

use chrono::{DateTime, Utc};

use crate::buffer::{PackedStr, StringPacker};
use crate::protocol::HeaderKind;

/// Value of `content_length` and `last_modified` when the header was not seen
pub const UNKNOWN: i64 = -1;

/// Internal record of captured property spans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PropertySlots {
    pub(crate) request_id: Option<PackedStr>,
    pub(crate) request_id_2: Option<PackedStr>,
    pub(crate) content_type: Option<PackedStr>,
    pub(crate) server: Option<PackedStr>,
    pub(crate) etag: Option<PackedStr>,
    pub(crate) content_length: i64,
    pub(crate) last_modified: i64,
}

impl Default for PropertySlots {
    fn default() -> Self {
        Self {
            request_id: None,
            request_id_2: None,
            content_type: None,
            server: None,
            etag: None,
            content_length: UNKNOWN,
            last_modified: UNKNOWN,
        }
    }
}

impl PropertySlots {
    /// Slot of a text valued property, `None` for kinds stored elsewhere
    pub(crate) fn string_slot(&mut self, kind: HeaderKind) -> Option<&mut Option<PackedStr>> {
        match kind {
            HeaderKind::RequestId => Some(&mut self.request_id),
            HeaderKind::RequestId2 => Some(&mut self.request_id_2),
            HeaderKind::ContentType => Some(&mut self.content_type),
            HeaderKind::Server => Some(&mut self.server),
            HeaderKind::ETag => Some(&mut self.etag),
            HeaderKind::ContentLength | HeaderKind::Meta => None,
        }
    }
}

/// Internal record of one metadata entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MetadataSlot {
    pub(crate) name: PackedStr,
    pub(crate) value: PackedStr,
}

impl MetadataSlot {
    fn resolve(self, strings: &StringPacker) -> NameValue<'_> {
        NameValue { name: strings.get_str(self.name).unwrap_or_default(), value: strings.get_str(self.value).unwrap_or_default() }
    }
}

/// A metadata key and its value, without the `x-amz-meta-` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NameValue<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

impl<'a> NameValue<'a> {
    pub const fn new(name: &'a str, value: &'a str) -> Self {
        Self { name, value }
    }
}

/// The metadata entries of a response, in the order their headers arrived.
#[derive(Clone, Copy)]
pub struct Metadata<'a> {
    slots: &'a [MetadataSlot],
    strings: &'a StringPacker,
}

impl<'a> Metadata<'a> {
    pub(crate) fn new(slots: &'a [MetadataSlot], strings: &'a StringPacker) -> Self {
        Self { slots, strings }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<NameValue<'a>> {
        self.slots.get(index).map(|slot| slot.resolve(self.strings))
    }

    /// Returns the value of the first entry named `name`
    pub fn value_of(&self, name: &str) -> Option<&'a str> {
        self.iter().find(|entry| entry.name == name).map(|entry| entry.value)
    }

    pub fn iter(&self) -> MetadataIter<'a> {
        MetadataIter { slots: self.slots.iter(), strings: self.strings }
    }
}

impl PartialEq for Metadata<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for Metadata<'_> {}

impl fmt::Debug for Metadata<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for Metadata<'a> {
    type Item = NameValue<'a>;
    type IntoIter = MetadataIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &Metadata<'a> {
    type Item = NameValue<'a>;
    type IntoIter = MetadataIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over [`Metadata`] entries
#[derive(Debug, Clone)]
pub struct MetadataIter<'a> {
    slots: slice::Iter<'a, MetadataSlot>,
    strings: &'a StringPacker,
}

impl<'a> Iterator for MetadataIter<'a> {
    type Item = NameValue<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.next().map(|slot| slot.resolve(self.strings))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }
}

impl DoubleEndedIterator for MetadataIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.slots.next_back().map(|slot| slot.resolve(self.strings))
    }
}

impl ExactSizeIterator for MetadataIter<'_> {}

impl FusedIterator for MetadataIter<'_> {}

/// Everything captured from a response header block.
///
/// Text values borrow from the handler that produced them. `content_length` and
/// `last_modified` hold [`UNKNOWN`] when the value was not available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseProperties<'a> {
    /// `x-amz-request-id`
    pub request_id: Option<&'a str>,
    /// `x-amz-id-2`
    pub request_id_2: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub server: Option<&'a str>,
    pub etag: Option<&'a str>,
    pub content_length: i64,
    /// Seconds since the unix epoch
    pub last_modified: i64,
    pub metadata: Metadata<'a>,
}

impl<'a> ResponseProperties<'a> {
    pub(crate) fn new(slots: &PropertySlots, strings: &'a StringPacker, metadata: Metadata<'a>) -> Self {
        let resolve = |slot: Option<PackedStr>| slot.and_then(|packed| strings.get_str(packed));
        Self {
            request_id: resolve(slots.request_id),
            request_id_2: resolve(slots.request_id_2),
            content_type: resolve(slots.content_type),
            server: resolve(slots.server),
            etag: resolve(slots.etag),
            content_length: slots.content_length,
            last_modified: slots.last_modified,
            metadata,
        }
    }

    /// The content length, if a valid `Content-Length` header was seen
    pub fn known_content_length(&self) -> Option<u64> {
        u64::try_from(self.content_length).ok()
    }

    /// The last-modified time as a UTC timestamp, if the transport provided one
    pub fn last_modified_time(&self) -> Option<DateTime<Utc>> {
        if self.last_modified == UNKNOWN {
            return None;
        }
        DateTime::from_timestamp(self.last_modified, 0)
    }
}

//! Incremental accumulator for response header lines.
//!
//! Each call to [`ResponseHeadersHandler::add`] processes one complete header line:
//!
//! 1. Reject lines too short to hold `X:Y` plus a terminator
//! 2. Strip leading blanks, the trailing CRLF and any blanks before it
//! 3. Split at the first colon into name and value, stripping blanks ahead of the value
//! 4. Dispatch on the name: store the value, parse `Content-Length`, record metadata,
//!    or ignore the line
//!
//! Values are copied into two [`StringPacker`]s, one for the simple properties and one
//! for metadata names and values. Both are sized by [`HandlerConfig`] when the handler is
//! built, and a value that does not fit is dropped without touching anything stored
//! before it.

use bytes::BytesMut;
use tokio_util::codec::Decoder;
use tracing::{debug, trace};

use crate::buffer::StringPacker;
use crate::codec::{HeaderLine, HeaderLineDecoder};
use crate::config::HandlerConfig;
use crate::handler::LastModifiedSource;
use crate::protocol::{
    AddOutcome, ConfigError, DropReason, HeaderKind, HeaderLineError, Metadata, MetadataSlot, PropertySlots,
    ResponseProperties, UNKNOWN,
};

/// Shortest line that can carry a header: `X:Y`
const MIN_LINE_LEN: usize = 3;

/// Length of the CRLF every line is expected to end with
const LINE_TERMINATOR_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Accepting header lines
    Open,
    /// Finalized, every further line is ignored
    Done,
}

/// Collects the properties of one response from its header lines.
///
/// The handler allocates its buffers once in the constructor; `add` and `finalize`
/// never allocate themselves, only the [`LastModifiedSource`] passed to `finalize` may.
#[derive(Debug)]
pub struct ResponseHeadersHandler {
    config: HandlerConfig,
    state: State,
    slots: PropertySlots,
    property_strings: StringPacker,
    metadata_strings: StringPacker,
    metadata: Vec<MetadataSlot>,
}

impl ResponseHeadersHandler {
    /// Creates a handler with the default protocol limits
    pub fn new() -> Self {
        Self::from_config(HandlerConfig::default())
    }

    /// Creates a handler with custom limits.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `config` fails [`HandlerConfig::validate`].
    pub fn try_with_config(config: HandlerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: HandlerConfig) -> Self {
        Self {
            config,
            state: State::Open,
            slots: PropertySlots::default(),
            property_strings: StringPacker::with_capacity(config.property_capacity()),
            metadata_strings: StringPacker::with_capacity(config.metadata_capacity()),
            metadata: Vec::with_capacity(config.max_metadata_count()),
        }
    }

    #[inline]
    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Returns true once [`finalize`](Self::finalize) has been called
    #[inline]
    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    /// Processes one header line, including its trailing CRLF.
    ///
    /// Nothing about a single line can fail the response: the returned [`AddOutcome`]
    /// only reports whether the line was captured, ignored or dropped.
    pub fn add(&mut self, line: &[u8]) -> AddOutcome {
        if self.state == State::Done {
            trace!("headers already finalized, ignore line");
            return AddOutcome::Dropped(DropReason::Sealed);
        }

        if self.property_strings.is_full() {
            trace!(capacity = self.property_strings.capacity(), "response property buffer is full, ignore line");
            return AddOutcome::Dropped(DropReason::PropertiesFull);
        }

        if line.len() < MIN_LINE_LEN {
            return AddOutcome::Dropped(DropReason::TooShort);
        }

        let Some(header) = trim_line(line) else {
            return AddOutcome::Dropped(DropReason::Empty);
        };

        let Some((name, value)) = split_header(header) else {
            return AddOutcome::Ignored;
        };

        match HeaderKind::classify(name) {
            None => AddOutcome::Ignored,
            Some(HeaderKind::ContentLength) => self.set_content_length(value),
            Some(HeaderKind::Meta) => {
                let key = HeaderKind::metadata_key(name).unwrap_or_default();
                self.add_metadata(key, value)
            }
            Some(kind) => self.set_property(kind, value),
        }
    }

    fn set_property(&mut self, kind: HeaderKind, value: &[u8]) -> AddOutcome {
        if std::str::from_utf8(value).is_err() {
            debug!(header = %kind, "header value is not utf-8, drop it");
            return AddOutcome::Dropped(DropReason::NotUtf8);
        }

        let Some(slot) = self.slots.string_slot(kind) else {
            return AddOutcome::Ignored;
        };

        match self.property_strings.push(value) {
            Some(packed) => {
                *slot = Some(packed);
                AddOutcome::Captured(kind)
            }
            None => {
                debug!(
                    header = %kind,
                    len = value.len(),
                    remaining = self.property_strings.remaining(),
                    "no room for response property, drop it"
                );
                AddOutcome::Dropped(DropReason::NoRoom(kind))
            }
        }
    }

    fn set_content_length(&mut self, value: &[u8]) -> AddOutcome {
        match parse_content_length(value) {
            Some(length) => {
                self.slots.content_length = length;
                AddOutcome::Captured(HeaderKind::ContentLength)
            }
            None => {
                // the latest Content-Length wins, even when it is unusable
                self.slots.content_length = UNKNOWN;
                debug!(value = %value.escape_ascii(), "invalid content-length, drop it");
                AddOutcome::Dropped(DropReason::InvalidContentLength)
            }
        }
    }

    fn add_metadata(&mut self, key: &[u8], value: &[u8]) -> AddOutcome {
        if self.metadata.len() >= self.config.max_metadata_count() {
            debug!(max_num = self.config.max_metadata_count(), "metadata number exceed the limit, drop it");
            return AddOutcome::Dropped(DropReason::TooManyMetadata);
        }

        if std::str::from_utf8(key).is_err() || std::str::from_utf8(value).is_err() {
            debug!("metadata is not utf-8, drop it");
            return AddOutcome::Dropped(DropReason::NotUtf8);
        }

        let Some(name) = self.metadata_strings.push(key) else {
            debug!(remaining = self.metadata_strings.remaining(), "no room for metadata name, drop it");
            return AddOutcome::Dropped(DropReason::NoRoom(HeaderKind::Meta));
        };
        // the name stored above stays unreferenced
        let Some(packed_value) = self.metadata_strings.push(value) else {
            debug!(remaining = self.metadata_strings.remaining(), "no room for metadata value, drop it");
            return AddOutcome::Dropped(DropReason::NoRoom(HeaderKind::Meta));
        };

        self.metadata.push(MetadataSlot { name, value: packed_value });
        AddOutcome::Captured(HeaderKind::Meta)
    }

    /// Seals the handler at the end of the header block.
    ///
    /// Queries `source` for the last-modified time; a failure leaves it at [`UNKNOWN`].
    /// Only the first call has any effect.
    pub fn finalize<S>(&mut self, source: &S)
    where
        S: LastModifiedSource + ?Sized,
    {
        if self.state == State::Done {
            trace!("headers already finalized");
            return;
        }

        self.slots.last_modified = match source.last_modified() {
            Ok(last_modified) => last_modified,
            Err(e) => {
                debug!(cause = %e, "last-modified time unknown");
                UNKNOWN
            }
        };
        self.state = State::Done;

        trace!(
            property_bytes = self.property_strings.len(),
            metadata_num = self.metadata.len(),
            "finalized response headers"
        );
    }

    /// Decodes header lines from `src` and adds them, finalizing on the blank line.
    ///
    /// Can be called again whenever more bytes arrive. Bytes after the header block are
    /// left in `src`.
    ///
    /// # Returns
    ///
    /// `Ok(true)` once the handler is finalized, `Ok(false)` if more data is needed.
    ///
    /// # Errors
    ///
    /// Returns `HeaderLineError` if `decoder` rejects the input.
    pub fn feed<S>(&mut self, decoder: &mut HeaderLineDecoder, src: &mut BytesMut, source: &S) -> Result<bool, HeaderLineError>
    where
        S: LastModifiedSource + ?Sized,
    {
        while let Some(line) = decoder.decode(src)? {
            match line {
                HeaderLine::Field(bytes) => {
                    let outcome = self.add(&bytes);
                    trace!(?outcome, "added header line");
                }
                HeaderLine::End => {
                    self.finalize(source);
                    break;
                }
            }
        }

        Ok(self.is_done())
    }

    /// Returns the properties captured so far
    pub fn properties(&self) -> ResponseProperties<'_> {
        let metadata = Metadata::new(&self.metadata, &self.metadata_strings);
        ResponseProperties::new(&self.slots, &self.property_strings, metadata)
    }

    #[inline]
    pub fn metadata_len(&self) -> usize {
        self.metadata.len()
    }
}

impl Default for ResponseHeadersHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn is_blank(b: u8) -> bool {
    matches!(b, b' ' | b'\t')
}

fn trim_blank_start(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| !is_blank(*b)).unwrap_or(bytes.len());
    &bytes[start..]
}

fn trim_blank_end(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|b| !is_blank(*b)).map_or(0, |last| last + 1);
    &bytes[..end]
}

/// Strips leading blanks, the line terminator and trailing blanks, `None` if nothing is left
fn trim_line(line: &[u8]) -> Option<&[u8]> {
    let line = trim_blank_start(line);
    let line = &line[..line.len().checked_sub(LINE_TERMINATOR_LEN)?];
    let line = trim_blank_end(line);
    (!line.is_empty()).then_some(line)
}

/// Splits at the first colon, `None` if there is none
fn split_header(header: &[u8]) -> Option<(&[u8], &[u8])> {
    let colon = header.iter().position(|b| *b == b':')?;
    Some((&header[..colon], trim_blank_start(&header[colon + 1..])))
}

/// Parses a decimal content length; `None` for empty, non-digit or overflowing input.
///
/// A rejected value resets the content length to [`UNKNOWN`], discarding any earlier
/// valid `Content-Length`.
fn parse_content_length(value: &[u8]) -> Option<i64> {
    if value.is_empty() {
        return None;
    }
    value.iter().try_fold(0_i64, |length, b| {
        let digit = b.is_ascii_digit().then(|| i64::from(b - b'0'))?;
        length.checked_mul(10)?.checked_add(digit)
    })
}

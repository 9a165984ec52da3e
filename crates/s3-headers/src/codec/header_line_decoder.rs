//! Decoder yielding one HTTP header line per item.
//!
//! The decoder does not interpret lines beyond spotting the blank line that ends the
//! header block. Once that line is seen it stops consuming input, so whatever follows
//! (the body) stays in the caller's buffer.

use bytes::{Bytes, BytesMut};
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::ensure;
use crate::protocol::HeaderLineError;

/// Default maximum size of a single header line, terminator included
pub const MAX_LINE_BYTES: usize = 8 * 1024;

/// An item produced by [`HeaderLineDecoder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderLine {
    /// A complete header line, including its trailing CRLF
    Field(Bytes),
    /// The blank line terminating the header block
    End,
}

impl HeaderLine {
    #[inline]
    pub fn is_end(&self) -> bool {
        matches!(self, HeaderLine::End)
    }

    /// Returns the line bytes, or `None` for [`HeaderLine::End`]
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            HeaderLine::Field(bytes) => Some(bytes),
            HeaderLine::End => None,
        }
    }
}

/// Splits buffered bytes into header lines.
///
/// # State Machine
///
/// - reading: every call returns the next complete line, or `Ok(None)` until one is buffered
/// - finished: after [`HeaderLine::End`] every call returns `Ok(None)` and leaves the
///   buffer untouched
#[derive(Debug, Clone)]
pub struct HeaderLineDecoder {
    max_line_bytes: usize,
    finished: bool,
}

impl HeaderLineDecoder {
    pub fn new() -> Self {
        Self::with_max_line_bytes(MAX_LINE_BYTES)
    }

    pub fn with_max_line_bytes(max_line_bytes: usize) -> Self {
        Self { max_line_bytes, finished: false }
    }

    /// Returns true once the blank line ending the header block was decoded
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Makes the decoder ready for the header block of the next response
    pub fn reset(&mut self) {
        self.finished = false;
    }
}

impl Default for HeaderLineDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for HeaderLineDecoder {
    type Item = HeaderLine;
    type Error = HeaderLineError;

    /// Attempts to split the next header line off `src`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(HeaderLine::Field(_)))` for a complete header line
    /// - `Ok(Some(HeaderLine::End))` for the blank line ending the header block
    /// - `Ok(None)` if more data is needed, or the header block is already finished
    ///
    /// # Errors
    ///
    /// Returns `HeaderLineError` if:
    /// - a line grows beyond the configured limit
    /// - a line ends in a bare LF instead of CRLF
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if self.finished {
            return Ok(None);
        }

        // scan from the start: the caller may swap or drain the buffer between calls,
        // and a pending line is bounded by `max_line_bytes`
        let Some(lf) = src.iter().position(|b| *b == b'\n') else {
            ensure!(src.len() <= self.max_line_bytes, HeaderLineError::too_long_line(src.len(), self.max_line_bytes));
            return Ok(None);
        };

        let line_len = lf + 1;
        ensure!(line_len <= self.max_line_bytes, HeaderLineError::too_long_line(line_len, self.max_line_bytes));

        ensure!(line_len >= 2 && src[line_len - 2] == b'\r', HeaderLineError::BareLineFeed);

        let line = src.split_to(line_len).freeze();
        if &line[..] == b"\r\n" {
            trace!(remaining = src.len(), "reached end of header block");
            self.finished = true;
            return Ok(Some(HeaderLine::End));
        }

        trace!(len = line_len, "decoded header line");
        Ok(Some(HeaderLine::Field(line)))
    }

    /// Like [`decode`](Self::decode), but a partial line or body left in the buffer at
    /// end of stream is not an error.
    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        self.decode(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn decode_all(decoder: &mut HeaderLineDecoder, buf: &mut BytesMut) -> Vec<HeaderLine> {
        let mut lines = Vec::new();
        while let Some(line) = decoder.decode(buf).unwrap() {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn test_basic() {
        let str = "HTTP/1.1 200 OK\r\nETag: \"abc\"\r\nContent-Length: 3\r\n\r\n123";
        let mut buf = BytesMut::from(str);

        let mut decoder = HeaderLineDecoder::new();
        let lines = decode_all(&mut decoder, &mut buf);

        assert_eq!(
            lines,
            vec![
                HeaderLine::Field(Bytes::from_static(b"HTTP/1.1 200 OK\r\n")),
                HeaderLine::Field(Bytes::from_static(b"ETag: \"abc\"\r\n")),
                HeaderLine::Field(Bytes::from_static(b"Content-Length: 3\r\n")),
                HeaderLine::End,
            ]
        );
        assert!(decoder.is_finished());
        assert_eq!(&buf[..], b"123");

        assert_eq!(lines[1].as_bytes().map(|line| &line[..]), Some(&b"ETag: \"abc\"\r\n"[..]));
        assert!(!lines[1].is_end());
        assert!(lines[3].is_end());
        assert_eq!(lines[3].as_bytes(), None);
    }

    #[test]
    fn reject_bare_lf() {
        let str = indoc! {r##"
        Server: AmazonS3

        body"##};
        let mut buf = BytesMut::from(str);

        let mut decoder = HeaderLineDecoder::new();

        assert!(matches!(decoder.decode(&mut buf), Err(HeaderLineError::BareLineFeed)));

        let mut buf = BytesMut::from(&b"\n"[..]);
        assert!(matches!(decoder.decode(&mut buf), Err(HeaderLineError::BareLineFeed)));
    }

    #[test]
    fn byte_by_byte() {
        let input = b"x-amz-id-2: abc\r\nServer: S3\r\n\r\n";
        let mut buf = BytesMut::new();
        let mut decoder = HeaderLineDecoder::new();
        let mut lines = Vec::new();

        for byte in input {
            buf.extend_from_slice(&[*byte]);
            if let Some(line) = decoder.decode(&mut buf).unwrap() {
                lines.push(line);
            }
        }

        assert_eq!(
            lines,
            vec![
                HeaderLine::Field(Bytes::from_static(b"x-amz-id-2: abc\r\n")),
                HeaderLine::Field(Bytes::from_static(b"Server: S3\r\n")),
                HeaderLine::End,
            ]
        );
        assert!(buf.is_empty());
    }

    #[test]
    fn finished_decoder_leaves_buffer() {
        let mut buf = BytesMut::from(&b"\r\nETag: trailer\r\n"[..]);
        let mut decoder = HeaderLineDecoder::new();

        assert_eq!(decoder.decode(&mut buf).unwrap(), Some(HeaderLine::End));
        assert_eq!(decoder.decode(&mut buf).unwrap(), None);
        assert_eq!(decoder.decode_eof(&mut buf).unwrap(), None);
        assert_eq!(&buf[..], b"ETag: trailer\r\n");

        decoder.reset();
        assert_eq!(decoder.decode(&mut buf).unwrap(), Some(HeaderLine::Field(Bytes::from_static(b"ETag: trailer\r\n"))));
    }

    #[test]
    fn replaced_buffer_is_scanned_from_start() {
        let mut decoder = HeaderLineDecoder::new();

        let mut partial = BytesMut::from(&b"ETag: abc"[..]);
        assert_eq!(decoder.decode(&mut partial).unwrap(), None);

        let mut fresh = BytesMut::from(&b"A: b\r\nServer: S3\r\n"[..]);
        let lines = decode_all(&mut decoder, &mut fresh);

        assert_eq!(
            lines,
            vec![
                HeaderLine::Field(Bytes::from_static(b"A: b\r\n")),
                HeaderLine::Field(Bytes::from_static(b"Server: S3\r\n")),
            ]
        );
        assert!(fresh.is_empty());
    }

    #[test]
    fn too_long_partial_line() {
        let mut buf = BytesMut::from(&b"x-amz-meta-long: 0123456789"[..]);
        let mut decoder = HeaderLineDecoder::with_max_line_bytes(16);

        let error = decoder.decode(&mut buf).unwrap_err();

        assert!(matches!(error, HeaderLineError::TooLongLine { current_size: 27, max_size: 16 }));
    }

    #[test]
    fn too_long_complete_line() {
        let mut buf = BytesMut::from(&b"ETag: 0123456789abcdef\r\n"[..]);
        let mut decoder = HeaderLineDecoder::with_max_line_bytes(16);

        let error = decoder.decode(&mut buf).unwrap_err();

        assert!(matches!(error, HeaderLineError::TooLongLine { current_size: 24, max_size: 16 }));
    }

    #[test]
    fn partial_line_at_eof() {
        let mut buf = BytesMut::from(&b"ETag: abc"[..]);
        let mut decoder = HeaderLineDecoder::new();

        assert_eq!(decoder.decode_eof(&mut buf).unwrap(), None);
        assert_eq!(&buf[..], b"ETag: abc");
    }
}

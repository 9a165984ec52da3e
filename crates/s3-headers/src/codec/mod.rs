//! Splitting a raw response byte stream into header lines
//!
//! Transports receive bytes in whatever chunks the socket hands them. The
//! [`HeaderLineDecoder`] buffers those chunks through `tokio_util`'s [`Decoder`](tokio_util::codec::Decoder)
//! contract and yields one complete, CRLF terminated header line at a time, followed by
//! [`HeaderLine::End`] for the blank line closing the header block.
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use micro_s3_headers::codec::{HeaderLine, HeaderLineDecoder};
//! use tokio_util::codec::Decoder;
//!
//! let mut decoder = HeaderLineDecoder::new();
//! let mut buffer = BytesMut::from(&b"ETag: \"abc\"\r\n\r\nbody"[..]);
//!
//! assert_eq!(decoder.decode(&mut buffer).unwrap(), Some(HeaderLine::Field("ETag: \"abc\"\r\n".into())));
//! assert_eq!(decoder.decode(&mut buffer).unwrap(), Some(HeaderLine::End));
//! assert_eq!(decoder.decode(&mut buffer).unwrap(), None);
//! assert_eq!(&buffer[..], b"body");
//! ```

mod header_line_decoder;

pub use header_line_decoder::HeaderLine;
pub use header_line_decoder::HeaderLineDecoder;
pub use header_line_decoder::MAX_LINE_BYTES;

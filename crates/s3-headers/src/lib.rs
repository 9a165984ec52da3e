//! An incremental, fixed-capacity parser for object storage response headers
//!
//! This crate turns raw HTTP response header lines, delivered one at a time by a
//! streaming transport, into a structured set of response properties: request ids,
//! content type and length, server, ETag, last-modified time and the user supplied
//! `x-amz-meta-*` metadata.
//!
//! All header text is copied into buffers sized once at construction. Nothing is
//! allocated per header line, so running out of room in the middle of a transfer
//! only drops the header that did not fit instead of failing the whole request.
//!
//! # Example
//!
//! ```
//! use micro_s3_headers::handler::ResponseHeadersHandler;
//! use micro_s3_headers::protocol::NameValue;
//!
//! let mut handler = ResponseHeadersHandler::new();
//! handler.add(b"ETag: \"abc123\"\r\n");
//! handler.add(b"x-amz-meta-foo: bar\r\n");
//! handler.add(b"Content-Length: 42\r\n");
//! handler.finalize(&None::<i64>);
//!
//! let properties = handler.properties();
//! assert_eq!(properties.etag, Some("\"abc123\""));
//! assert_eq!(properties.content_length, 42);
//! assert_eq!(properties.last_modified, -1);
//! assert_eq!(properties.metadata.iter().collect::<Vec<_>>(), vec![NameValue::new("foo", "bar")]);
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several key modules:
//!
//! - [`buffer`]: the append-only [`buffer::StringPacker`] every stored value lives in
//! - [`handler`]: the [`handler::ResponseHeadersHandler`] accumulator and the
//!   [`handler::LastModifiedSource`] seam to the transport
//! - [`protocol`]: recognized header vocabulary, the [`protocol::ResponseProperties`] view
//!   and error types
//! - [`codec`]: [`codec::HeaderLineDecoder`], splitting a raw byte stream into header lines
//! - [`config`]: capacity limits fixed at construction
//!
//! # Error Handling
//!
//! A malformed, unrecognized or oversized header is never an error. [`handler::ResponseHeadersHandler::add`]
//! reports what happened through [`protocol::AddOutcome`], and the affected field simply
//! stays absent. Errors only exist at the edges:
//!
//! - [`protocol::ConfigError`]: invalid capacity configuration
//! - [`protocol::LastModifiedError`]: the transport could not provide a last-modified time
//! - [`protocol::HeaderLineError`]: the line decoder hit an oversized line or I/O failure
//!
//! # Limitations
//!
//! - The status line is not parsed, it is ignored like any unrecognized line
//! - Header names are matched case-sensitively against the exact literals
//! - Trailer headers delivered after the body are ignored

pub mod buffer;
pub mod codec;
pub mod config;
pub mod handler;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;

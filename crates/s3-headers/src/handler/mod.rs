//! Accumulating response properties from header lines
//!
//! The [`ResponseHeadersHandler`] is created once per response, fed every header
//! line in arrival order through [`ResponseHeadersHandler::add`], and sealed once with
//! [`ResponseHeadersHandler::finalize`] when the header block ends. At that point it
//! asks the transport for the last-modified time through [`LastModifiedSource`].

mod last_modified;
mod response_headers_handler;

pub use last_modified::FromFn;
pub use last_modified::LastModifiedSource;
pub use last_modified::from_fn;
pub use response_headers_handler::ResponseHeadersHandler;

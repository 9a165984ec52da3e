//! Where the last-modified time comes from.
//!
//! The handler does not parse `Last-Modified` itself. The transport already tracks it
//! while processing the response, so the handler asks it exactly once, when the header
//! block is finalized.

use chrono::DateTime;
use http::HeaderMap;
use http::header::LAST_MODIFIED;

use crate::protocol::LastModifiedError;

/// A transport-side view able to report the response's last-modified time.
pub trait LastModifiedSource {
    /// Returns the last-modified time in seconds since the unix epoch.
    fn last_modified(&self) -> Result<i64, LastModifiedError>;
}

/// A transport that already resolved the time, or knows it has none
impl LastModifiedSource for Option<i64> {
    fn last_modified(&self) -> Result<i64, LastModifiedError> {
        self.ok_or(LastModifiedError::Missing)
    }
}

/// A transport that kept the response headers it saw, parsing the HTTP-date in
/// `Last-Modified`
impl LastModifiedSource for HeaderMap {
    fn last_modified(&self) -> Result<i64, LastModifiedError> {
        let value = self.get(LAST_MODIFIED).ok_or(LastModifiedError::Missing)?;
        let value = value.to_str().map_err(LastModifiedError::invalid_value)?;

        let time = DateTime::parse_from_rfc2822(value.trim())
            .map_err(|e| LastModifiedError::invalid_value(format!("value {value} is not an http date: {e}")))?;
        Ok(time.timestamp())
    }
}

/// Adapts a closure into a [`LastModifiedSource`].
///
/// ```
/// use micro_s3_headers::handler::{from_fn, LastModifiedSource};
///
/// let source = from_fn(|| Ok(1_700_000_000));
/// assert_eq!(source.last_modified(), Ok(1_700_000_000));
/// ```
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: Fn() -> Result<i64, LastModifiedError>,
{
    FromFn { f }
}

/// See [`from_fn`]
#[derive(Debug, Clone, Copy)]
pub struct FromFn<F> {
    f: F,
}

impl<F> LastModifiedSource for FromFn<F>
where
    F: Fn() -> Result<i64, LastModifiedError>,
{
    fn last_modified(&self) -> Result<i64, LastModifiedError> {
        (self.f)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn option_source() {
        assert_eq!(Some(42_i64).last_modified(), Ok(42));
        assert_eq!(None::<i64>.last_modified(), Err(LastModifiedError::Missing));
    }

    #[test]
    fn header_map_source() {
        let mut headers = HeaderMap::new();
        headers.insert(LAST_MODIFIED, HeaderValue::from_static("Sun, 06 Nov 1994 08:49:37 GMT"));

        assert_eq!(headers.last_modified(), Ok(784_111_777));
    }

    #[test]
    fn header_map_without_last_modified() {
        let mut headers = HeaderMap::new();
        headers.insert(http::header::ETAG, HeaderValue::from_static("\"abc\""));

        assert_eq!(headers.last_modified(), Err(LastModifiedError::Missing));
    }

    #[test]
    fn header_map_with_bogus_date() {
        let mut headers = HeaderMap::new();
        headers.insert(LAST_MODIFIED, HeaderValue::from_static("yesterday"));

        assert!(matches!(headers.last_modified(), Err(LastModifiedError::InvalidValue { .. })));
    }

    #[test]
    fn closure_source() {
        let source = from_fn(|| Err(LastModifiedError::unavailable("connection gone")));

        assert_eq!(source.last_modified(), Err(LastModifiedError::Unavailable { reason: "connection gone".to_string() }));
    }
}

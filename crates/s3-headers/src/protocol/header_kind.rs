//! The header names this crate understands.
//!
//! Names are compared byte for byte against the literals below. Object storage
//! servers send these exact spellings, and anything else is ignored.

use std::fmt;

/// Prefix shared by every user metadata header
pub const METADATA_HEADER_PREFIX: &str = "x-amz-meta-";

/// A recognized response header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderKind {
    /// `x-amz-request-id`
    RequestId,
    /// `x-amz-id-2`
    RequestId2,
    /// `Content-Type`
    ContentType,
    /// `Content-Length`
    ContentLength,
    /// `Server`
    Server,
    /// `ETag`
    ETag,
    /// Any header starting with `x-amz-meta-`
    Meta,
}

impl HeaderKind {
    /// Looks up a header name, returning `None` for names this crate does not handle.
    pub fn classify(name: &[u8]) -> Option<Self> {
        let kind = match name {
            b"x-amz-request-id" => Self::RequestId,
            b"x-amz-id-2" => Self::RequestId2,
            b"Content-Type" => Self::ContentType,
            b"Content-Length" => Self::ContentLength,
            b"Server" => Self::Server,
            b"ETag" => Self::ETag,
            _ if name.starts_with(METADATA_HEADER_PREFIX.as_bytes()) => Self::Meta,
            _ => return None,
        };
        Some(kind)
    }

    /// Returns the metadata key carried by a `x-amz-meta-*` header name
    pub fn metadata_key(name: &[u8]) -> Option<&[u8]> {
        name.strip_prefix(METADATA_HEADER_PREFIX.as_bytes())
    }

    /// The literal header name, or the prefix for [`HeaderKind::Meta`]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RequestId => "x-amz-request-id",
            Self::RequestId2 => "x-amz-id-2",
            Self::ContentType => "Content-Type",
            Self::ContentLength => "Content-Length",
            Self::Server => "Server",
            Self::ETag => "ETag",
            Self::Meta => METADATA_HEADER_PREFIX,
        }
    }
}

impl fmt::Display for HeaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use std::io;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be greater than zero")]
    ZeroCapacity { name: &'static str },

    #[error("max_metadata_count is {max_metadata_count} but metadata_capacity is zero")]
    MetadataWithoutStorage { max_metadata_count: usize },
}

impl ConfigError {
    pub fn zero_capacity(name: &'static str) -> Self {
        Self::ZeroCapacity { name }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LastModifiedError {
    #[error("last-modified time is not available")]
    Missing,

    #[error("invalid last-modified value: {reason}")]
    InvalidValue { reason: String },

    #[error("last-modified time can't be retrieved: {reason}")]
    Unavailable { reason: String },
}

impl LastModifiedError {
    pub fn invalid_value<S: ToString>(str: S) -> Self {
        Self::InvalidValue { reason: str.to_string() }
    }

    pub fn unavailable<S: ToString>(str: S) -> Self {
        Self::Unavailable { reason: str.to_string() }
    }
}

#[derive(Error, Debug)]
pub enum HeaderLineError {
    #[error("header line size too large, current: {current_size} exceed the limit {max_size}")]
    TooLongLine { current_size: usize, max_size: usize },

    #[error("header line must end with CRLF")]
    BareLineFeed,

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl HeaderLineError {
    pub fn too_long_line(current_size: usize, max_size: usize) -> Self {
        Self::TooLongLine { current_size, max_size }
    }
}

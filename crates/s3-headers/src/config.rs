//! Capacity limits for a [`ResponseHeadersHandler`](crate::handler::ResponseHeadersHandler).
//!
//! All limits are fixed when the handler is built. The defaults follow the object
//! storage protocol: room for five 128 byte properties plus terminators, and enough
//! metadata space for the largest metadata block a server may send back.

use crate::ensure;
use crate::protocol::{ConfigError, METADATA_HEADER_PREFIX};

/// Bytes reserved for the simple response properties: five values of up to 128
/// bytes, each followed by its terminator
pub const PROPERTY_STRINGS_SIZE: usize = 5 * 129;

/// Maximum total size of user metadata on an object
pub const MAX_METADATA_SIZE: usize = 2 * 1024;

/// Maximum number of metadata entries, assuming the smallest possible
/// `x-amz-meta-nv` header for each of them
pub const MAX_METADATA_COUNT: usize = MAX_METADATA_SIZE / (METADATA_HEADER_PREFIX.len() + "nv".len());

/// Bytes reserved for metadata names and values
pub const COMPACTED_METADATA_BUFFER_SIZE: usize = MAX_METADATA_COUNT * (METADATA_HEADER_PREFIX.len() + "n: v".len() + 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerConfig {
    property_capacity: usize,
    metadata_capacity: usize,
    max_metadata_count: usize,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            property_capacity: PROPERTY_STRINGS_SIZE,
            metadata_capacity: COMPACTED_METADATA_BUFFER_SIZE,
            max_metadata_count: MAX_METADATA_COUNT,
        }
    }
}

impl HandlerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the byte capacity of the simple property buffer
    #[must_use]
    pub fn with_property_capacity(mut self, capacity: usize) -> Self {
        self.property_capacity = capacity;
        self
    }

    /// Sets the byte capacity of the metadata name/value buffer
    #[must_use]
    pub fn with_metadata_capacity(mut self, capacity: usize) -> Self {
        self.metadata_capacity = capacity;
        self
    }

    /// Sets how many metadata entries are kept; `0` disables metadata collection
    #[must_use]
    pub fn with_max_metadata_count(mut self, count: usize) -> Self {
        self.max_metadata_count = count;
        self
    }

    #[inline]
    pub fn property_capacity(&self) -> usize {
        self.property_capacity
    }

    #[inline]
    pub fn metadata_capacity(&self) -> usize {
        self.metadata_capacity
    }

    #[inline]
    pub fn max_metadata_count(&self) -> usize {
        self.max_metadata_count
    }

    /// Checks that the limits describe a usable handler.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - the property capacity is zero
    /// - metadata entries are allowed but the metadata capacity is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure!(self.property_capacity > 0, ConfigError::zero_capacity("property_capacity"));
        ensure!(
            self.max_metadata_count == 0 || self.metadata_capacity > 0,
            ConfigError::MetadataWithoutStorage { max_metadata_count: self.max_metadata_count }
        );
        Ok(())
    }
}

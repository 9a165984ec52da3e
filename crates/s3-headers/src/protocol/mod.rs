//! Protocol vocabulary and the types handed out by the handler.
//!
//! - **Header names** ([`header_kind`]): the recognized header literals
//!   - [`HeaderKind`]: one variant per recognized header, plus the metadata family
//!
//! - **Response properties** ([`properties`]): the structured result
//!   - [`ResponseProperties`]: borrowed view over everything that was captured
//!   - [`Metadata`] and [`NameValue`]: the `x-amz-meta-*` entries in arrival order
//!
//! - **Outcomes** ([`outcome`]): what a single header line did
//!   - [`AddOutcome`]: captured, ignored or dropped
//!   - [`DropReason`]: why a line left no trace
//!
//! - **Error Handling** ([`error`]): errors at the edges of the crate
//!   - [`ConfigError`], [`LastModifiedError`], [`HeaderLineError`]

mod header_kind;
pub use header_kind::HeaderKind;
pub use header_kind::METADATA_HEADER_PREFIX;

mod properties;
pub(crate) use properties::MetadataSlot;
pub(crate) use properties::PropertySlots;
pub use properties::Metadata;
pub use properties::MetadataIter;
pub use properties::NameValue;
pub use properties::ResponseProperties;
pub use properties::UNKNOWN;

mod outcome;
pub use outcome::AddOutcome;
pub use outcome::DropReason;

mod error;
pub use error::ConfigError;
pub use error::HeaderLineError;
pub use error::LastModifiedError;

//! Fixed-capacity text storage for parsed header values
//!
//! Every value the handler keeps is copied into a [`StringPacker`]: one byte array
//! allocated at construction with a single cursor bumping forward. Stored values are
//! addressed by [`PackedStr`] offsets, so they stay valid and unmoved for as long as
//! the packer lives.

mod string_packer;

pub use string_packer::PackedStr;
pub use string_packer::StringPacker;

//! Error types

mod metadata;

pub use metadata::*;

/// Result alias used throughout the crate.
pub type Result<T, E = MetadataError> = std::result::Result<T, E>;

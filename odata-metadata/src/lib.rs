//! OData resource metadata library
//!
//! Computes the metadata of OData entities (id, edit and read links, ETag,
//! media and named streams, bound actions and functions, navigation and
//! association links) following the OData URL conventions, while letting
//! any value supplied on the wire take precedence over the computed one.

pub mod config;
pub mod edm;
pub mod error;
pub mod metadata;
pub mod model;
pub mod uri;

pub use config::ServiceConfig;
pub use error::MetadataError;
pub use error::Result;

//! Resource metadata computation
//!
//! A [`ConventionalMetadataBuilder`] computes the id, links, ETag, streams
//! and operations of one resource from its data, the model and the service
//! configuration, caching every value it computes. Values supplied on the
//! wire are always returned as-is.

mod builder;
mod context;
mod conventional;
mod navigation;
mod operations;
mod serialization_info;
mod service;
mod type_context;

pub use builder::NullMetadataBuilder;
pub use builder::ResourceMetadataBuilder;
pub use context::*;
pub use conventional::*;
pub use navigation::*;
pub use operations::*;
pub use serialization_info::*;
pub use service::*;
pub use type_context::*;

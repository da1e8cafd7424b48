//! Entity data model (EDM) access
//!
//! The metadata builders only need a small, queryable view of the model:
//! entity types with their keys and properties, navigation sources,
//! bound operations and optimistic concurrency annotations. [`EdmModel`]
//! is that view, and [`InMemoryModel`] is a ready-made implementation
//! that can be assembled in code or deserialized from JSON.

mod model;
mod operation;
mod path;
mod selected;
mod source;
mod types;

pub use model::*;
pub use operation::*;
pub use path::*;
pub use selected::*;
pub use source::*;
pub use types::*;

//! URI construction
//!
//! Literal formatting, key serialization and the conventional URI builder
//! that composes entity set, entity, link and operation URIs.

mod builder;
mod convention;
mod escape;
mod key;
mod literal;

pub use builder::*;
pub use convention::*;
pub use escape::escape_segment;
pub use key::*;
pub use literal::*;

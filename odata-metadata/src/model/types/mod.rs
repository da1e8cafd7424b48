//! Value types carried by resources

mod spatial;
mod stream;

pub use spatial::*;
pub use stream::*;

//! Resource-side values supplied on the wire or by the user

mod operation;
mod property;
mod resource;
pub mod types;
mod value;
mod wire;

pub use operation::*;
pub use property::*;
pub use resource::*;
pub use value::*;
pub use wire::*;

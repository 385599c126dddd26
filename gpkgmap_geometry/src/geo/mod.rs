#![allow(clippy::module_inception)]

mod geometry;
mod properties;
mod types;
mod value;

pub use geometry::*;
pub use properties::*;
pub use types::*;
pub use value::*;

//! Display shapes: what a feature geometry becomes once it is expressed in map
//! coordinates, before it is added to a map.

mod converter;
mod map_shape;
mod options;
mod shape_type;

pub use converter::*;
pub use map_shape::*;
pub use options::*;
pub use shape_type::*;

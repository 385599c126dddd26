//! The map widget surface the pipeline draws on.

mod add_shape;
mod camera;
mod map_type;
mod overlay;
mod recording;
mod view;

pub use add_shape::*;
pub use camera::*;
pub use map_type::*;
pub use overlay::*;
pub use recording::*;
pub use view::*;

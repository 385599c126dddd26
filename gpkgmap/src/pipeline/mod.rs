//! The "map ready" pipeline: load, overlay, draw, fit.

mod feature_layer;
mod icon_policy;
mod loader;
mod map_ready;
mod summary;
mod tile_overlay;
mod viewport;

pub use feature_layer::*;
pub use icon_policy::*;
pub use loader::*;
pub use map_ready::*;
pub use summary::*;
pub use tile_overlay::*;
pub use viewport::*;

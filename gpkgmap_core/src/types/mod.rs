//! Contains types like positions, bounding boxes, tile coordinates and blobs.

mod blob;
pub use blob::*;

mod bounding_box;
pub use bounding_box::*;

mod lat_lng;
pub use lat_lng::*;

mod lat_lng_bounds;
pub use lat_lng_bounds::*;

mod tile_coord;
pub use tile_coord::*;

//! Core types shared by all gpkgmap crates.
//!
//! - [`LatLng`], [`LatLngBounds`]: geodetic positions and rectangles as the map widget sees them
//! - [`BoundingBox`]: a rectangle in arbitrary projection units
//! - [`Projection`], [`ProjectionTransform`], [`CoordinateTransform`]: reprojection between EPSG:3857 and EPSG:4326
//! - [`TileCoord`], [`Blob`]: tile addressing and raw tile bytes
//! - [`MapError`]: the typed failure classes carried inside `anyhow::Error`

mod error;
pub use error::*;

pub mod projection;
pub use projection::*;

pub mod types;
pub use types::*;

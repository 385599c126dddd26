//! Geometries, attributes and display shapes.
//!
//! - [`geo`]: geometry and attribute model of a feature row
//! - [`gpkg`]: the GeoPackage binary geometry encoding (`GP` header + WKB)
//! - [`shape`]: display shapes in map coordinates and the [`MapShapeConverter`]

pub mod geo;
pub mod gpkg;
pub mod shape;

pub use geo::*;
pub use gpkg::*;
pub use shape::*;

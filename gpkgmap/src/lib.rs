//! Puts a GeoPackage on a map.
//!
//! When the host map becomes ready, [`MapReadyPipeline::on_map_ready`] runs four steps
//! in order:
//! 1. [`ContainerLoader`] imports the package into a store and opens it,
//! 2. [`TileOverlayBuilder`] adds the first tile table as an overlay below the features,
//! 3. [`FeatureLayerRenderer`] draws every feature table, points as titled markers,
//! 4. [`ViewportFitter`] centers the camera on the tile data.
//!
//! The map itself is abstracted by [`MapView`]; [`RecordingMap`] is an in-memory
//! implementation.

pub mod config;
pub use config::*;

pub mod map;
pub use map::*;

pub mod pipeline;
pub use pipeline::*;

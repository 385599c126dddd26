//! GeoPackage access for gpkgmap.
//!
//! - [`GeoPackageManager`] keeps imported packages in a store directory and opens them.
//! - [`GeoPackage`] implements [`GeoContainer`]: it lists tile and feature tables and
//!   hands out [`TileDataset`]s and [`FeatureDataset`]s.
//! - Feature rows are read through a [`FeatureCursor`]; wrap it in a [`ScopedCursor`] to
//!   have it closed on every exit path.
//!
//! # Example
//! ```rust,no_run
//! use gpkgmap_container::*;
//! use std::{fs::File, path::Path};
//!
//! fn main() -> anyhow::Result<()> {
//!     let manager = GeoPackageManager::new(Path::new("/tmp/gpkg-store"))?;
//!     manager.import_geopackage("StLouis", &mut File::open("StLouis.gpkg")?, true)?;
//!     let package = manager.open("StLouis")?;
//!     for table in package.feature_tables()? {
//!         let dataset = package.feature_dataset(&table)?;
//!         let mut cursor = ScopedCursor::new(dataset.query_for_all()?);
//!         while let Some(row) = cursor.next_row()? {
//!             println!("{table} {}: {:?}", row.id, row.geometry);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Features
//! - `test`: exposes the [`testing`] module for downstream integration tests.

mod geopackage;
pub use geopackage::*;

mod types;
pub use types::*;

#[cfg(any(test, feature = "test"))]
pub mod testing;

//! The surface the map pipeline consumes. [`GeoPackage`](crate::GeoPackage) is the
//! production implementation; tests substitute their own.

use super::{FeatureRow, Tile};
use anyhow::Result;
use gpkgmap_core::{BoundingBox, Projection, TileCoord};

/// An opened container holding tile and feature datasets.
pub trait GeoContainer {
	fn name(&self) -> &str;

	/// Names of all tile tables, ordered by table name.
	fn tile_tables(&self) -> Result<Vec<String>>;

	/// Names of all feature tables, ordered by table name.
	fn feature_tables(&self) -> Result<Vec<String>>;

	fn tile_dataset(&self, table: &str) -> Result<Box<dyn TileDataset>>;

	fn feature_dataset(&self, table: &str) -> Result<Box<dyn FeatureDataset>>;
}

/// A raster layer addressable by zoom level.
pub trait TileDataset {
	fn name(&self) -> &str;

	/// Projection of the tile matrix set.
	fn projection(&self) -> &Projection;

	/// Extent of the tiles stored at `zoom`, in units of [`projection`](Self::projection).
	fn bounding_box(&self, zoom: u8) -> Result<BoundingBox>;

	fn tile_provider(&self) -> Result<Box<dyn TileProvider>>;
}

/// A vector layer.
pub trait FeatureDataset {
	fn name(&self) -> &str;

	/// Projection of the geometry column.
	fn projection(&self) -> &Projection;

	/// Opens a cursor over every row.
	fn query_for_all(&self) -> Result<Box<dyn FeatureCursor>>;
}

/// A resource-bound iterator over feature rows. It must be closed after use.
pub trait FeatureCursor {
	/// Returns the next row, or `None` when the dataset is exhausted.
	fn next_row(&mut self) -> Result<Option<FeatureRow>>;

	/// Releases the underlying resources. Calling it twice has no further effect.
	fn close(&mut self);
}

/// Serves tiles in XYZ addressing.
pub trait TileProvider {
	/// Name of the tile table this provider reads.
	fn name(&self) -> &str;

	fn has_tile(&self, coord: &TileCoord) -> Result<bool>;

	fn get_tile(&self, coord: &TileCoord) -> Result<Option<Tile>>;
}

impl std::fmt::Debug for dyn TileDataset {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "TileDataset({}, {:?})", self.name(), self.projection())
	}
}

impl std::fmt::Debug for dyn TileProvider {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "TileProvider({})", self.name())
	}
}

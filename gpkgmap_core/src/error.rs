use thiserror::Error;

/// Typed failures of the map pipeline.
///
/// Functions return `anyhow::Result`; whenever one of these conditions is detected the
/// variant is wrapped into the `anyhow::Error`, so callers can recover it with
/// `err.downcast_ref::<MapError>()` even after context has been added.
///
/// The variants fall into three classes:
/// - container errors: the package cannot be stored, found or read,
/// - missing data: the package is readable but lacks something the pipeline needs,
/// - conversion errors: geometry, projection or tile grid cannot be expressed on the map.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
	#[error("GeoPackage '{0}' does not exist")]
	ContainerNotFound(String),

	#[error("GeoPackage '{0}' already exists")]
	ContainerExists(String),

	#[error("invalid GeoPackage '{name}': {reason}")]
	InvalidContainer { name: String, reason: String },

	#[error("invalid GeoPackage name '{0}'")]
	InvalidName(String),

	#[error("no tile data available in GeoPackage '{0}'")]
	NoTileData(String),

	#[error("tile table '{table}' has no tiles at zoom level {zoom}")]
	NoTilesAtZoom { table: String, zoom: u8 },

	#[error("feature {row} in '{dataset}' has no string attribute '{attribute}'")]
	MissingAttribute {
		dataset: String,
		row: String,
		attribute: String,
	},

	#[error("feature {row} in '{dataset}' has no geometry")]
	MissingGeometry { dataset: String, row: String },

	#[error("cannot build bounds from zero positions")]
	EmptyBounds,

	#[error("unsupported projection transformation from {from} to {to}")]
	UnsupportedProjection { from: String, to: String },

	#[error("unsupported geometry type: {0}")]
	UnsupportedGeometry(String),

	#[error("tile table '{0}' has no tile matrix aligned with the XYZ grid")]
	UnsupportedTileGrid(String),

	#[error("invalid geometry data: {0}")]
	InvalidGeometryData(String),
}

impl MapError {
	/// Returns `true` for failures caused by the container file or the managed store.
	pub fn is_container_error(&self) -> bool {
		matches!(
			self,
			MapError::ContainerNotFound(_)
				| MapError::ContainerExists(_)
				| MapError::InvalidContainer { .. }
				| MapError::InvalidName(_)
		)
	}

	/// Returns `true` for failures caused by data the pipeline needs but cannot find.
	pub fn is_missing_data(&self) -> bool {
		matches!(
			self,
			MapError::NoTileData(_)
				| MapError::NoTilesAtZoom { .. }
				| MapError::MissingAttribute { .. }
				| MapError::MissingGeometry { .. }
				| MapError::EmptyBounds
		)
	}

	/// Returns `true` for failures while converting geometries, projections or tile grids.
	pub fn is_conversion_error(&self) -> bool {
		!self.is_container_error() && !self.is_missing_data()
	}
}

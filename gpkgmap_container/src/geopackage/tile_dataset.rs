use super::{
	SqlitePool, XyzTileProvider, quote_identifier, spatial_ref::projection_for_srs, tile_matrix::read_tile_matrices,
	tile_matrix::read_tile_matrix_set,
};
use crate::{TileDataset, TileMatrix, TileProvider};
use anyhow::{Context, Result};
use gpkgmap_core::{BoundingBox, MapError, Projection};
use r2d2_sqlite::rusqlite::params;
use std::fmt::Debug;

/// A tile table of a GeoPackage together with its tile matrix set and matrices.
pub struct GeoPackageTileDataset {
	table: String,
	pool: SqlitePool,
	projection: Projection,
	matrix_set: BoundingBox,
	matrices: Vec<TileMatrix>,
}

impl GeoPackageTileDataset {
	pub(crate) fn load(pool: SqlitePool, package: &str, table: &str) -> Result<GeoPackageTileDataset> {
		log::debug!("load tile table '{table}' of '{package}'");

		let conn = pool.get()?;
		let (srs_id, matrix_set) = read_tile_matrix_set(&conn, package, table)?;
		let projection = projection_for_srs(&conn, package, srs_id)?;
		let matrices = read_tile_matrices(&conn, table)?;
		drop(conn);

		log::trace!(
			"tile table '{table}': {projection}, {matrix_set:?}, zoom levels {:?}",
			matrices.iter().map(|m| m.zoom_level).collect::<Vec<_>>()
		);

		Ok(GeoPackageTileDataset {
			table: table.to_string(),
			pool,
			projection,
			matrix_set,
			matrices,
		})
	}

	pub fn matrix_set(&self) -> &BoundingBox {
		&self.matrix_set
	}

	pub fn matrices(&self) -> &[TileMatrix] {
		&self.matrices
	}

	pub fn matrix(&self, zoom: u8) -> Option<&TileMatrix> {
		self.matrices.iter().find(|m| m.zoom_level == zoom)
	}

	fn no_tiles(&self, zoom: u8) -> anyhow::Error {
		MapError::NoTilesAtZoom {
			table: self.table.clone(),
			zoom,
		}
		.into()
	}
}

impl TileDataset for GeoPackageTileDataset {
	fn name(&self) -> &str {
		&self.table
	}

	fn projection(&self) -> &Projection {
		&self.projection
	}

	/// Extent of the columns and rows actually stored at `zoom`.
	fn bounding_box(&self, zoom: u8) -> Result<BoundingBox> {
		log::debug!("bounding box of '{}' at zoom {zoom}", self.table);

		let matrix = self.matrix(zoom).ok_or_else(|| self.no_tiles(zoom))?;

		let sql = format!(
			"SELECT MIN(tile_column), MIN(tile_row), MAX(tile_column), MAX(tile_row) FROM {} WHERE zoom_level = ?1",
			quote_identifier(&self.table)
		);
		log::trace!("SQL: {sql}");

		let conn = self.pool.get()?;
		let range = conn
			.query_row(&sql, params![zoom], |row| {
				Ok([
					row.get::<_, Option<i64>>(0)?,
					row.get::<_, Option<i64>>(1)?,
					row.get::<_, Option<i64>>(2)?,
					row.get::<_, Option<i64>>(3)?,
				])
			})
			.with_context(|| format!("querying tile range of '{}' at zoom {zoom}", self.table))?;

		let [Some(x0), Some(y0), Some(x1), Some(y1)] = range else {
			return Err(self.no_tiles(zoom));
		};

		let max_x = i64::from(matrix.matrix_width.saturating_sub(1));
		let max_y = i64::from(matrix.matrix_height.saturating_sub(1));
		let clamp = |v: i64, max: i64| v.clamp(0, max) as u32;

		matrix.tile_range_bounds(
			&self.matrix_set,
			(clamp(x0, max_x), clamp(y0, max_y)),
			(clamp(x1, max_x), clamp(y1, max_y)),
		)
	}

	fn tile_provider(&self) -> Result<Box<dyn TileProvider>> {
		let provider = XyzTileProvider::new(
			self.pool.clone(),
			&self.table,
			&self.projection,
			&self.matrix_set,
			&self.matrices,
		)?;
		Ok(Box::new(provider))
	}
}

impl Debug for GeoPackageTileDataset {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("GeoPackageTileDataset")
			.field("table", &self.table)
			.field("projection", &self.projection)
			.field("matrix_set", &self.matrix_set)
			.finish()
	}
}

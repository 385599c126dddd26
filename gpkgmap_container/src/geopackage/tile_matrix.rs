use super::quote_identifier;
use anyhow::{Context, Result, ensure};
use gpkgmap_core::{BoundingBox, MapError};
use r2d2_sqlite::rusqlite::{Connection, OptionalExtension, params};

/// One row of `gpkg_tile_matrix`: the grid of a tile table at one zoom level.
///
/// Row 0 is the top row of the grid, at the `max_y` edge of the tile matrix set.
#[derive(Clone, Debug, PartialEq)]
pub struct TileMatrix {
	pub zoom_level: u8,
	pub matrix_width: u32,
	pub matrix_height: u32,
	pub tile_width: u32,
	pub tile_height: u32,
	pub pixel_x_size: f64,
	pub pixel_y_size: f64,
}

impl TileMatrix {
	/// Width of one tile in projection units.
	pub fn tile_span_x(&self) -> f64 {
		f64::from(self.tile_width) * self.pixel_x_size
	}

	/// Height of one tile in projection units.
	pub fn tile_span_y(&self) -> f64 {
		f64::from(self.tile_height) * self.pixel_y_size
	}

	/// Extent of the tiles from `(min_column, min_row)` to `(max_column, max_row)`
	/// inclusive, placed in the matrix set extent.
	pub fn tile_range_bounds(
		&self,
		matrix_set: &BoundingBox,
		(min_column, min_row): (u32, u32),
		(max_column, max_row): (u32, u32),
	) -> Result<BoundingBox> {
		let span_x = self.tile_span_x();
		let span_y = self.tile_span_y();
		BoundingBox::new(
			matrix_set.min_x + f64::from(min_column) * span_x,
			matrix_set.max_y - f64::from(max_row + 1) * span_y,
			matrix_set.min_x + f64::from(max_column + 1) * span_x,
			matrix_set.max_y - f64::from(min_row) * span_y,
		)
	}
}

/// Reads the `gpkg_tile_matrix_set` row of `table`: its srs_id and extent.
pub(crate) fn read_tile_matrix_set(conn: &Connection, package: &str, table: &str) -> Result<(i64, BoundingBox)> {
	let row = conn
		.query_row(
			"SELECT srs_id, min_x, min_y, max_x, max_y FROM gpkg_tile_matrix_set WHERE table_name = ?1",
			params![table],
			|row| {
				Ok((
					row.get::<_, i64>(0)?,
					[
						row.get::<_, f64>(1)?,
						row.get::<_, f64>(2)?,
						row.get::<_, f64>(3)?,
						row.get::<_, f64>(4)?,
					],
				))
			},
		)
		.optional()
		.context("reading gpkg_tile_matrix_set")?;

	let Some((srs_id, extent)) = row else {
		return Err(MapError::InvalidContainer {
			name: package.to_string(),
			reason: format!("tile table '{table}' has no entry in gpkg_tile_matrix_set"),
		}
		.into());
	};
	Ok((srs_id, BoundingBox::try_from(extent)?))
}

/// Reads all `gpkg_tile_matrix` rows of `table`, ordered by zoom level.
pub(crate) fn read_tile_matrices(conn: &Connection, table: &str) -> Result<Vec<TileMatrix>> {
	let mut stmt = conn.prepare(
		"SELECT zoom_level, matrix_width, matrix_height, tile_width, tile_height, pixel_x_size, pixel_y_size
		FROM gpkg_tile_matrix WHERE table_name = ?1 ORDER BY zoom_level",
	)?;
	let matrices = stmt
		.query_map(params![table], |row| {
			Ok(TileMatrix {
				zoom_level: row.get(0)?,
				matrix_width: row.get(1)?,
				matrix_height: row.get(2)?,
				tile_width: row.get(3)?,
				tile_height: row.get(4)?,
				pixel_x_size: row.get(5)?,
				pixel_y_size: row.get(6)?,
			})
		})?
		.collect::<Result<Vec<_>, _>>()
		.context("reading gpkg_tile_matrix")?;

	for m in &matrices {
		ensure!(
			m.pixel_x_size > 0.0 && m.pixel_y_size > 0.0 && m.tile_width > 0 && m.tile_height > 0,
			"tile matrix of {} at zoom level {} has a non-positive size",
			quote_identifier(table),
			m.zoom_level
		);
	}
	Ok(matrices)
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn tile_range_bounds() -> Result<()> {
		let matrix = TileMatrix {
			zoom_level: 2,
			matrix_width: 4,
			matrix_height: 4,
			tile_width: 256,
			tile_height: 256,
			pixel_x_size: 0.5,
			pixel_y_size: 0.25,
		};
		assert_eq!(matrix.tile_span_x(), 128.0);
		assert_eq!(matrix.tile_span_y(), 64.0);

		let set = BoundingBox::new(0.0, 0.0, 512.0, 256.0)?;
		let bbox = matrix.tile_range_bounds(&set, (1, 0), (2, 1))?;
		assert_eq!(bbox, BoundingBox::new(128.0, 128.0, 384.0, 256.0)?);
		Ok(())
	}
}

use super::{SqlitePool, quote_identifier};
use crate::{Tile, TileMatrix, TileProvider};
use anyhow::{Context, Result};
use gpkgmap_core::{Blob, BoundingBox, MapError, Projection, TileCoord};
use r2d2_sqlite::rusqlite::{OptionalExtension, params};
use std::{collections::BTreeMap, fmt::Debug};

/// Half the width of the Web Mercator world in meters.
pub const MERCATOR_HALF_WORLD: f64 = 20_037_508.342_789_244;

const ZOOM_TOLERANCE: f64 = 1e-6;
const OFFSET_TOLERANCE: f64 = 1e-3;

/// Where one XYZ zoom level lives in the stored grid.
#[derive(Clone, Debug, PartialEq)]
struct AlignedMatrix {
	zoom_level: u8,
	column_offset: i64,
	row_offset: i64,
	matrix_width: u32,
	matrix_height: u32,
	tile_width: u32,
	tile_height: u32,
}

impl AlignedMatrix {
	/// Aligns `matrix` with the XYZ pyramid, returning the XYZ zoom it corresponds to.
	fn align(matrix: &TileMatrix, matrix_set: &BoundingBox) -> Option<(u8, AlignedMatrix)> {
		let span_x = matrix.tile_span_x();
		let span_y = matrix.tile_span_y();
		if ((span_x - span_y) / span_x).abs() > ZOOM_TOLERANCE {
			return None;
		}

		let zoom = (2.0 * MERCATOR_HALF_WORLD / span_x).log2();
		if (zoom - zoom.round()).abs() > ZOOM_TOLERANCE || !(0.0..=30.0).contains(&zoom.round()) {
			return None;
		}

		let column_offset = (matrix_set.min_x + MERCATOR_HALF_WORLD) / span_x;
		let row_offset = (MERCATOR_HALF_WORLD - matrix_set.max_y) / span_y;
		if (column_offset - column_offset.round()).abs() > OFFSET_TOLERANCE
			|| (row_offset - row_offset.round()).abs() > OFFSET_TOLERANCE
		{
			return None;
		}

		Some((
			zoom.round() as u8,
			AlignedMatrix {
				zoom_level: matrix.zoom_level,
				column_offset: column_offset.round() as i64,
				row_offset: row_offset.round() as i64,
				matrix_width: matrix.matrix_width,
				matrix_height: matrix.matrix_height,
				tile_width: matrix.tile_width,
				tile_height: matrix.tile_height,
			},
		))
	}

	/// Maps an XYZ column/row onto the stored grid.
	fn locate(&self, coord: &TileCoord) -> Option<(i64, i64)> {
		let column = i64::from(coord.x) - self.column_offset;
		let row = i64::from(coord.y) - self.row_offset;
		let inside = (0..i64::from(self.matrix_width)).contains(&column) && (0..i64::from(self.matrix_height)).contains(&row);
		inside.then_some((column, row))
	}
}

/// Serves the tiles of a Web-Mercator tile table in XYZ addressing.
///
/// Every tile matrix whose tile span equals the XYZ tile span of some zoom level and
/// whose grid origin falls on an XYZ tile boundary is served; other matrices are skipped.
pub struct XyzTileProvider {
	table: String,
	pool: SqlitePool,
	levels: BTreeMap<u8, AlignedMatrix>,
}

impl XyzTileProvider {
	/// # Errors
	/// [`MapError::UnsupportedTileGrid`] if the tiles are not in Web Mercator or no
	/// matrix is aligned with the XYZ pyramid.
	pub fn new(
		pool: SqlitePool,
		table: &str,
		projection: &Projection,
		matrix_set: &BoundingBox,
		matrices: &[TileMatrix],
	) -> Result<XyzTileProvider> {
		if !projection.is_web_mercator() {
			log::warn!("tile table '{table}' uses {projection}, only Web Mercator tiles can be served");
			return Err(MapError::UnsupportedTileGrid(table.to_string()).into());
		}

		let mut levels = BTreeMap::new();
		for matrix in matrices {
			match AlignedMatrix::align(matrix, matrix_set) {
				Some((zoom, aligned)) => {
					log::trace!("'{table}' zoom level {} serves XYZ zoom {zoom}", matrix.zoom_level);
					if levels.insert(zoom, aligned).is_some() {
						log::warn!("'{table}' has several tile matrices for XYZ zoom {zoom}, using the last one");
					}
				}
				None => log::warn!(
					"skipping tile matrix {} of '{table}': not aligned with the XYZ grid",
					matrix.zoom_level
				),
			}
		}

		if levels.is_empty() {
			return Err(MapError::UnsupportedTileGrid(table.to_string()).into());
		}

		Ok(XyzTileProvider {
			table: table.to_string(),
			pool,
			levels,
		})
	}

	/// XYZ zoom levels this provider can serve.
	pub fn zoom_levels(&self) -> Vec<u8> {
		self.levels.keys().copied().collect()
	}

	fn lookup(&self, coord: &TileCoord) -> Option<(&AlignedMatrix, i64, i64)> {
		let matrix = self.levels.get(&coord.level)?;
		let (column, row) = matrix.locate(coord)?;
		Some((matrix, column, row))
	}

	fn read_tile_data(&self, zoom_level: u8, column: i64, row: i64) -> Result<Option<Vec<u8>>> {
		let sql = format!(
			"SELECT tile_data FROM {} WHERE zoom_level = ?1 AND tile_column = ?2 AND tile_row = ?3",
			quote_identifier(&self.table)
		);
		let conn = self.pool.get()?;
		let data = conn
			.query_row(&sql, params![zoom_level, column, row], |row| row.get::<_, Vec<u8>>(0))
			.optional()?;
		Ok(data)
	}
}

impl TileProvider for XyzTileProvider {
	fn name(&self) -> &str {
		&self.table
	}

	fn has_tile(&self, coord: &TileCoord) -> Result<bool> {
		Ok(self.get_tile(coord)?.is_some())
	}

	fn get_tile(&self, coord: &TileCoord) -> Result<Option<Tile>> {
		log::trace!("get tile {coord:?} from '{}'", self.table);

		let Some((matrix, column, row)) = self.lookup(coord) else {
			return Ok(None);
		};
		let data = self
			.read_tile_data(matrix.zoom_level, column, row)
			.with_context(|| format!("fetching tile {coord:?} from '{}'", self.table))?;

		Ok(data.map(|d| Tile::new(matrix.tile_width, matrix.tile_height, Blob::from(d))))
	}
}

impl Debug for XyzTileProvider {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("XyzTileProvider")
			.field("table", &self.table)
			.field("zoom_levels", &self.zoom_levels())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{GeoContainer, testing::*};
	use pretty_assertions::assert_eq;

	fn matrix(zoom_level: u8, pixel_size: f64) -> TileMatrix {
		TileMatrix {
			zoom_level,
			matrix_width: 2,
			matrix_height: 2,
			tile_width: 256,
			tile_height: 256,
			pixel_x_size: pixel_size,
			pixel_y_size: pixel_size,
		}
	}

	#[test]
	fn alignment() -> Result<()> {
		let world = BoundingBox::new(
			-MERCATOR_HALF_WORLD,
			-MERCATOR_HALF_WORLD,
			MERCATOR_HALF_WORLD,
			MERCATOR_HALF_WORLD,
		)?;
		let z1 = matrix(0, MERCATOR_HALF_WORLD / 256.0);
		let (zoom, aligned) = AlignedMatrix::align(&z1, &world).unwrap();
		assert_eq!(zoom, 1);
		assert_eq!((aligned.column_offset, aligned.row_offset), (0, 0));
		assert_eq!(aligned.locate(&TileCoord::new(1, 1, 1)?), Some((1, 1)));

		// a span of 1.5 XYZ tiles never lines up
		assert!(AlignedMatrix::align(&matrix(0, MERCATOR_HALF_WORLD / 256.0 * 1.5), &world).is_none());

		// the origin sits on a zoom 3 tile boundary but halfway through a zoom 2 tile
		let shifted = BoundingBox::new(-MERCATOR_HALF_WORLD * 0.75, 0.0, 0.0, MERCATOR_HALF_WORLD)?;
		assert!(AlignedMatrix::align(&matrix(1, MERCATOR_HALF_WORLD / 256.0 / 2.0), &shifted).is_none());
		let (zoom, aligned) = AlignedMatrix::align(&matrix(2, MERCATOR_HALF_WORLD / 256.0 / 4.0), &shifted).unwrap();
		assert_eq!(zoom, 3);
		assert_eq!((aligned.column_offset, aligned.row_offset), (1, 0));
		Ok(())
	}

	#[test]
	fn serves_stored_tiles() -> Result<()> {
		let package = st_louis()?;
		let provider = package.tile_dataset("stlouis_tiles")?.tile_provider()?;
		assert_eq!(provider.name(), "stlouis_tiles");

		let tile = provider
			.get_tile(&TileCoord::new(14, ST_LOUIS_X.0, ST_LOUIS_Y.0)?)?
			.unwrap();
		assert_eq!((tile.width, tile.height), (256, 256));
		assert_eq!(tile.data.as_slice(), fixture_tile_data(14, ST_LOUIS_X.0 - GRID_ORIGIN.0, ST_LOUIS_Y.0 - GRID_ORIGIN.1).as_slice());

		assert!(provider.has_tile(&TileCoord::new(14, ST_LOUIS_X.1, ST_LOUIS_Y.1)?)?);
		assert!(!provider.has_tile(&TileCoord::new(14, ST_LOUIS_X.1 + 1, ST_LOUIS_Y.1)?)?);
		assert!(!provider.has_tile(&TileCoord::new(14, 0, 0)?)?);
		assert!(!provider.has_tile(&TileCoord::new(3, 2, 3)?)?);
		assert!(provider.has_tile(&TileCoord::new(13, ST_LOUIS_X.0 / 2, ST_LOUIS_Y.0 / 2)?)?);
		Ok(())
	}

	#[test]
	fn rejects_unaligned_grids() -> Result<()> {
		let dir = tempfile::TempDir::new()?;
		let path = dir.path().join("skewed.gpkg");
		let mut builder = GeoPackageBuilder::create(&path)?;
		builder.add_tile_table(
			"skewed",
			3857,
			[0.0, 0.0, 1000.0, 1000.0],
			&[matrix(0, 1000.0 / 256.0)],
			&[(0, 0, 0)],
		)?;
		let package = crate::GeoPackage::open_path(&path)?;
		let err = package.tile_dataset("skewed")?.tile_provider().err().unwrap();
		assert_eq!(
			err.downcast_ref::<MapError>(),
			Some(&MapError::UnsupportedTileGrid("skewed".to_string()))
		);
		Ok(())
	}
}

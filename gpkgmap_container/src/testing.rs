//! Builders for small synthetic GeoPackages, shared by the tests of this crate and of
//! downstream crates (feature `test`).
//!
//! [`write_st_louis`] creates the reference package: one Web-Mercator tile table around
//! St. Louis and four feature tables (`Cafes`, `Parks`, `Pizza`, `Streets`).

use crate::{GeoPackage, TileMatrix, MERCATOR_HALF_WORLD};
use anyhow::{Context, Result};
use gpkgmap_core::{CoordinateTransform, Projection};
use gpkgmap_geometry::{GeoPackageGeometry, Geometry};
use r2d2_sqlite::rusqlite::{Connection, params};
use std::{fs, ops::Deref, path::Path};
use tempfile::TempDir;

/// XYZ columns of the stored zoom 14 tiles, inclusive.
pub const ST_LOUIS_X: (u32, u32) = (4086, 4088);
/// XYZ rows of the stored zoom 14 tiles, inclusive.
pub const ST_LOUIS_Y: (u32, u32) = (6281, 6283);
/// XYZ tile at zoom 14 that is cell (0, 0) of the tile matrix.
pub const GRID_ORIGIN: (u32, u32) = (4084, 6280);

pub fn xyz_tile_span(zoom: u8) -> f64 {
	2.0 * MERCATOR_HALF_WORLD / f64::from(1u32 << zoom)
}

pub fn xyz_tile_min_x(zoom: u8, x: u32) -> f64 {
	-MERCATOR_HALF_WORLD + f64::from(x) * xyz_tile_span(zoom)
}

pub fn xyz_tile_max_y(zoom: u8, y: u32) -> f64 {
	MERCATOR_HALF_WORLD - f64::from(y) * xyz_tile_span(zoom)
}

/// Bytes stored for the tile at `column`/`row` of the matrix at `zoom_level`.
pub fn fixture_tile_data(zoom_level: u8, column: u32, row: u32) -> Vec<u8> {
	let mut data = b"\x89PNG\r\n\x1a\n".to_vec();
	data.extend_from_slice(format!("{zoom_level}/{column}/{row}").as_bytes());
	data
}

/// Writes a GeoPackage with the core tables and the spatial reference systems
/// EPSG:4326, EPSG:3857, NONE:0 and NONE:-1.
pub struct GeoPackageBuilder {
	conn: Connection,
}

impl GeoPackageBuilder {
	pub fn create(path: &Path) -> Result<GeoPackageBuilder> {
		if path.exists() {
			fs::remove_file(path)?;
		}
		let conn = Connection::open(path).with_context(|| format!("creating {path:?}"))?;
		conn.execute_batch(
			"PRAGMA application_id = 1196444487;
			CREATE TABLE gpkg_spatial_ref_sys (srs_name TEXT NOT NULL, srs_id INTEGER PRIMARY KEY, organization TEXT NOT NULL, organization_coordsys_id INTEGER NOT NULL, definition TEXT NOT NULL, description TEXT);
			CREATE TABLE gpkg_contents (table_name TEXT NOT NULL PRIMARY KEY, data_type TEXT NOT NULL, identifier TEXT UNIQUE, description TEXT DEFAULT '', last_change DATETIME NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now')), min_x DOUBLE, min_y DOUBLE, max_x DOUBLE, max_y DOUBLE, srs_id INTEGER);
			CREATE TABLE gpkg_geometry_columns (table_name TEXT NOT NULL, column_name TEXT NOT NULL, geometry_type_name TEXT NOT NULL, srs_id INTEGER NOT NULL, z TINYINT NOT NULL, m TINYINT NOT NULL, PRIMARY KEY (table_name, column_name));
			CREATE TABLE gpkg_tile_matrix_set (table_name TEXT NOT NULL PRIMARY KEY, srs_id INTEGER NOT NULL, min_x DOUBLE NOT NULL, min_y DOUBLE NOT NULL, max_x DOUBLE NOT NULL, max_y DOUBLE NOT NULL);
			CREATE TABLE gpkg_tile_matrix (table_name TEXT NOT NULL, zoom_level INTEGER NOT NULL, matrix_width INTEGER NOT NULL, matrix_height INTEGER NOT NULL, tile_width INTEGER NOT NULL, tile_height INTEGER NOT NULL, pixel_x_size DOUBLE NOT NULL, pixel_y_size DOUBLE NOT NULL, PRIMARY KEY (table_name, zoom_level));
			INSERT INTO gpkg_spatial_ref_sys VALUES ('WGS 84 geodetic', 4326, 'EPSG', 4326, 'GEOGCS[\"WGS 84\"]', 'longitude/latitude coordinates in decimal degrees on the WGS 84 spheroid');
			INSERT INTO gpkg_spatial_ref_sys VALUES ('WGS 84 / Pseudo-Mercator', 3857, 'EPSG', 3857, 'PROJCS[\"WGS 84 / Pseudo-Mercator\"]', NULL);
			INSERT INTO gpkg_spatial_ref_sys VALUES ('Undefined geographic SRS', 0, 'NONE', 0, 'undefined', 'undefined geographic coordinate reference system');
			INSERT INTO gpkg_spatial_ref_sys VALUES ('Undefined cartesian SRS', -1, 'NONE', -1, 'undefined', 'undefined cartesian coordinate reference system');",
		)?;
		Ok(GeoPackageBuilder { conn })
	}

	/// Adds a tile table. `tiles` are `(zoom_level, column, row)` cells of `matrices`;
	/// each gets [`fixture_tile_data`] as content.
	pub fn add_tile_table(
		&mut self,
		table: &str,
		srs_id: i64,
		[min_x, min_y, max_x, max_y]: [f64; 4],
		matrices: &[TileMatrix],
		tiles: &[(u8, u32, u32)],
	) -> Result<()> {
		let tx = self.conn.transaction()?;
		tx.execute(
			&format!(
				"CREATE TABLE \"{table}\" (id INTEGER PRIMARY KEY AUTOINCREMENT, zoom_level INTEGER NOT NULL, tile_column INTEGER NOT NULL, tile_row INTEGER NOT NULL, tile_data BLOB NOT NULL, UNIQUE (zoom_level, tile_column, tile_row))"
			),
			[],
		)?;
		tx.execute(
			"INSERT INTO gpkg_contents (table_name, data_type, identifier, min_x, min_y, max_x, max_y, srs_id) VALUES (?1, 'tiles', ?1, ?2, ?3, ?4, ?5, ?6)",
			params![table, min_x, min_y, max_x, max_y, srs_id],
		)?;
		tx.execute(
			"INSERT INTO gpkg_tile_matrix_set VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
			params![table, srs_id, min_x, min_y, max_x, max_y],
		)?;
		for m in matrices {
			tx.execute(
				"INSERT INTO gpkg_tile_matrix VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
				params![
					table,
					m.zoom_level,
					m.matrix_width,
					m.matrix_height,
					m.tile_width,
					m.tile_height,
					m.pixel_x_size,
					m.pixel_y_size
				],
			)?;
		}
		for &(zoom_level, column, row) in tiles {
			tx.execute(
				&format!("INSERT INTO \"{table}\" (zoom_level, tile_column, tile_row, tile_data) VALUES (?1, ?2, ?3, ?4)"),
				params![zoom_level, column, row, fixture_tile_data(zoom_level, column, row)],
			)?;
		}
		tx.commit()?;
		Ok(())
	}

	/// Adds a feature table with columns `fid`, `geom` and `name`.
	pub fn add_feature_table(
		&mut self,
		table: &str,
		geometry_type_name: &str,
		srs_id: i64,
		rows: &[(Option<&str>, Option<Geometry>)],
	) -> Result<()> {
		self.conn.execute_batch(&format!(
			"CREATE TABLE \"{table}\" (fid INTEGER PRIMARY KEY AUTOINCREMENT, geom BLOB, name TEXT)"
		))?;
		self.conn.execute(
			"INSERT INTO gpkg_contents (table_name, data_type, identifier, srs_id) VALUES (?1, 'features', ?1, ?2)",
			params![table, srs_id],
		)?;
		self.conn.execute(
			"INSERT INTO gpkg_geometry_columns VALUES (?1, 'geom', ?2, ?3, 0, 0)",
			params![table, geometry_type_name, srs_id],
		)?;
		for (name, geometry) in rows {
			let blob = match geometry {
				Some(g) => Some(GeoPackageGeometry::new(i32::try_from(srs_id)?, g.clone()).to_bytes()?.into_vec()),
				None => None,
			};
			self.insert_raw_feature(table, *name, blob)?;
		}
		Ok(())
	}

	/// Inserts a row with an arbitrary geometry blob.
	pub fn insert_raw_feature(&mut self, table: &str, name: Option<&str>, geometry: Option<Vec<u8>>) -> Result<()> {
		self.conn.execute(
			&format!("INSERT INTO \"{table}\" (geom, name) VALUES (?1, ?2)"),
			params![geometry, name],
		)?;
		Ok(())
	}

	/// Adds the St. Louis tile table: an 8x8 grid at zoom 14 whose cell (0, 0) is the XYZ
	/// tile [`GRID_ORIGIN`], plus the matching zoom 13 and 15 grids. Zoom 15 holds no tiles.
	pub fn add_st_louis_tiles(&mut self) -> Result<()> {
		let span = xyz_tile_span(14);
		let min_x = xyz_tile_min_x(14, GRID_ORIGIN.0);
		let max_y = xyz_tile_max_y(14, GRID_ORIGIN.1);
		let extent = [min_x, max_y - 8.0 * span, min_x + 8.0 * span, max_y];

		let matrices = [13u8, 14, 15]
			.iter()
			.map(|&zoom| {
				let cells = 8u32 << zoom >> 14;
				TileMatrix {
					zoom_level: zoom,
					matrix_width: cells,
					matrix_height: cells,
					tile_width: 256,
					tile_height: 256,
					pixel_x_size: xyz_tile_span(zoom) / 256.0,
					pixel_y_size: xyz_tile_span(zoom) / 256.0,
				}
			})
			.collect::<Vec<_>>();

		let mut tiles = vec![(13, 1, 0)];
		for x in ST_LOUIS_X.0..=ST_LOUIS_X.1 {
			for y in ST_LOUIS_Y.0..=ST_LOUIS_Y.1 {
				tiles.push((14, x - GRID_ORIGIN.0, y - GRID_ORIGIN.1));
			}
		}
		self.add_tile_table("stlouis_tiles", 3857, extent, &matrices, &tiles)
	}

	/// Adds the St. Louis feature tables.
	pub fn add_st_louis_features(&mut self) -> Result<()> {
		let to_mercator = Projection::wgs84().transformation(&Projection::web_mercator())?;
		let mercator_point = |lon: f64, lat: f64| -> Result<Geometry> {
			let (x, y) = to_mercator.transform(lon, lat)?;
			Ok(Geometry::new_point([x, y]))
		};

		self.add_feature_table(
			"Cafes",
			"POINT",
			4326,
			&[
				(Some("Cafe"), Some(Geometry::new_point([-90.2, 38.63]))),
				(Some("Kaldi's"), Some(Geometry::new_point([-90.26, 38.64]))),
				(Some("Blueprint"), Some(Geometry::new_point([-90.25, 38.62]))),
			],
		)?;
		self.add_feature_table(
			"Parks",
			"POLYGON",
			4326,
			&[(
				Some("Forest Park"),
				Some(Geometry::new_polygon(vec![
					vec![[-90.31, 38.63], [-90.27, 38.63], [-90.27, 38.65], [-90.31, 38.65], [-90.31, 38.63]],
					vec![[-90.29, 38.635], [-90.285, 38.64], [-90.28, 38.635], [-90.29, 38.635]],
				])),
			)],
		)?;
		self.add_feature_table(
			"Pizza",
			"POINT",
			3857,
			&[
				(Some("Pie Palace"), Some(mercator_point(-90.24, 38.63)?)),
				(Some("Dewey's"), Some(mercator_point(-90.22, 38.61)?)),
			],
		)?;
		self.add_feature_table(
			"Streets",
			"LINESTRING",
			4326,
			&[(
				Some("Market Street"),
				Some(Geometry::new_line_string(vec![
					[-90.21, 38.627],
					[-90.23, 38.629],
					[-90.25, 38.631],
				])),
			)],
		)?;
		Ok(())
	}
}

/// Writes the reference St. Louis package to `path`.
pub fn write_st_louis(path: &Path) -> Result<()> {
	let mut builder = GeoPackageBuilder::create(path)?;
	builder.add_st_louis_tiles()?;
	builder.add_st_louis_features()?;
	Ok(())
}

/// An opened package whose file lives in a temporary directory as long as this value.
pub struct TestPackage {
	package: GeoPackage,
	_dir: TempDir,
}

impl Deref for TestPackage {
	type Target = GeoPackage;

	fn deref(&self) -> &GeoPackage {
		&self.package
	}
}

/// Writes the St. Louis package as `StLouis.gpkg` into a temporary directory and opens it.
pub fn st_louis() -> Result<TestPackage> {
	let dir = TempDir::new()?;
	let path = dir.path().join("StLouis.gpkg");
	write_st_louis(&path)?;
	Ok(TestPackage {
		package: GeoPackage::open_path(&path)?,
		_dir: dir,
	})
}

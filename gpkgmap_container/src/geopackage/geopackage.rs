use super::{GeoPackageFeatureDataset, GeoPackageTileDataset, SqlitePool};
use crate::{FeatureDataset, GeoContainer, TileDataset};
use anyhow::{Context, Result};
use gpkgmap_core::MapError;
use r2d2::Pool;
use r2d2_sqlite::{
	SqliteConnectionManager,
	rusqlite::{Connection, OpenFlags, params},
};
use std::{
	fmt::Debug,
	path::{Path, PathBuf},
};

const REQUIRED_TABLES: [&str; 2] = ["gpkg_contents", "gpkg_spatial_ref_sys"];
const DEFAULT_BATCH_SIZE: usize = 100;

/// An opened GeoPackage file.
///
/// Every dataset handed out shares the connection pool of the package.
pub struct GeoPackage {
	name: String,
	path: PathBuf,
	pool: SqlitePool,
	batch_size: usize,
}

impl GeoPackage {
	/// Opens the GeoPackage at `path` read-only.
	///
	/// # Errors
	/// [`MapError::ContainerNotFound`] if the file does not exist,
	/// [`MapError::InvalidContainer`] if it lacks the GeoPackage core tables.
	pub fn open_path(path: &Path) -> Result<GeoPackage> {
		log::debug!("open GeoPackage {path:?}");

		let name = path
			.file_stem()
			.map_or_else(|| path.to_string_lossy(), |s| s.to_string_lossy())
			.to_string();
		if !path.is_file() {
			return Err(MapError::ContainerNotFound(name).into());
		}

		let manager = SqliteConnectionManager::file(path).with_flags(OpenFlags::SQLITE_OPEN_READ_ONLY);
		let pool = Pool::builder()
			.max_size(10)
			.build(manager)
			.with_context(|| format!("opening SQLite database {path:?}"))?;

		let conn = pool.get()?;
		validate_connection(&conn, &name)?;
		drop(conn);

		Ok(GeoPackage {
			name,
			path: path.to_path_buf(),
			pool,
			batch_size: DEFAULT_BATCH_SIZE,
		})
	}

	/// Number of rows feature cursors fetch per query.
	pub fn with_batch_size(mut self, batch_size: usize) -> Self {
		self.batch_size = batch_size.max(1);
		self
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	fn contents(&self, data_type: &str) -> Result<Vec<String>> {
		let conn = self.pool.get()?;
		let mut stmt = conn.prepare("SELECT table_name FROM gpkg_contents WHERE data_type = ?1 ORDER BY table_name")?;
		let names = stmt
			.query_map(params![data_type], |row| row.get::<_, String>(0))?
			.collect::<Result<Vec<String>, _>>()?;
		log::trace!("{} tables of type '{data_type}': {names:?}", self.name);
		Ok(names)
	}

	fn ensure_listed(&self, table: &str, data_type: &str) -> Result<()> {
		if self.contents(data_type)?.iter().any(|t| t == table) {
			Ok(())
		} else {
			Err(MapError::InvalidContainer {
				name: self.name.clone(),
				reason: format!("no {data_type} table '{table}' in gpkg_contents"),
			}
			.into())
		}
	}
}

impl GeoContainer for GeoPackage {
	fn name(&self) -> &str {
		&self.name
	}

	fn tile_tables(&self) -> Result<Vec<String>> {
		self.contents("tiles")
			.with_context(|| format!("listing tile tables of '{}'", self.name))
	}

	fn feature_tables(&self) -> Result<Vec<String>> {
		self.contents("features")
			.with_context(|| format!("listing feature tables of '{}'", self.name))
	}

	fn tile_dataset(&self, table: &str) -> Result<Box<dyn TileDataset>> {
		self.ensure_listed(table, "tiles")?;
		let dataset = GeoPackageTileDataset::load(self.pool.clone(), &self.name, table)
			.with_context(|| format!("loading tile table '{table}' of '{}'", self.name))?;
		Ok(Box::new(dataset))
	}

	fn feature_dataset(&self, table: &str) -> Result<Box<dyn FeatureDataset>> {
		self.ensure_listed(table, "features")?;
		let dataset = GeoPackageFeatureDataset::load(self.pool.clone(), &self.name, table, self.batch_size)
			.with_context(|| format!("loading feature table '{table}' of '{}'", self.name))?;
		Ok(Box::new(dataset))
	}
}

impl Debug for GeoPackage {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("GeoPackage")
			.field("name", &self.name)
			.field("path", &self.path)
			.finish()
	}
}

/// Checks that the database has the tables every GeoPackage must have.
pub(crate) fn validate_connection(conn: &Connection, name: &str) -> Result<()> {
	for table in REQUIRED_TABLES {
		let count: i64 = conn
			.query_row(
				"SELECT COUNT(*) FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
				params![table],
				|row| row.get(0),
			)
			.map_err(|e| MapError::InvalidContainer {
				name: name.to_string(),
				reason: e.to_string(),
			})?;
		if count == 0 {
			return Err(MapError::InvalidContainer {
				name: name.to_string(),
				reason: format!("table '{table}' is missing"),
			}
			.into());
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{st_louis, write_st_louis};
	use assert_fs::TempDir;
	use pretty_assertions::assert_eq;

	#[test]
	fn lists_tables_by_name() -> Result<()> {
		let package = st_louis()?;
		assert_eq!(package.name(), "StLouis");
		assert_eq!(package.tile_tables()?, vec!["stlouis_tiles"]);
		assert_eq!(package.feature_tables()?, vec!["Cafes", "Parks", "Pizza", "Streets"]);
		Ok(())
	}

	#[test]
	fn unknown_tables() -> Result<()> {
		let package = st_louis()?;
		let err = package.tile_dataset("Pizza").err().unwrap();
		assert!(matches!(
			err.downcast_ref::<MapError>(),
			Some(MapError::InvalidContainer { .. })
		));
		assert!(package.feature_dataset("stlouis_tiles").is_err());
		Ok(())
	}

	#[test]
	fn missing_and_invalid_files() -> Result<()> {
		let dir = TempDir::new()?;
		let err = GeoPackage::open_path(&dir.path().join("nope.gpkg")).unwrap_err();
		assert_eq!(
			err.downcast_ref::<MapError>(),
			Some(&MapError::ContainerNotFound("nope".to_string()))
		);

		let plain = dir.path().join("plain.gpkg");
		Connection::open(&plain)?.execute_batch("CREATE TABLE t (a INTEGER);")?;
		let err = GeoPackage::open_path(&plain).unwrap_err();
		assert!(matches!(
			err.downcast_ref::<MapError>(),
			Some(MapError::InvalidContainer { .. })
		));

		let path = dir.path().join("StLouis.gpkg");
		write_st_louis(&path)?;
		assert!(GeoPackage::open_path(&path).is_ok());
		Ok(())
	}
}

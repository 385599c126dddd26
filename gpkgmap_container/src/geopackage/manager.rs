use super::{GeoPackage, geopackage::validate_connection};
use anyhow::{Context, Result};
use gpkgmap_core::MapError;
use r2d2_sqlite::rusqlite::{Connection, OpenFlags};
use std::{
	fs::{self, File},
	io::{self, Read},
	path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

const EXTENSION: &str = "gpkg";
const SQLITE_MAGIC: &[u8; 16] = b"SQLite format 3\0";

/// A directory of imported GeoPackages, addressed by name.
///
/// Each package is stored as `<store>/<name>.gpkg`.
pub struct GeoPackageManager {
	store: PathBuf,
	batch_size: Option<usize>,
}

impl GeoPackageManager {
	/// Uses `store` as the package directory, creating it if necessary.
	pub fn new(store: &Path) -> Result<GeoPackageManager> {
		fs::create_dir_all(store).with_context(|| format!("creating GeoPackage store {store:?}"))?;
		Ok(GeoPackageManager {
			store: store.to_path_buf(),
			batch_size: None,
		})
	}

	/// Rows per query for cursors of packages opened by this manager.
	pub fn with_batch_size(mut self, batch_size: usize) -> Self {
		self.batch_size = Some(batch_size);
		self
	}

	pub fn store(&self) -> &Path {
		&self.store
	}

	/// Copies a GeoPackage from `reader` into the store under `name`.
	///
	/// The bytes go to a temporary file in the store first; only a valid GeoPackage is
	/// moved into place, so a failed import never leaves a broken package behind.
	///
	/// # Errors
	/// [`MapError::ContainerExists`] if `name` exists and `overwrite` is false,
	/// [`MapError::InvalidName`] for unusable names,
	/// [`MapError::InvalidContainer`] if the data is not a GeoPackage.
	pub fn import_geopackage(&self, name: &str, reader: &mut dyn Read, overwrite: bool) -> Result<()> {
		log::debug!("import GeoPackage '{name}' (overwrite: {overwrite})");

		let target = self.path_for(name)?;
		if target.exists() && !overwrite {
			return Err(MapError::ContainerExists(name.to_string()).into());
		}

		let mut temp = NamedTempFile::new_in(&self.store).context("creating temporary file")?;
		let bytes = io::copy(reader, temp.as_file_mut()).with_context(|| format!("copying GeoPackage '{name}'"))?;
		temp.as_file().sync_all()?;
		log::trace!("received {bytes} bytes for '{name}'");

		validate_file(temp.path(), name)?;

		temp.persist(&target)
			.with_context(|| format!("moving GeoPackage '{name}' into place"))?;
		log::debug!("imported '{name}' to {target:?}");
		Ok(())
	}

	pub fn import_geopackage_from_path(&self, name: &str, path: &Path, overwrite: bool) -> Result<()> {
		let mut file = File::open(path).with_context(|| format!("opening {path:?}"))?;
		self.import_geopackage(name, &mut file, overwrite)
	}

	/// Opens the package stored under `name`.
	pub fn open(&self, name: &str) -> Result<GeoPackage> {
		let path = self.path_for(name)?;
		if !path.is_file() {
			return Err(MapError::ContainerNotFound(name.to_string()).into());
		}
		let package = GeoPackage::open_path(&path).with_context(|| format!("opening GeoPackage '{name}'"))?;
		Ok(match self.batch_size {
			Some(size) => package.with_batch_size(size),
			None => package,
		})
	}

	pub fn exists(&self, name: &str) -> Result<bool> {
		Ok(self.path_for(name)?.is_file())
	}

	/// Removes the package `name`. Returns `false` if there was none.
	pub fn delete(&self, name: &str) -> Result<bool> {
		let path = self.path_for(name)?;
		if !path.is_file() {
			return Ok(false);
		}
		fs::remove_file(&path).with_context(|| format!("deleting {path:?}"))?;
		Ok(true)
	}

	/// Names of all stored packages, sorted.
	pub fn databases(&self) -> Result<Vec<String>> {
		let mut names = Vec::new();
		for entry in fs::read_dir(&self.store)? {
			let path = entry?.path();
			if path.is_file() && path.extension().is_some_and(|e| e == EXTENSION) {
				if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
					names.push(stem.to_string());
				}
			}
		}
		names.sort();
		Ok(names)
	}

	fn path_for(&self, name: &str) -> Result<PathBuf> {
		let name = normalize_name(name)?;
		Ok(self.store.join(format!("{name}.{EXTENSION}")))
	}
}

/// Strips a `.gpkg` extension and rejects names that could escape the store.
fn normalize_name(name: &str) -> Result<&str> {
	let name = name.strip_suffix(".gpkg").unwrap_or(name);
	let invalid = name.is_empty()
		|| name.starts_with('.')
		|| name.chars().any(|c| matches!(c, '/' | '\\' | '\0' | ':'));
	if invalid {
		return Err(MapError::InvalidName(name.to_string()).into());
	}
	Ok(name)
}

fn validate_file(path: &Path, name: &str) -> Result<()> {
	let invalid = |reason: String| -> anyhow::Error {
		MapError::InvalidContainer {
			name: name.to_string(),
			reason,
		}
		.into()
	};

	let mut magic = [0u8; 16];
	File::open(path)?
		.read_exact(&mut magic)
		.map_err(|_| invalid("file is too short".to_string()))?;
	if &magic != SQLITE_MAGIC {
		return Err(invalid("not an SQLite database".to_string()));
	}

	let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(|e| invalid(e.to_string()))?;
	validate_connection(&conn, name)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{GeoContainer, testing::write_st_louis};
	use assert_fs::TempDir;
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	fn setup() -> Result<(TempDir, GeoPackageManager, PathBuf)> {
		let dir = TempDir::new()?;
		let source = dir.path().join("source.gpkg");
		write_st_louis(&source)?;
		let manager = GeoPackageManager::new(&dir.path().join("store"))?;
		Ok((dir, manager, source))
	}

	fn map_error(result: Result<impl Sized>) -> MapError {
		result.err().unwrap().downcast::<MapError>().unwrap()
	}

	#[test]
	fn import_and_open() -> Result<()> {
		let (_dir, manager, source) = setup()?;
		assert!(!manager.exists("StLouis")?);

		manager.import_geopackage_from_path("StLouis", &source, false)?;
		assert!(manager.exists("StLouis")?);
		assert!(manager.exists("StLouis.gpkg")?);
		assert_eq!(manager.databases()?, vec!["StLouis"]);

		let package = manager.open("StLouis")?;
		assert_eq!(package.name(), "StLouis");
		assert_eq!(package.tile_tables()?.len(), 1);
		Ok(())
	}

	#[test]
	fn overwrite() -> Result<()> {
		let (_dir, manager, source) = setup()?;
		manager.import_geopackage_from_path("StLouis", &source, false)?;
		assert_eq!(
			map_error(manager.import_geopackage_from_path("StLouis", &source, false)),
			MapError::ContainerExists("StLouis".to_string())
		);
		manager.import_geopackage_from_path("StLouis", &source, true)?;
		assert_eq!(manager.databases()?, vec!["StLouis"]);
		Ok(())
	}

	#[test]
	fn rejects_invalid_data() -> Result<()> {
		let (_dir, manager, _) = setup()?;
		let err = map_error(manager.import_geopackage("junk", &mut &b"hello world"[..], true));
		assert!(matches!(err, MapError::InvalidContainer { .. }));

		let mut not_sqlite = vec![0u8; 64];
		not_sqlite[..6].copy_from_slice(b"SQLite");
		let err = map_error(manager.import_geopackage("junk", &mut not_sqlite.as_slice(), true));
		assert!(matches!(err, MapError::InvalidContainer { .. }));

		assert!(!manager.exists("junk")?);
		assert!(manager.databases()?.is_empty());
		Ok(())
	}

	#[test]
	fn open_and_delete() -> Result<()> {
		let (_dir, manager, source) = setup()?;
		assert_eq!(
			map_error(manager.open("StLouis")),
			MapError::ContainerNotFound("StLouis".to_string())
		);
		manager.import_geopackage_from_path("StLouis", &source, false)?;
		assert!(manager.delete("StLouis")?);
		assert!(!manager.delete("StLouis")?);
		assert!(!manager.exists("StLouis")?);
		Ok(())
	}

	#[rstest]
	#[case("")]
	#[case("../escape")]
	#[case("a/b")]
	#[case(".hidden")]
	#[case("c:data")]
	fn invalid_names(#[case] name: &str) {
		let (_dir, manager, _) = setup().unwrap();
		assert!(matches!(map_error(manager.exists(name)), MapError::InvalidName(_)));
	}
}

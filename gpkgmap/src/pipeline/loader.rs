use crate::Config;
use anyhow::{Context, Result};
use gpkgmap_container::{GeoPackage, GeoPackageManager};
use std::{io::Read, path::Path};

/// Puts a GeoPackage into the managed store and opens it.
pub struct ContainerLoader {
	manager: GeoPackageManager,
}

impl ContainerLoader {
	pub fn new(manager: GeoPackageManager) -> ContainerLoader {
		ContainerLoader { manager }
	}

	/// A loader on the store directory `store`, opening packages with the cursor batch
	/// size of `config`.
	pub fn from_config(store: &Path, config: &Config) -> Result<ContainerLoader> {
		let manager = GeoPackageManager::new(store)?.with_batch_size(config.cursor_batch_size);
		Ok(ContainerLoader::new(manager))
	}

	pub fn manager(&self) -> &GeoPackageManager {
		&self.manager
	}

	/// Imports the bytes of `reader` as `name`, replacing any package of that name, and
	/// opens the result.
	pub fn load(&self, name: &str, reader: &mut dyn Read) -> Result<GeoPackage> {
		log::debug!("load GeoPackage '{name}'");
		self.manager
			.import_geopackage(name, reader, true)
			.with_context(|| format!("importing GeoPackage '{name}'"))?;
		self.manager.open(name)
	}

	pub fn load_path(&self, name: &str, path: &Path) -> Result<GeoPackage> {
		log::debug!("load GeoPackage '{name}' from {path:?}");
		self.manager
			.import_geopackage_from_path(name, path, true)
			.with_context(|| format!("importing GeoPackage '{name}'"))?;
		self.manager.open(name)
	}
}

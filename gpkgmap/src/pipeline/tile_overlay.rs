use crate::{MapView, TileOverlayOptions};
use anyhow::{Context, Result};
use gpkgmap_container::{GeoContainer, TileDataset};
use gpkgmap_core::MapError;

/// Adds the first tile table of a container as tile overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct TileOverlayBuilder {
	pub z_index: f32,
}

impl TileOverlayBuilder {
	pub fn new(z_index: f32) -> TileOverlayBuilder {
		TileOverlayBuilder { z_index }
	}

	/// Adds the overlay and returns the tile dataset it shows.
	///
	/// # Errors
	/// [`MapError::NoTileData`] if the container has no tile table.
	pub fn build(&self, container: &dyn GeoContainer, map: &mut dyn MapView) -> Result<Box<dyn TileDataset>> {
		let tables = container.tile_tables()?;
		let Some(table) = tables.first() else {
			return Err(MapError::NoTileData(container.name().to_string()).into());
		};
		if tables.len() > 1 {
			log::debug!("using tile table '{table}' of {tables:?}");
		}

		let dataset = container.tile_dataset(table)?;
		let provider = dataset
			.tile_provider()
			.with_context(|| format!("creating tile provider for '{table}'"))?;
		map.add_tile_overlay(TileOverlayOptions::new(provider).z_index(self.z_index))?;
		log::debug!("added tile overlay '{table}' at z-index {}", self.z_index);
		Ok(dataset)
	}
}

impl Default for TileOverlayBuilder {
	fn default() -> Self {
		TileOverlayBuilder::new(-2.0)
	}
}

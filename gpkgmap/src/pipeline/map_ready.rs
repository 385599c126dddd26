use crate::{
	Config, ContainerLoader, FeatureLayerRenderer, MapView, RenderSummary, TileOverlayBuilder, ViewportFitter,
};
use anyhow::{Context, Result};
use gpkgmap_container::GeoContainer;
use std::path::PathBuf;

/// Where the pipeline gets its container from.
pub enum ContainerSource {
	/// Import the file at `path` into the loader's store as `name`, then open it.
	Import {
		loader: ContainerLoader,
		name: String,
		path: PathBuf,
	},
	/// Use a container that is already open.
	Opened(Box<dyn GeoContainer>),
}

/// Runs once the host map is ready: sets the map type, loads the container, adds its
/// first tile table as overlay, draws all feature tables and fits the camera to the
/// tile data.
///
/// Every step's failure aborts the run.
pub struct MapReadyPipeline {
	source: ContainerSource,
	config: Config,
}

impl MapReadyPipeline {
	pub fn new(container: Box<dyn GeoContainer>, config: &Config) -> MapReadyPipeline {
		MapReadyPipeline {
			source: ContainerSource::Opened(container),
			config: config.clone(),
		}
	}

	pub fn import(loader: ContainerLoader, name: &str, path: PathBuf, config: &Config) -> MapReadyPipeline {
		MapReadyPipeline {
			source: ContainerSource::Import {
				loader,
				name: name.to_string(),
				path,
			},
			config: config.clone(),
		}
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	pub fn on_map_ready(&self, map: &mut dyn MapView) -> Result<RenderSummary> {
		map.set_map_type(self.config.map_type);

		match &self.source {
			ContainerSource::Import { loader, name, path } => {
				let package = loader.load_path(name, path)?;
				self.render(&package, map)
			}
			ContainerSource::Opened(container) => self.render(container.as_ref(), map),
		}
	}

	/// The steps after loading: overlay, features and camera.
	pub fn render(&self, container: &dyn GeoContainer, map: &mut dyn MapView) -> Result<RenderSummary> {
		let name = container.name();
		log::debug!("render container '{name}'");

		let tiles = TileOverlayBuilder::new(self.config.tile_overlay_z_index)
			.build(container, map)
			.with_context(|| format!("adding tile overlay of '{name}'"))?;

		let datasets = FeatureLayerRenderer::from_config(&self.config)
			.render_all(container, map)
			.with_context(|| format!("rendering features of '{name}'"))?;

		let viewport = ViewportFitter::new(self.config.bounds_zoom, self.config.camera_zoom)
			.fit(tiles.as_ref(), map)
			.with_context(|| format!("fitting camera to '{}'", tiles.name()))?;

		Ok(RenderSummary {
			container: name.to_string(),
			tile_table: tiles.name().to_string(),
			datasets,
			viewport,
		})
	}
}

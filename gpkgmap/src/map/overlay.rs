use gpkgmap_container::TileProvider;

/// A tile layer for the map. Overlays with a lower `z_index` are drawn first.
#[derive(Debug)]
pub struct TileOverlayOptions {
	pub provider: Box<dyn TileProvider>,
	pub z_index: f32,
}

impl TileOverlayOptions {
	pub fn new(provider: Box<dyn TileProvider>) -> TileOverlayOptions {
		TileOverlayOptions { provider, z_index: 0.0 }
	}

	pub fn z_index(mut self, z_index: f32) -> Self {
		self.z_index = z_index;
		self
	}
}

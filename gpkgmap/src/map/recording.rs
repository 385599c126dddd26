use super::{CameraUpdate, MapObjectId, MapType, MapView, TileOverlayOptions};
use anyhow::Result;
use gpkgmap_geometry::{MarkerOptions, PolygonOptions, PolylineOptions};

/// A [`MapView`] that keeps everything it is given.
#[derive(Debug, Default)]
pub struct RecordingMap {
	pub map_type: Option<MapType>,
	pub overlays: Vec<TileOverlayOptions>,
	pub markers: Vec<MarkerOptions>,
	pub polylines: Vec<PolylineOptions>,
	pub polygons: Vec<PolygonOptions>,
	pub camera_updates: Vec<CameraUpdate>,
	next_id: usize,
}

impl RecordingMap {
	pub fn new() -> RecordingMap {
		RecordingMap::default()
	}

	/// The camera position after all updates, if any.
	pub fn camera(&self) -> Option<&CameraUpdate> {
		self.camera_updates.last()
	}

	/// Number of markers, polylines and polygons.
	pub fn shape_count(&self) -> usize {
		self.markers.len() + self.polylines.len() + self.polygons.len()
	}

	fn next_id(&mut self) -> MapObjectId {
		self.next_id += 1;
		MapObjectId(self.next_id)
	}
}

impl MapView for RecordingMap {
	fn set_map_type(&mut self, map_type: MapType) {
		self.map_type = Some(map_type);
	}

	fn add_tile_overlay(&mut self, options: TileOverlayOptions) -> Result<MapObjectId> {
		self.overlays.push(options);
		Ok(self.next_id())
	}

	fn add_marker(&mut self, options: MarkerOptions) -> Result<MapObjectId> {
		self.markers.push(options);
		Ok(self.next_id())
	}

	fn add_polyline(&mut self, options: PolylineOptions) -> Result<MapObjectId> {
		self.polylines.push(options);
		Ok(self.next_id())
	}

	fn add_polygon(&mut self, options: PolygonOptions) -> Result<MapObjectId> {
		self.polygons.push(options);
		Ok(self.next_id())
	}

	fn move_camera(&mut self, update: CameraUpdate) -> Result<()> {
		self.camera_updates.push(update);
		Ok(())
	}
}

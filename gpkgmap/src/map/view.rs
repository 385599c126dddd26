use super::{CameraUpdate, MapType, TileOverlayOptions};
use anyhow::Result;
use gpkgmap_geometry::{MarkerOptions, PolygonOptions, PolylineOptions};

/// Handle of an object added to a [`MapView`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MapObjectId(pub usize);

/// A map widget that accepts overlays, shapes and camera commands.
pub trait MapView {
	fn set_map_type(&mut self, map_type: MapType);

	fn add_tile_overlay(&mut self, options: TileOverlayOptions) -> Result<MapObjectId>;

	fn add_marker(&mut self, options: MarkerOptions) -> Result<MapObjectId>;

	fn add_polyline(&mut self, options: PolylineOptions) -> Result<MapObjectId>;

	fn add_polygon(&mut self, options: PolygonOptions) -> Result<MapObjectId>;

	fn move_camera(&mut self, update: CameraUpdate) -> Result<()>;
}

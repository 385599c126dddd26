use gpkgmap_core::LatLng;

/// A camera movement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraUpdate {
	/// Center on `target` at zoom level `zoom`.
	NewLatLngZoom { target: LatLng, zoom: f32 },
}

impl CameraUpdate {
	pub fn new_lat_lng_zoom(target: LatLng, zoom: f32) -> CameraUpdate {
		CameraUpdate::NewLatLngZoom { target, zoom }
	}

	pub fn target(&self) -> LatLng {
		match self {
			CameraUpdate::NewLatLngZoom { target, .. } => *target,
		}
	}
}

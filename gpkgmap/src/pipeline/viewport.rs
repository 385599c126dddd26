use crate::{CameraUpdate, MapView};
use anyhow::{Context, Result};
use gpkgmap_container::TileDataset;
use gpkgmap_core::{CoordinateTransform, LatLng, LatLngBounds, Projection};

/// Where the camera was moved to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub bounds: LatLngBounds,
	pub target: LatLng,
	pub zoom: f32,
}

/// Centers the camera on the extent of a tile dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportFitter {
	/// Zoom level whose stored tiles define the extent.
	pub bounds_zoom: u8,
	/// Zoom level of the camera.
	pub camera_zoom: f32,
}

impl ViewportFitter {
	pub fn new(bounds_zoom: u8, camera_zoom: f32) -> ViewportFitter {
		ViewportFitter {
			bounds_zoom,
			camera_zoom,
		}
	}

	/// Fits the camera using the transformation from the dataset projection to WGS84.
	pub fn fit(&self, dataset: &dyn TileDataset, map: &mut dyn MapView) -> Result<Viewport> {
		let transform = dataset
			.projection()
			.transformation(&Projection::wgs84())
			.with_context(|| format!("reprojecting bounds of '{}'", dataset.name()))?;
		self.fit_with_transform(dataset, &transform, map)
	}

	/// Reads the bounding box at `bounds_zoom`, transforms all four corners with
	/// `to_wgs84` (which must return longitude, latitude) and moves the camera to the
	/// center of the enclosing rectangle.
	pub fn fit_with_transform(
		&self,
		dataset: &dyn TileDataset,
		to_wgs84: &dyn CoordinateTransform,
		map: &mut dyn MapView,
	) -> Result<Viewport> {
		let bbox = dataset.bounding_box(self.bounds_zoom)?;
		let bounds = bbox
			.to_lat_lng_bounds(to_wgs84)
			.with_context(|| format!("reprojecting bounds of '{}'", dataset.name()))?;
		let target = bounds.center();
		log::debug!(
			"fit camera to {bbox:?} of '{}': {bounds:?}, center {target:?}",
			dataset.name()
		);

		map.move_camera(CameraUpdate::new_lat_lng_zoom(target, self.camera_zoom))?;
		Ok(Viewport {
			bounds,
			target,
			zoom: self.camera_zoom,
		})
	}
}

impl Default for ViewportFitter {
	fn default() -> Self {
		ViewportFitter::new(14, 12.0)
	}
}

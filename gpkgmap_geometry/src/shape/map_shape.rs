use super::*;
use crate::GeometryType;
use gpkgmap_core::LatLng;

/// The payload of a [`MapShape`].
#[derive(Clone, Debug, PartialEq)]
pub enum MapShapeKind {
	LatLng(LatLng),
	MarkerOptions(MarkerOptions),
	PolylineOptions(PolylineOptions),
	PolygonOptions(PolygonOptions),
	MultiLatLng(MultiLatLng),
	MultiPolylineOptions(MultiPolylineOptions),
	MultiPolygonOptions(MultiPolygonOptions),
	Collection(Vec<MapShape>),
}

/// A display shape together with the geometry type it was converted from.
#[derive(Clone, Debug, PartialEq)]
pub struct MapShape {
	pub geometry_type: GeometryType,
	pub shape: MapShapeKind,
}

impl MapShape {
	pub fn new(geometry_type: GeometryType, shape: MapShapeKind) -> MapShape {
		MapShape { geometry_type, shape }
	}

	pub fn shape_type(&self) -> MapShapeType {
		match &self.shape {
			MapShapeKind::LatLng(_) => MapShapeType::LatLng,
			MapShapeKind::MarkerOptions(_) => MapShapeType::MarkerOptions,
			MapShapeKind::PolylineOptions(_) => MapShapeType::PolylineOptions,
			MapShapeKind::PolygonOptions(_) => MapShapeType::PolygonOptions,
			MapShapeKind::MultiLatLng(_) => MapShapeType::MultiLatLng,
			MapShapeKind::MultiPolylineOptions(_) => MapShapeType::MultiPolylineOptions,
			MapShapeKind::MultiPolygonOptions(_) => MapShapeType::MultiPolygonOptions,
			MapShapeKind::Collection(_) => MapShapeType::Collection,
		}
	}

	/// Returns the position if this is a bare `LatLng` shape.
	pub fn as_lat_lng(&self) -> Option<LatLng> {
		match &self.shape {
			MapShapeKind::LatLng(p) => Some(*p),
			_ => None,
		}
	}
}

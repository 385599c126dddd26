use std::fmt::{self, Display};

/// Kinds of display shapes.
///
/// The first group is produced by [`MapShapeConverter`](crate::MapShapeConverter) and
/// describes shapes not yet on a map. `Marker`, `Polyline`, `Polygon` and their multi
/// variants describe shapes after they were added to a map.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum MapShapeType {
	LatLng,
	MarkerOptions,
	PolylineOptions,
	PolygonOptions,
	MultiLatLng,
	MultiPolylineOptions,
	MultiPolygonOptions,
	Marker,
	Polyline,
	Polygon,
	MultiMarker,
	MultiPolyline,
	MultiPolygon,
	Collection,
}

impl MapShapeType {
	/// The type a shape of this kind has once it is added to a map.
	pub fn added(self) -> MapShapeType {
		use MapShapeType::*;
		match self {
			LatLng | MarkerOptions | Marker => Marker,
			PolylineOptions | Polyline => Polyline,
			PolygonOptions | Polygon => Polygon,
			MultiLatLng | MultiMarker => MultiMarker,
			MultiPolylineOptions | MultiPolyline => MultiPolyline,
			MultiPolygonOptions | MultiPolygon => MultiPolygon,
			Collection => Collection,
		}
	}

	pub fn is_added(self) -> bool {
		self.added() == self && self != MapShapeType::Collection
	}
}

impl Display for MapShapeType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(self, f)
	}
}

use super::{MapObjectId, MapView};
use anyhow::Result;
use gpkgmap_geometry::{MapShape, MapShapeKind, MapShapeType, MarkerOptions};

/// The map objects created for one [`MapShape`].
#[derive(Clone, Debug, PartialEq)]
pub enum AddedShape {
	Marker(MapObjectId),
	Polyline(MapObjectId),
	Polygon(MapObjectId),
	MultiMarker(Vec<MapObjectId>),
	MultiPolyline(Vec<MapObjectId>),
	MultiPolygon(Vec<MapObjectId>),
	Collection(Vec<AddedShape>),
}

impl AddedShape {
	pub fn shape_type(&self) -> MapShapeType {
		match self {
			AddedShape::Marker(_) => MapShapeType::Marker,
			AddedShape::Polyline(_) => MapShapeType::Polyline,
			AddedShape::Polygon(_) => MapShapeType::Polygon,
			AddedShape::MultiMarker(_) => MapShapeType::MultiMarker,
			AddedShape::MultiPolyline(_) => MapShapeType::MultiPolyline,
			AddedShape::MultiPolygon(_) => MapShapeType::MultiPolygon,
			AddedShape::Collection(_) => MapShapeType::Collection,
		}
	}

	/// Number of markers, including those inside multi shapes and collections.
	pub fn marker_count(&self) -> usize {
		match self {
			AddedShape::Marker(_) => 1,
			AddedShape::MultiMarker(ids) => ids.len(),
			AddedShape::Collection(children) => children.iter().map(AddedShape::marker_count).sum(),
			_ => 0,
		}
	}

	/// Number of map objects of any kind.
	pub fn object_count(&self) -> usize {
		match self {
			AddedShape::Marker(_) | AddedShape::Polyline(_) | AddedShape::Polygon(_) => 1,
			AddedShape::MultiMarker(ids) | AddedShape::MultiPolyline(ids) | AddedShape::MultiPolygon(ids) => ids.len(),
			AddedShape::Collection(children) => children.iter().map(AddedShape::object_count).sum(),
		}
	}
}

/// Adds `shape` to `map`.
///
/// Bare positions become markers without title or icon, multi shapes add one object
/// per member and collections recurse.
pub fn add_shape_to_map(map: &mut dyn MapView, shape: &MapShape) -> Result<AddedShape> {
	log::trace!("add {} ({}) to map", shape.shape_type(), shape.geometry_type);
	add_kind(map, &shape.shape)
}

fn add_kind(map: &mut dyn MapView, kind: &MapShapeKind) -> Result<AddedShape> {
	Ok(match kind {
		MapShapeKind::LatLng(position) => AddedShape::Marker(map.add_marker(MarkerOptions::new(*position))?),
		MapShapeKind::MarkerOptions(options) => AddedShape::Marker(map.add_marker(options.clone())?),
		MapShapeKind::PolylineOptions(options) => AddedShape::Polyline(map.add_polyline(options.clone())?),
		MapShapeKind::PolygonOptions(options) => AddedShape::Polygon(map.add_polygon(options.clone())?),
		MapShapeKind::MultiLatLng(points) => AddedShape::MultiMarker(
			points
				.0
				.iter()
				.map(|p| map.add_marker(MarkerOptions::new(*p)))
				.collect::<Result<_>>()?,
		),
		MapShapeKind::MultiPolylineOptions(lines) => AddedShape::MultiPolyline(
			lines
				.0
				.iter()
				.map(|l| map.add_polyline(l.clone()))
				.collect::<Result<_>>()?,
		),
		MapShapeKind::MultiPolygonOptions(polygons) => AddedShape::MultiPolygon(
			polygons
				.0
				.iter()
				.map(|p| map.add_polygon(p.clone()))
				.collect::<Result<_>>()?,
		),
		MapShapeKind::Collection(shapes) => AddedShape::Collection(
			shapes
				.iter()
				.map(|s| add_kind(map, &s.shape))
				.collect::<Result<_>>()?,
		),
	})
}

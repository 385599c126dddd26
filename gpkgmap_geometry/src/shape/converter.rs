use super::*;
use crate::{Coordinates, Geometry, PolygonGeometry};
use anyhow::{Context, Result};
use gpkgmap_core::{CoordinateTransform, LatLng, Projection, ProjectionTransform};

/// Converts feature geometries of one projection into display shapes in WGS84.
pub struct MapShapeConverter {
	transform: ProjectionTransform,
}

impl MapShapeConverter {
	/// Builds the transformation from `projection` to WGS84 once.
	///
	/// # Errors
	/// Fails with `MapError::UnsupportedProjection` if no transformation exists.
	pub fn new(projection: &Projection) -> Result<MapShapeConverter> {
		let transform = projection
			.transformation(&Projection::wgs84())
			.with_context(|| format!("creating shape converter for {projection}"))?;
		log::debug!("converting shapes from {projection} to WGS84");
		Ok(MapShapeConverter { transform })
	}

	pub fn projection(&self) -> &Projection {
		self.transform.from_projection()
	}

	/// Transforms `(x, y)` and reads the result as `(longitude, latitude)`.
	pub fn to_lat_lng(&self, coordinates: &Coordinates) -> Result<LatLng> {
		let (lon, lat) = self.transform.transform(coordinates.x(), coordinates.y())?;
		Ok(LatLng::new(lat, lon))
	}

	pub fn to_shape(&self, geometry: &Geometry) -> Result<MapShape> {
		log::trace!("convert {:?}", geometry.geometry_type());
		let shape = match geometry {
			Geometry::Point(g) => MapShapeKind::LatLng(self.to_lat_lng(&g.0)?),
			Geometry::LineString(g) => MapShapeKind::PolylineOptions(self.to_polyline(&g.0)?),
			Geometry::Polygon(g) => MapShapeKind::PolygonOptions(self.to_polygon(g)?),
			Geometry::MultiPoint(g) => MapShapeKind::MultiLatLng(MultiLatLng(
				g.0.iter().map(|p| self.to_lat_lng(&p.0)).collect::<Result<_>>()?,
			)),
			Geometry::MultiLineString(g) => MapShapeKind::MultiPolylineOptions(MultiPolylineOptions(
				g.0.iter().map(|l| self.to_polyline(&l.0)).collect::<Result<_>>()?,
			)),
			Geometry::MultiPolygon(g) => MapShapeKind::MultiPolygonOptions(MultiPolygonOptions(
				g.0.iter().map(|p| self.to_polygon(p)).collect::<Result<_>>()?,
			)),
			Geometry::GeometryCollection(members) => MapShapeKind::Collection(
				members.iter().map(|m| self.to_shape(m)).collect::<Result<_>>()?,
			),
		};
		Ok(MapShape::new(geometry.geometry_type(), shape))
	}

	fn to_points(&self, coordinates: &[Coordinates]) -> Result<Vec<LatLng>> {
		coordinates.iter().map(|c| self.to_lat_lng(c)).collect()
	}

	fn to_polyline(&self, coordinates: &[Coordinates]) -> Result<PolylineOptions> {
		Ok(PolylineOptions {
			points: self.to_points(coordinates)?,
		})
	}

	fn to_polygon(&self, polygon: &PolygonGeometry) -> Result<PolygonOptions> {
		let points = match polygon.exterior() {
			Some(ring) => self.to_points(&ring.0)?,
			None => Vec::new(),
		};
		let holes = polygon
			.holes()
			.iter()
			.map(|ring| self.to_points(&ring.0))
			.collect::<Result<_>>()?;
		Ok(PolygonOptions { points, holes })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::GeometryType;
	use approx::assert_abs_diff_eq;
	use gpkgmap_core::MapError;
	use pretty_assertions::assert_eq;

	fn wgs84() -> MapShapeConverter {
		MapShapeConverter::new(&Projection::wgs84()).unwrap()
	}

	#[test]
	fn point_becomes_lat_lng() {
		let shape = wgs84().to_shape(&Geometry::new_point([-90.2, 38.6])).unwrap();
		assert_eq!(shape.shape_type(), MapShapeType::LatLng);
		assert_eq!(shape.geometry_type, GeometryType::Point);
		assert_eq!(shape.as_lat_lng(), Some(LatLng::new(38.6, -90.2)));
	}

	#[test]
	fn mercator_point_is_transformed() {
		let converter = MapShapeConverter::new(&Projection::web_mercator()).unwrap();
		let p = converter.to_lat_lng(&Coordinates::new(-10046472.0, 4668223.0)).unwrap();
		assert_abs_diff_eq!(p.longitude, -90.248_993_49, epsilon = 1e-6);
		assert_abs_diff_eq!(p.latitude, 38.625_880_73, epsilon = 1e-6);
	}

	#[test]
	fn polygon_keeps_ring_order() {
		let exterior = vec![[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [0.0, 0.0]];
		let hole = vec![[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 1.0]];
		let shape = wgs84()
			.to_shape(&Geometry::new_polygon(vec![exterior, hole]))
			.unwrap();
		let MapShapeKind::PolygonOptions(options) = shape.shape else {
			panic!("expected polygon options");
		};
		assert_eq!(options.points[1], LatLng::new(10.0, 0.0));
		assert_eq!(options.holes.len(), 1);
		assert_eq!(options.holes[0][1], LatLng::new(1.0, 2.0));
	}

	#[test]
	fn every_geometry_kind_has_a_shape() {
		let converter = wgs84();
		let cases = [
			(Geometry::new_line_string(vec![[0.0, 0.0], [1.0, 1.0]]), MapShapeType::PolylineOptions),
			(Geometry::new_multi_point(vec![[0.0, 0.0]]), MapShapeType::MultiLatLng),
			(
				Geometry::new_multi_line_string(vec![vec![[0.0, 0.0], [1.0, 1.0]]]),
				MapShapeType::MultiPolylineOptions,
			),
			(
				Geometry::new_multi_polygon(vec![vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]]),
				MapShapeType::MultiPolygonOptions,
			),
			(
				Geometry::GeometryCollection(vec![Geometry::new_point([1.0, 1.0])]),
				MapShapeType::Collection,
			),
		];
		for (geometry, expected) in cases {
			assert_eq!(converter.to_shape(&geometry).unwrap().shape_type(), expected);
		}
	}

	#[test]
	fn unsupported_projection() {
		let err = MapShapeConverter::new(&Projection::new("EPSG", 32615)).err().unwrap();
		assert!(matches!(
			err.downcast_ref::<MapError>(),
			Some(MapError::UnsupportedProjection { .. })
		));
	}
}

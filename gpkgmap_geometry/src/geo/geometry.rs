use super::*;
use anyhow::Result;
use std::fmt::{self, Debug, Display};

/// The kind of a geometry, as named by the simple features model.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum GeometryType {
	Point,
	LineString,
	Polygon,
	MultiPoint,
	MultiLineString,
	MultiPolygon,
	GeometryCollection,
}

impl GeometryType {
	/// The upper-case name used in `gpkg_geometry_columns.geometry_type_name`.
	pub fn name(self) -> &'static str {
		match self {
			GeometryType::Point => "POINT",
			GeometryType::LineString => "LINESTRING",
			GeometryType::Polygon => "POLYGON",
			GeometryType::MultiPoint => "MULTIPOINT",
			GeometryType::MultiLineString => "MULTILINESTRING",
			GeometryType::MultiPolygon => "MULTIPOLYGON",
			GeometryType::GeometryCollection => "GEOMETRYCOLLECTION",
		}
	}

	/// The base WKB type code (1..=7).
	pub fn wkb_code(self) -> u32 {
		match self {
			GeometryType::Point => 1,
			GeometryType::LineString => 2,
			GeometryType::Polygon => 3,
			GeometryType::MultiPoint => 4,
			GeometryType::MultiLineString => 5,
			GeometryType::MultiPolygon => 6,
			GeometryType::GeometryCollection => 7,
		}
	}

	pub fn from_wkb_code(code: u32) -> Option<GeometryType> {
		Some(match code {
			1 => GeometryType::Point,
			2 => GeometryType::LineString,
			3 => GeometryType::Polygon,
			4 => GeometryType::MultiPoint,
			5 => GeometryType::MultiLineString,
			6 => GeometryType::MultiPolygon,
			7 => GeometryType::GeometryCollection,
			_ => return None,
		})
	}
}

impl Display for GeometryType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// A feature geometry of any kind.
#[derive(Clone, PartialEq)]
pub enum Geometry {
	Point(PointGeometry),
	LineString(LineStringGeometry),
	Polygon(PolygonGeometry),
	MultiPoint(MultiPointGeometry),
	MultiLineString(MultiLineStringGeometry),
	MultiPolygon(MultiPolygonGeometry),
	GeometryCollection(Vec<Geometry>),
}

impl Geometry {
	pub fn new_point(value: [f64; 2]) -> Self {
		Self::Point(PointGeometry::from(value))
	}
	pub fn new_line_string(value: Vec<[f64; 2]>) -> Self {
		Self::LineString(LineStringGeometry::from(value))
	}
	pub fn new_polygon(value: Vec<Vec<[f64; 2]>>) -> Self {
		Self::Polygon(PolygonGeometry::from(value))
	}
	pub fn new_multi_point(value: Vec<[f64; 2]>) -> Self {
		Self::MultiPoint(MultiPointGeometry::from(value))
	}
	pub fn new_multi_line_string(value: Vec<Vec<[f64; 2]>>) -> Self {
		Self::MultiLineString(MultiLineStringGeometry::from(value))
	}
	pub fn new_multi_polygon(value: Vec<Vec<Vec<[f64; 2]>>>) -> Self {
		Self::MultiPolygon(MultiPolygonGeometry::from(value))
	}

	pub fn geometry_type(&self) -> GeometryType {
		match self {
			Geometry::Point(_) => GeometryType::Point,
			Geometry::LineString(_) => GeometryType::LineString,
			Geometry::Polygon(_) => GeometryType::Polygon,
			Geometry::MultiPoint(_) => GeometryType::MultiPoint,
			Geometry::MultiLineString(_) => GeometryType::MultiLineString,
			Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
			Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
		}
	}

	pub fn is_empty(&self) -> bool {
		match self {
			Geometry::Point(g) => g.is_empty(),
			Geometry::LineString(g) => g.is_empty(),
			Geometry::Polygon(g) => g.is_empty(),
			Geometry::MultiPoint(g) => g.is_empty(),
			Geometry::MultiLineString(g) => g.is_empty(),
			Geometry::MultiPolygon(g) => g.is_empty(),
			Geometry::GeometryCollection(g) => g.iter().all(|c| c.is_empty()),
		}
	}

	pub fn verify(&self) -> Result<()> {
		match self {
			Geometry::Point(g) => g.verify(),
			Geometry::LineString(g) => g.verify(),
			Geometry::Polygon(g) => g.verify(),
			Geometry::MultiPoint(g) => g.verify(),
			Geometry::MultiLineString(g) => g.verify(),
			Geometry::MultiPolygon(g) => g.verify(),
			Geometry::GeometryCollection(g) => g.iter().try_for_each(|c| c.verify()),
		}
	}

	/// Returns `Some([x_min, y_min, x_max, y_max])`, or `None` if the geometry is empty.
	pub fn compute_bounds(&self) -> Option<[f64; 4]> {
		match self {
			Geometry::Point(g) => g.compute_bounds(),
			Geometry::LineString(g) => g.compute_bounds(),
			Geometry::Polygon(g) => g.compute_bounds(),
			Geometry::MultiPoint(g) => g.compute_bounds(),
			Geometry::MultiLineString(g) => g.compute_bounds(),
			Geometry::MultiPolygon(g) => g.compute_bounds(),
			Geometry::GeometryCollection(g) => g
				.iter()
				.fold(None, |acc, c| merge_bounds(acc, c.compute_bounds())),
		}
	}
}

impl Debug for Geometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let (type_name, inner): (&str, &dyn Debug) = match self {
			Geometry::Point(g) => ("Point", g),
			Geometry::LineString(g) => ("LineString", g),
			Geometry::Polygon(g) => ("Polygon", g),
			Geometry::MultiPoint(g) => ("MultiPoint", g),
			Geometry::MultiLineString(g) => ("MultiLineString", g),
			Geometry::MultiPolygon(g) => ("MultiPolygon", g),
			Geometry::GeometryCollection(g) => ("GeometryCollection", g),
		};
		f.debug_tuple(type_name).field(inner).finish()
	}
}

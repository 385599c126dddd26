use crate::{Coordinates, Geometry, GeometryType, PolygonGeometry};
use anyhow::Result;
use byteorder::{LittleEndian, WriteBytesExt};

/// Appends `geometry` as little-endian 2D ISO WKB.
pub fn write_wkb(geometry: &Geometry, buf: &mut Vec<u8>) -> Result<()> {
	write_header(buf, geometry.geometry_type())?;
	match geometry {
		Geometry::Point(g) => write_position(buf, &g.0)?,
		Geometry::LineString(g) => write_coordinates(buf, &g.0)?,
		Geometry::Polygon(g) => write_polygon(buf, g)?,
		Geometry::MultiPoint(g) => {
			write_count(buf, g.0.len())?;
			for point in &g.0 {
				write_header(buf, GeometryType::Point)?;
				write_position(buf, &point.0)?;
			}
		}
		Geometry::MultiLineString(g) => {
			write_count(buf, g.0.len())?;
			for line in &g.0 {
				write_header(buf, GeometryType::LineString)?;
				write_coordinates(buf, &line.0)?;
			}
		}
		Geometry::MultiPolygon(g) => {
			write_count(buf, g.0.len())?;
			for polygon in &g.0 {
				write_header(buf, GeometryType::Polygon)?;
				write_polygon(buf, polygon)?;
			}
		}
		Geometry::GeometryCollection(members) => {
			write_count(buf, members.len())?;
			for member in members {
				write_wkb(member, buf)?;
			}
		}
	}
	Ok(())
}

fn write_header(buf: &mut Vec<u8>, geometry_type: GeometryType) -> Result<()> {
	buf.write_u8(1)?;
	buf.write_u32::<LittleEndian>(geometry_type.wkb_code())?;
	Ok(())
}

fn write_count(buf: &mut Vec<u8>, count: usize) -> Result<()> {
	buf.write_u32::<LittleEndian>(u32::try_from(count)?)?;
	Ok(())
}

fn write_position(buf: &mut Vec<u8>, c: &Coordinates) -> Result<()> {
	buf.write_f64::<LittleEndian>(c.x())?;
	buf.write_f64::<LittleEndian>(c.y())?;
	Ok(())
}

fn write_coordinates(buf: &mut Vec<u8>, coordinates: &[Coordinates]) -> Result<()> {
	write_count(buf, coordinates.len())?;
	for c in coordinates {
		write_position(buf, c)?;
	}
	Ok(())
}

fn write_polygon(buf: &mut Vec<u8>, polygon: &PolygonGeometry) -> Result<()> {
	write_count(buf, polygon.0.len())?;
	for ring in &polygon.0 {
		write_coordinates(buf, &ring.0)?;
	}
	Ok(())
}

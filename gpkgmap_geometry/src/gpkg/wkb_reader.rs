use super::invalid;
use crate::{
	Coordinates, Geometry, GeometryType, LineStringGeometry, MultiLineStringGeometry, MultiPointGeometry,
	MultiPolygonGeometry, PointGeometry, PolygonGeometry, RingGeometry,
};
use anyhow::Result;
use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use gpkgmap_core::MapError;
use std::io::Cursor;

const EWKB_Z: u32 = 0x8000_0000;
const EWKB_M: u32 = 0x4000_0000;
const EWKB_SRID: u32 = 0x2000_0000;
const MAX_DEPTH: usize = 32;

/// Decodes a WKB geometry. Z and M ordinates are read and dropped.
pub fn read_wkb(data: &[u8]) -> Result<Geometry> {
	let mut reader = WkbReader {
		cursor: Cursor::new(data),
		little_endian: true,
	};
	reader.read_geometry(0)
}

struct WkbReader<'a> {
	cursor: Cursor<&'a [u8]>,
	little_endian: bool,
}

struct WkbHeader {
	geometry_type: GeometryType,
	dimensions: usize,
}

impl WkbReader<'_> {
	fn remaining(&self) -> usize {
		let len = self.cursor.get_ref().len() as u64;
		len.saturating_sub(self.cursor.position()) as usize
	}

	fn read_u8(&mut self) -> Result<u8> {
		self.cursor.read_u8().map_err(|_| invalid("unexpected end of WKB"))
	}

	fn read_u32(&mut self) -> Result<u32> {
		let value = if self.little_endian {
			self.cursor.read_u32::<LittleEndian>()
		} else {
			self.cursor.read_u32::<BigEndian>()
		};
		value.map_err(|_| invalid("unexpected end of WKB"))
	}

	fn read_f64(&mut self) -> Result<f64> {
		let value = if self.little_endian {
			self.cursor.read_f64::<LittleEndian>()
		} else {
			self.cursor.read_f64::<BigEndian>()
		};
		value.map_err(|_| invalid("unexpected end of WKB"))
	}

	/// Reads an element count and checks it against the bytes left.
	fn read_count(&mut self, min_element_size: usize) -> Result<usize> {
		let count = self.read_u32()? as usize;
		if count.saturating_mul(min_element_size) > self.remaining() {
			return Err(invalid(format!("WKB announces {count} elements but is too short")));
		}
		Ok(count)
	}

	fn read_header(&mut self) -> Result<WkbHeader> {
		self.little_endian = match self.read_u8()? {
			0 => false,
			1 => true,
			b => return Err(invalid(format!("invalid WKB byte order {b}"))),
		};
		let raw = self.read_u32()?;
		if raw & EWKB_SRID != 0 {
			self.read_u32()?;
		}
		let code = raw & 0x0FFF_FFFF;
		let (has_z, has_m) = match code / 1000 {
			0 => (raw & EWKB_Z != 0, raw & EWKB_M != 0),
			1 => (true, false),
			2 => (false, true),
			3 => (true, true),
			_ => return Err(MapError::UnsupportedGeometry(format!("WKB type {raw}")).into()),
		};
		let geometry_type = GeometryType::from_wkb_code(code % 1000)
			.ok_or_else(|| MapError::UnsupportedGeometry(format!("WKB type {raw}")))?;
		Ok(WkbHeader {
			geometry_type,
			dimensions: 2 + usize::from(has_z) + usize::from(has_m),
		})
	}

	fn read_geometry(&mut self, depth: usize) -> Result<Geometry> {
		if depth > MAX_DEPTH {
			return Err(invalid("WKB geometry collections are nested too deeply"));
		}
		let header = self.read_header()?;
		let dims = header.dimensions;
		Ok(match header.geometry_type {
			GeometryType::Point => Geometry::Point(self.read_point(dims)?),
			GeometryType::LineString => Geometry::LineString(LineStringGeometry(self.read_coordinates(dims)?)),
			GeometryType::Polygon => Geometry::Polygon(self.read_polygon(dims)?),
			GeometryType::MultiPoint => {
				let count = self.read_count(5)?;
				let mut points = Vec::with_capacity(count);
				for _ in 0..count {
					let dims = self.read_member_header(GeometryType::MultiPoint, GeometryType::Point)?;
					points.push(self.read_point(dims)?);
				}
				Geometry::MultiPoint(MultiPointGeometry(points))
			}
			GeometryType::MultiLineString => {
				let count = self.read_count(9)?;
				let mut lines = Vec::with_capacity(count);
				for _ in 0..count {
					let dims = self.read_member_header(GeometryType::MultiLineString, GeometryType::LineString)?;
					lines.push(LineStringGeometry(self.read_coordinates(dims)?));
				}
				Geometry::MultiLineString(MultiLineStringGeometry(lines))
			}
			GeometryType::MultiPolygon => {
				let count = self.read_count(9)?;
				let mut polygons = Vec::with_capacity(count);
				for _ in 0..count {
					let dims = self.read_member_header(GeometryType::MultiPolygon, GeometryType::Polygon)?;
					polygons.push(self.read_polygon(dims)?);
				}
				Geometry::MultiPolygon(MultiPolygonGeometry(polygons))
			}
			GeometryType::GeometryCollection => {
				let count = self.read_count(5)?;
				let mut members = Vec::with_capacity(count);
				for _ in 0..count {
					members.push(self.read_geometry(depth + 1)?);
				}
				Geometry::GeometryCollection(members)
			}
		})
	}

	/// Reads the header of a multi geometry member and returns its dimension count.
	fn read_member_header(&mut self, parent: GeometryType, expected: GeometryType) -> Result<usize> {
		let header = self.read_header()?;
		if header.geometry_type != expected {
			return Err(invalid(format!(
				"{parent} must contain {expected} members, found {}",
				header.geometry_type
			)));
		}
		Ok(header.dimensions)
	}

	fn read_position(&mut self, dims: usize) -> Result<Coordinates> {
		let x = self.read_f64()?;
		let y = self.read_f64()?;
		for _ in 2..dims {
			self.read_f64()?;
		}
		Ok(Coordinates::new(x, y))
	}

	fn read_point(&mut self, dims: usize) -> Result<PointGeometry> {
		Ok(PointGeometry(self.read_position(dims)?))
	}

	fn read_coordinates(&mut self, dims: usize) -> Result<Vec<Coordinates>> {
		let count = self.read_count(dims * 8)?;
		(0..count).map(|_| self.read_position(dims)).collect()
	}

	fn read_polygon(&mut self, dims: usize) -> Result<PolygonGeometry> {
		let count = self.read_count(4)?;
		let mut rings = Vec::with_capacity(count);
		for _ in 0..count {
			rings.push(RingGeometry(self.read_coordinates(dims)?));
		}
		Ok(PolygonGeometry(rings))
	}
}

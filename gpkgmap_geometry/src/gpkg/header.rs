use super::{invalid, read_wkb, write_wkb};
use crate::Geometry;
use anyhow::{Result, bail};
use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};
use gpkgmap_core::{Blob, MapError};
use std::fmt::Debug;

const MAGIC: &[u8; 2] = b"GP";
const FLAG_LITTLE_ENDIAN: u8 = 0b0000_0001;
const FLAG_ENVELOPE: u8 = 0b0000_1110;
const FLAG_EMPTY: u8 = 0b0001_0000;
const FLAG_EXTENDED: u8 = 0b0010_0000;

/// A decoded value of a GeoPackage geometry column.
///
/// Only the xy part of the envelope is kept; z and m ranges are skipped.
#[derive(Clone, PartialEq)]
pub struct GeoPackageGeometry {
	pub srs_id: i32,
	/// `[min_x, min_y, max_x, max_y]`
	pub envelope: Option<[f64; 4]>,
	pub empty: bool,
	pub geometry: Geometry,
}

impl GeoPackageGeometry {
	pub fn new(srs_id: i32, geometry: Geometry) -> GeoPackageGeometry {
		GeoPackageGeometry {
			srs_id,
			envelope: geometry.compute_bounds(),
			empty: geometry.is_empty(),
			geometry,
		}
	}

	/// Parses a geometry blob.
	///
	/// # Errors
	/// [`MapError::InvalidGeometryData`] for malformed headers or truncated WKB,
	/// [`MapError::UnsupportedGeometry`] for extended geometry types and unknown WKB codes.
	pub fn from_bytes(data: &[u8]) -> Result<GeoPackageGeometry> {
		if data.len() < 8 {
			return Err(invalid(format!("geometry blob is only {} bytes long", data.len())));
		}
		if &data[0..2] != MAGIC {
			return Err(invalid("geometry blob does not start with 'GP'"));
		}
		if data[2] != 0 {
			return Err(invalid(format!("unknown GeoPackage binary version {}", data[2])));
		}

		let flags = data[3];
		if flags & FLAG_EXTENDED != 0 {
			bail!(MapError::UnsupportedGeometry(
				"extended GeoPackage geometry type".to_string()
			));
		}
		let little_endian = flags & FLAG_LITTLE_ENDIAN != 0;
		let read_f64 = |b: &[u8]| {
			if little_endian {
				LittleEndian::read_f64(b)
			} else {
				BigEndian::read_f64(b)
			}
		};
		let srs_id = if little_endian {
			LittleEndian::read_i32(&data[4..8])
		} else {
			BigEndian::read_i32(&data[4..8])
		};

		let envelope_len = match (flags & FLAG_ENVELOPE) >> 1 {
			0 => 0,
			1 => 32,
			2 | 3 => 48,
			4 => 64,
			n => return Err(invalid(format!("invalid envelope indicator {n}"))),
		};
		let wkb_start = 8 + envelope_len;
		if data.len() < wkb_start {
			return Err(invalid("geometry blob is shorter than its envelope"));
		}

		// stored as min_x, max_x, min_y, max_y
		let envelope = (envelope_len > 0).then(|| {
			let v: Vec<f64> = data[8..40].chunks_exact(8).map(read_f64).collect();
			[v[0], v[2], v[1], v[3]]
		});

		let geometry = read_wkb(&data[wkb_start..])?;
		let empty = flags & FLAG_EMPTY != 0 || geometry.is_empty();

		Ok(GeoPackageGeometry {
			srs_id,
			envelope,
			empty,
			geometry,
		})
	}

	/// Encodes as little-endian with an xy envelope, or without one if the geometry is empty.
	pub fn to_bytes(&self) -> Result<Blob> {
		let mut buf: Vec<u8> = Vec::new();
		buf.extend_from_slice(MAGIC);
		buf.write_u8(0)?;

		let envelope = if self.empty { None } else { self.envelope };
		let mut flags = FLAG_LITTLE_ENDIAN;
		if envelope.is_some() {
			flags |= 1 << 1;
		}
		if self.empty {
			flags |= FLAG_EMPTY;
		}
		buf.write_u8(flags)?;
		buf.write_i32::<LittleEndian>(self.srs_id)?;

		if let Some([min_x, min_y, max_x, max_y]) = envelope {
			for v in [min_x, max_x, min_y, max_y] {
				buf.write_f64::<LittleEndian>(v)?;
			}
		}

		write_wkb(&self.geometry, &mut buf)?;
		Ok(Blob::from(buf))
	}

	/// Returns the geometry unless the blob is flagged or decoded as empty.
	pub fn into_geometry(self) -> Option<Geometry> {
		if self.empty { None } else { Some(self.geometry) }
	}
}

impl Debug for GeoPackageGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("GeoPackageGeometry")
			.field("srs_id", &self.srs_id)
			.field("empty", &self.empty)
			.field("geometry", &self.geometry)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn error_of(data: &[u8]) -> MapError {
		GeoPackageGeometry::from_bytes(data)
			.unwrap_err()
			.downcast::<MapError>()
			.unwrap()
	}

	#[test]
	fn big_endian_point_without_envelope() {
		let mut data = vec![b'G', b'P', 0, 0b0000_0000, 0, 0, 0x0F, 0x11];
		data.extend_from_slice(&[0, 0, 0, 0, 1]); // big endian point
		data.extend_from_slice(&1.5f64.to_be_bytes());
		data.extend_from_slice(&(-2.0f64).to_be_bytes());

		let gpkg = GeoPackageGeometry::from_bytes(&data).unwrap();
		assert_eq!(gpkg.srs_id, 3857);
		assert_eq!(gpkg.envelope, None);
		assert!(!gpkg.empty);
		assert_eq!(gpkg.geometry, Geometry::new_point([1.5, -2.0]));
	}

	#[test]
	fn skips_xyz_envelope() {
		let mut data = vec![b'G', b'P', 0, 0b0000_0101];
		data.extend_from_slice(&4326i32.to_le_bytes());
		for v in [0.0f64, 2.0, 1.0, 3.0, -5.0, 5.0] {
			data.extend_from_slice(&v.to_le_bytes());
		}
		data.extend_from_slice(&[1, 1, 0, 0, 0]);
		data.extend_from_slice(&2.0f64.to_le_bytes());
		data.extend_from_slice(&3.0f64.to_le_bytes());

		let gpkg = GeoPackageGeometry::from_bytes(&data).unwrap();
		assert_eq!(gpkg.envelope, Some([0.0, 1.0, 2.0, 3.0]));
		assert_eq!(gpkg.geometry, Geometry::new_point([2.0, 3.0]));
	}

	#[test]
	fn writes_and_reads_polygon_with_hole() {
		let polygon = Geometry::new_polygon(vec![
			vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]],
			vec![[2.0, 2.0], [2.0, 4.0], [4.0, 4.0], [2.0, 2.0]],
		]);
		let blob = GeoPackageGeometry::new(3857, polygon.clone()).to_bytes().unwrap();
		assert_eq!(&blob.as_slice()[0..4], &[b'G', b'P', 0, 0b0000_0011]);

		let decoded = GeoPackageGeometry::from_bytes(blob.as_slice()).unwrap();
		assert_eq!(decoded.envelope, Some([0.0, 0.0, 10.0, 10.0]));
		assert_eq!(decoded.into_geometry(), Some(polygon));
	}

	#[test]
	fn empty_flag() {
		let blob = GeoPackageGeometry::new(4326, Geometry::new_point([f64::NAN, f64::NAN]))
			.to_bytes()
			.unwrap();
		assert_eq!(blob.as_slice()[3], 0b0001_0001);
		let decoded = GeoPackageGeometry::from_bytes(blob.as_slice()).unwrap();
		assert!(decoded.empty);
		assert_eq!(decoded.into_geometry(), None);
	}

	#[test]
	fn rejects_malformed_headers() {
		assert!(matches!(error_of(b"GP"), MapError::InvalidGeometryData(_)));
		assert!(matches!(
			error_of(&[b'X', b'P', 0, 1, 0, 0, 0, 0, 1]),
			MapError::InvalidGeometryData(_)
		));
		assert!(matches!(
			error_of(&[b'G', b'P', 1, 1, 0, 0, 0, 0, 1]),
			MapError::InvalidGeometryData(_)
		));
		// envelope indicator 5
		assert!(matches!(
			error_of(&[b'G', b'P', 0, 0b0000_1011, 0, 0, 0, 0, 1]),
			MapError::InvalidGeometryData(_)
		));
		// envelope announced but missing
		assert!(matches!(
			error_of(&[b'G', b'P', 0, 0b0000_0011, 0, 0, 0, 0, 1]),
			MapError::InvalidGeometryData(_)
		));
	}

	#[test]
	fn rejects_extended_types() {
		assert!(matches!(
			error_of(&[b'G', b'P', 0, 0b0010_0001, 0, 0, 0, 0, 1]),
			MapError::UnsupportedGeometry(_)
		));
	}
}

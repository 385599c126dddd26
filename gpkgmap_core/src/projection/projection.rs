use crate::{MapError, ProjectionTransform};
use anyhow::Result;
use std::fmt::{self, Debug, Display};

pub const EPSG: &str = "EPSG";
pub const NONE: &str = "NONE";

const WEB_MERCATOR_CODES: [i64; 4] = [3857, 900913, 3785, 102100];

/// A coordinate reference system identified by authority and code, e.g. `EPSG:3857`.
///
/// Only the two systems the map needs have transforms: geodetic WGS84 and spherical
/// Web Mercator. GeoPackage also defines the undefined systems `NONE:0` (geographic)
/// and `NONE:-1` (cartesian); the geographic one is treated as WGS84 degrees.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Projection {
	pub authority: String,
	pub code: i64,
}

impl Projection {
	pub fn new(authority: &str, code: i64) -> Projection {
		Projection {
			authority: authority.to_ascii_uppercase(),
			code,
		}
	}

	/// EPSG:4326, longitude/latitude in degrees.
	pub fn wgs84() -> Projection {
		Projection::new(EPSG, 4326)
	}

	/// EPSG:3857, spherical Mercator in meters.
	pub fn web_mercator() -> Projection {
		Projection::new(EPSG, 3857)
	}

	pub fn undefined_geographic() -> Projection {
		Projection::new(NONE, 0)
	}

	pub fn undefined_cartesian() -> Projection {
		Projection::new(NONE, -1)
	}

	pub fn is_wgs84(&self) -> bool {
		match self.authority.as_str() {
			EPSG => self.code == 4326,
			"OGC" => self.code == 84,
			NONE => self.code == 0,
			_ => false,
		}
	}

	pub fn is_web_mercator(&self) -> bool {
		match self.authority.as_str() {
			EPSG | "ESRI" => WEB_MERCATOR_CODES.contains(&self.code),
			_ => false,
		}
	}

	/// Two projections are equivalent if they describe the same coordinate space,
	/// e.g. `EPSG:900913` and `EPSG:3857`.
	pub fn is_equivalent(&self, other: &Projection) -> bool {
		self == other || (self.is_wgs84() && other.is_wgs84()) || (self.is_web_mercator() && other.is_web_mercator())
	}

	/// Builds the transformation from this projection into `target`.
	///
	/// # Errors
	/// Fails with [`MapError::UnsupportedProjection`] for any pair other than identity,
	/// Web Mercator → WGS84 and WGS84 → Web Mercator.
	pub fn transformation(&self, target: &Projection) -> Result<ProjectionTransform> {
		ProjectionTransform::new(self, target)
	}

	pub(crate) fn unsupported(&self, target: &Projection) -> MapError {
		MapError::UnsupportedProjection {
			from: self.to_string(),
			to: target.to_string(),
		}
	}
}

impl Display for Projection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.authority, self.code)
	}
}

impl Debug for Projection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Projection({self})")
	}
}

//! Geodetic rectangles and the builder that grows them from positions.

use crate::{LatLng, MapError};
use anyhow::Result;
use std::fmt::{self, Debug};

/// An axis-aligned rectangle in latitude/longitude.
///
/// A `southwest` longitude greater than the `northeast` one marks a rectangle crossing
/// the antimeridian; it covers `west..=180` and `-180..=east`.
#[derive(Clone, Copy, PartialEq)]
pub struct LatLngBounds {
	pub southwest: LatLng,
	pub northeast: LatLng,
}

impl LatLngBounds {
	/// Starts an empty builder.
	pub fn builder() -> LatLngBoundsBuilder {
		LatLngBoundsBuilder::default()
	}

	/// Covers all longitudes between `south` and `north`.
	pub fn world(south: f64, north: f64) -> LatLngBounds {
		LatLngBounds {
			southwest: LatLng {
				latitude: south,
				longitude: -180.0,
			},
			northeast: LatLng {
				latitude: north,
				longitude: 180.0,
			},
		}
	}

	pub fn crosses_antimeridian(&self) -> bool {
		self.southwest.longitude > self.northeast.longitude
	}

	/// The midpoint of the latitude span and of the longitude span, measured eastwards
	/// from the west edge.
	///
	/// # Examples
	/// ```
	/// use gpkgmap_core::{LatLng, LatLngBounds};
	///
	/// let mut builder = LatLngBounds::builder();
	/// builder.include(LatLng::new(10.0, 20.0));
	/// builder.include(LatLng::new(30.0, 40.0));
	/// let center = builder.build().unwrap().center();
	/// assert_eq!(center, LatLng::new(20.0, 30.0));
	/// ```
	pub fn center(&self) -> LatLng {
		let mut east = self.northeast.longitude;
		if self.crosses_antimeridian() {
			east += 360.0;
		}
		LatLng::new(
			(self.southwest.latitude + self.northeast.latitude) / 2.0,
			(self.southwest.longitude + east) / 2.0,
		)
	}

	pub fn contains(&self, point: &LatLng) -> bool {
		(self.southwest.latitude..=self.northeast.latitude).contains(&point.latitude)
			&& contains_longitude(self.southwest.longitude, self.northeast.longitude, point.longitude)
	}
}

impl Debug for LatLngBounds {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "LatLngBounds({:?}, {:?})", self.southwest, self.northeast)
	}
}

fn contains_longitude(west: f64, east: f64, longitude: f64) -> bool {
	if west <= east {
		(west..=east).contains(&longitude)
	} else {
		longitude >= west || longitude <= east
	}
}

/// Degrees travelled eastwards from `from` to `to`, in `[0, 360)`.
fn eastward_distance(from: f64, to: f64) -> f64 {
	(to - from).rem_euclid(360.0)
}

/// Accumulates positions into the minimal enclosing [`LatLngBounds`].
///
/// A longitude outside the current span extends whichever edge needs the shorter move,
/// so points on both sides of the antimeridian end up in a crossing rectangle.
#[derive(Clone, Default, Debug)]
pub struct LatLngBoundsBuilder {
	south: f64,
	west: f64,
	north: f64,
	east: f64,
	count: usize,
}

impl LatLngBoundsBuilder {
	pub fn include(&mut self, point: LatLng) -> &mut Self {
		if self.count == 0 {
			self.south = point.latitude;
			self.north = point.latitude;
			self.west = point.longitude;
			self.east = point.longitude;
		} else {
			self.south = self.south.min(point.latitude);
			self.north = self.north.max(point.latitude);
			let longitude = point.longitude;
			if !contains_longitude(self.west, self.east, longitude) {
				if eastward_distance(longitude, self.west) < eastward_distance(self.east, longitude) {
					self.west = longitude;
				} else {
					self.east = longitude;
				}
			}
		}
		self.count += 1;
		self
	}

	/// Builds the bounds, failing with [`MapError::EmptyBounds`] if nothing was included.
	pub fn build(&self) -> Result<LatLngBounds> {
		if self.count == 0 {
			return Err(MapError::EmptyBounds.into());
		}
		Ok(LatLngBounds {
			southwest: LatLng {
				latitude: self.south,
				longitude: self.west,
			},
			northeast: LatLng {
				latitude: self.north,
				longitude: self.east,
			},
		})
	}
}

use std::fmt::{self, Debug};

/// A geodetic position in degrees, the coordinate space of the map widget.
///
/// Construction normalizes the values the way map widgets do: latitude is clamped to
/// `[-90, 90]` and longitude is wrapped into `[-180, 180)`.
#[derive(Clone, Copy, PartialEq)]
pub struct LatLng {
	pub latitude: f64,
	pub longitude: f64,
}

impl LatLng {
	/// Creates a normalized position.
	///
	/// # Examples
	/// ```
	/// use gpkgmap_core::LatLng;
	///
	/// let p = LatLng::new(95.0, 190.0);
	/// assert_eq!(p.latitude, 90.0);
	/// assert_eq!(p.longitude, -170.0);
	/// ```
	pub fn new(latitude: f64, longitude: f64) -> LatLng {
		let longitude = if (-180.0..180.0).contains(&longitude) {
			longitude
		} else {
			((longitude - 180.0) % 360.0 + 360.0) % 360.0 - 180.0
		};
		LatLng {
			latitude: latitude.clamp(-90.0, 90.0),
			longitude,
		}
	}

	/// Returns `[longitude, latitude]`, the x/y order used by projections.
	pub fn as_xy(&self) -> [f64; 2] {
		[self.longitude, self.latitude]
	}
}

impl Debug for LatLng {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "LatLng({}, {})", self.latitude, self.longitude)
	}
}

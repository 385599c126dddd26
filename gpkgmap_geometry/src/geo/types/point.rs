use super::{Coordinates, GeometryTrait};
use std::fmt::Debug;

/// A single position.
#[derive(Clone, PartialEq)]
pub struct PointGeometry(pub Coordinates);

impl PointGeometry {
	#[must_use]
	pub fn new(x: f64, y: f64) -> Self {
		Self(Coordinates::new(x, y))
	}
	#[must_use]
	pub fn x(&self) -> f64 {
		self.0.x()
	}
	#[must_use]
	pub fn y(&self) -> f64 {
		self.0.y()
	}
}

impl GeometryTrait for PointGeometry {
	fn verify(&self) -> anyhow::Result<()> {
		anyhow::ensure!(self.0.is_finite(), "point must have finite coordinates");
		Ok(())
	}

	fn is_empty(&self) -> bool {
		self.0.is_nan()
	}

	fn compute_bounds(&self) -> Option<[f64; 4]> {
		if self.is_empty() {
			return None;
		}
		Some([self.x(), self.y(), self.x(), self.y()])
	}
}

impl Debug for PointGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}

impl<T> From<T> for PointGeometry
where
	Coordinates: From<T>,
{
	fn from(value: T) -> Self {
		Self(Coordinates::from(value))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_point_is_nan_nan() {
		// WKB encodes an empty point as (NaN, NaN)
		let p = PointGeometry::new(f64::NAN, f64::NAN);
		assert!(p.is_empty());
		assert_eq!(p.compute_bounds(), None);
		assert!(p.verify().is_err());
	}

	#[test]
	fn bounds() {
		let p = PointGeometry::from([3.0, 4.0]);
		assert_eq!(p.compute_bounds(), Some([3.0, 4.0, 3.0, 4.0]));
		assert_eq!(format!("{p:?}"), "[3.0, 4.0]");
	}
}

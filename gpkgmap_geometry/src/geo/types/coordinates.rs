use std::fmt::{self, Debug};

/// An `(x, y)` pair in the units of the feature's projection. Z and M are not kept.
#[derive(Clone, Copy, PartialEq)]
pub struct Coordinates([f64; 2]);

impl Coordinates {
	#[must_use]
	pub fn new(x: f64, y: f64) -> Self {
		Self([x, y])
	}

	#[must_use]
	pub fn x(&self) -> f64 {
		self.0[0]
	}

	#[must_use]
	pub fn y(&self) -> f64 {
		self.0[1]
	}

	pub fn is_finite(&self) -> bool {
		self.0.iter().all(|v| v.is_finite())
	}

	/// GeoPackage encodes an empty point as `(NaN, NaN)`.
	pub fn is_nan(&self) -> bool {
		self.0.iter().all(|v| v.is_nan())
	}
}

impl From<[f64; 2]> for Coordinates {
	fn from(value: [f64; 2]) -> Self {
		Coordinates(value)
	}
}

impl<'a, T> From<&'a [T; 2]> for Coordinates
where
	T: Copy + Into<f64>,
{
	fn from(value: &'a [T; 2]) -> Self {
		Coordinates([value[0].into(), value[1].into()])
	}
}

impl Debug for Coordinates {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{:?}, {:?}]", self.0[0], self.0[1])
	}
}

use crate::{CoordinateTransform, LatLng, LatLngBounds};
use anyhow::{Context, Result, ensure};
use std::fmt::Debug;

const FULL_TURN_TOLERANCE: f64 = 1e-9;

/// A rectangle in the units of some projection, e.g. meters for EPSG:3857 or degrees
/// for EPSG:4326.
///
/// Unlike [`LatLngBounds`] the values are not normalized; the owner decides what the
/// numbers mean by pairing the box with a [`Projection`](crate::Projection).
///
/// # Examples
/// ```
/// use gpkgmap_core::BoundingBox;
///
/// let mut bbox = BoundingBox::new(-10.0, -5.0, 10.0, 5.0).unwrap();
/// bbox.extend(&BoundingBox::new(-12.0, -3.0, 8.0, 6.0).unwrap());
/// assert_eq!(bbox.as_tuple(), (-12.0, -5.0, 10.0, 6.0));
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct BoundingBox {
	pub min_x: f64,
	pub min_y: f64,
	pub max_x: f64,
	pub max_y: f64,
}

impl BoundingBox {
	/// Creates a box from `min_x, min_y, max_x, max_y`, rejecting inverted or non-finite input.
	pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<BoundingBox> {
		BoundingBox {
			min_x,
			min_y,
			max_x,
			max_y,
		}
		.checked()
	}

	/// The four corners in the order south-west, south-east, north-west, north-east.
	pub fn corners(&self) -> [[f64; 2]; 4] {
		[
			[self.min_x, self.min_y],
			[self.max_x, self.min_y],
			[self.min_x, self.max_y],
			[self.max_x, self.max_y],
		]
	}

	pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
		(self.min_x, self.min_y, self.max_x, self.max_y)
	}

	pub fn width(&self) -> f64 {
		self.max_x - self.min_x
	}

	pub fn height(&self) -> f64 {
		self.max_y - self.min_y
	}

	/// Expands the box in place so that it also covers `other`.
	pub fn extend(&mut self, other: &BoundingBox) {
		self.min_x = self.min_x.min(other.min_x);
		self.min_y = self.min_y.min(other.min_y);
		self.max_x = self.max_x.max(other.max_x);
		self.max_y = self.max_y.max(other.max_y);
	}

	/// Reprojects all four corners and returns the minimal box enclosing them.
	///
	/// Transforming only two opposite corners is not enough once the transform is
	/// non-linear, so every corner takes part.
	pub fn transform(&self, transform: &dyn CoordinateTransform) -> Result<BoundingBox> {
		let mut result: Option<BoundingBox> = None;
		for [x, y] in self.corners() {
			let (tx, ty) = transform
				.transform(x, y)
				.with_context(|| format!("transforming corner ({x}, {y}) of {self:?}"))?;
			let corner = BoundingBox::new(tx, ty, tx, ty)?;
			match result.as_mut() {
				Some(r) => r.extend(&corner),
				None => result = Some(corner),
			}
		}
		result.context("bounding box without corners")
	}

	/// Reprojects all four corners to geodetic coordinates and builds the enclosing
	/// [`LatLngBounds`]. The transform must produce `(longitude, latitude)`.
	///
	/// An edge on the antimeridian yields bounds crossing it. A box spanning 360 degrees
	/// of longitude or more becomes [`LatLngBounds::world`].
	pub fn to_lat_lng_bounds(&self, to_wgs84: &dyn CoordinateTransform) -> Result<LatLngBounds> {
		let mut builder = LatLngBounds::builder();
		let (mut min_lon, mut max_lon) = (f64::INFINITY, f64::NEG_INFINITY);
		for [x, y] in self.corners() {
			let (lon, lat) = to_wgs84
				.transform(x, y)
				.with_context(|| format!("transforming corner ({x}, {y}) of {self:?}"))?;
			min_lon = min_lon.min(lon);
			max_lon = max_lon.max(lon);
			builder.include(LatLng::new(lat, lon));
		}
		let bounds = builder.build()?;
		if max_lon - min_lon >= 360.0 - FULL_TURN_TOLERANCE {
			return Ok(LatLngBounds::world(bounds.southwest.latitude, bounds.northeast.latitude));
		}
		Ok(bounds)
	}

	fn checked(self) -> Result<Self> {
		ensure!(
			[self.min_x, self.min_y, self.max_x, self.max_y]
				.iter()
				.all(|v| v.is_finite()),
			"bounding box values must be finite: {self:?}"
		);
		ensure!(
			self.min_x <= self.max_x,
			"min_x ({}) must be <= max_x ({})",
			self.min_x,
			self.max_x
		);
		ensure!(
			self.min_y <= self.max_y,
			"min_y ({}) must be <= max_y ({})",
			self.min_y,
			self.max_y
		);
		Ok(self)
	}
}

impl Debug for BoundingBox {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"BoundingBox({}, {}, {}, {})",
			self.min_x, self.min_y, self.max_x, self.max_y
		)
	}
}

impl TryFrom<[f64; 4]> for BoundingBox {
	type Error = anyhow::Error;

	fn try_from(input: [f64; 4]) -> Result<Self> {
		BoundingBox::new(input[0], input[1], input[2], input[3])
	}
}

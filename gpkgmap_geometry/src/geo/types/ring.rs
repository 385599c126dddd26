use super::{Coordinates, GeometryTrait, linestring::coordinate_bounds};
use anyhow::{Result, ensure};
use std::fmt::Debug;

/// A closed ring, the building block of polygons. First and last position are equal.
#[derive(Clone, PartialEq, Default)]
pub struct RingGeometry(pub Vec<Coordinates>);

impl RingGeometry {
	/// Signed area by the shoelace formula: positive for counterclockwise rings,
	/// negative for clockwise ones.
	pub fn signed_area(&self) -> f64 {
		let mut sum = 0f64;
		if let Some(mut p2) = self.0.last() {
			for p1 in &self.0 {
				sum += (p2.x() - p1.x()) * (p1.y() + p2.y());
				p2 = p1;
			}
		}
		sum / 2.0
	}

	pub fn coordinates(&self) -> &[Coordinates] {
		&self.0
	}
}

impl GeometryTrait for RingGeometry {
	fn verify(&self) -> Result<()> {
		ensure!(self.0.len() >= 4, "Ring must have at least 4 points");
		ensure!(self.0.first() == self.0.last(), "Ring must be closed");
		Ok(())
	}

	fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	fn compute_bounds(&self) -> Option<[f64; 4]> {
		coordinate_bounds(&self.0)
	}
}

impl Debug for RingGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_vec!(RingGeometry, Coordinates);

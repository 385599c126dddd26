use super::{Coordinates, GeometryTrait};
use anyhow::{Result, ensure};
use std::fmt::Debug;

/// An ordered sequence of positions.
#[derive(Clone, PartialEq, Default)]
pub struct LineStringGeometry(pub Vec<Coordinates>);

impl LineStringGeometry {
	pub fn coordinates(&self) -> &[Coordinates] {
		&self.0
	}
}

impl GeometryTrait for LineStringGeometry {
	fn verify(&self) -> Result<()> {
		ensure!(self.0.len() >= 2, "LineString must have at least 2 points");
		Ok(())
	}

	fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	fn compute_bounds(&self) -> Option<[f64; 4]> {
		coordinate_bounds(&self.0)
	}
}

pub(crate) fn coordinate_bounds(coordinates: &[Coordinates]) -> Option<[f64; 4]> {
	let first = coordinates.first()?;
	let mut bounds = [first.x(), first.y(), first.x(), first.y()];
	for c in &coordinates[1..] {
		bounds[0] = bounds[0].min(c.x());
		bounds[1] = bounds[1].min(c.y());
		bounds[2] = bounds[2].max(c.x());
		bounds[3] = bounds[3].max(c.y());
	}
	Some(bounds)
}

impl Debug for LineStringGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_vec!(LineStringGeometry, Coordinates);

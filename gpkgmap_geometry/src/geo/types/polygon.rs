use super::{GeometryTrait, RingGeometry, traits::bounds_of};
use anyhow::{Result, ensure};
use std::fmt::Debug;

/// A polygon: the first ring is the exterior, any further rings are holes.
#[derive(Clone, PartialEq, Default)]
pub struct PolygonGeometry(pub Vec<RingGeometry>);

impl PolygonGeometry {
	pub fn exterior(&self) -> Option<&RingGeometry> {
		self.0.first()
	}

	pub fn holes(&self) -> &[RingGeometry] {
		if self.0.is_empty() { &[] } else { &self.0[1..] }
	}
}

impl GeometryTrait for PolygonGeometry {
	fn verify(&self) -> Result<()> {
		ensure!(!self.0.is_empty(), "Polygon must have at least one ring");
		for ring in &self.0 {
			ring.verify()?;
		}
		Ok(())
	}

	fn is_empty(&self) -> bool {
		self.0.iter().all(|r| r.is_empty())
	}

	fn compute_bounds(&self) -> Option<[f64; 4]> {
		// holes lie inside the exterior, but be tolerant of sloppy data
		bounds_of(&self.0)
	}
}

impl Debug for PolygonGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_vec!(PolygonGeometry, RingGeometry);

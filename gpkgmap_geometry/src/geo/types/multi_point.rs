use super::{GeometryTrait, PointGeometry, traits::bounds_of};
use anyhow::Result;
use std::fmt::Debug;

#[derive(Clone, PartialEq, Default)]
pub struct MultiPointGeometry(pub Vec<PointGeometry>);

impl GeometryTrait for MultiPointGeometry {
	fn verify(&self) -> Result<()> {
		self.0.iter().try_for_each(|p| p.verify())
	}

	fn is_empty(&self) -> bool {
		self.0.iter().all(|p| p.is_empty())
	}

	fn compute_bounds(&self) -> Option<[f64; 4]> {
		bounds_of(&self.0)
	}
}

impl Debug for MultiPointGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_vec!(MultiPointGeometry, PointGeometry);

use super::{GeometryTrait, LineStringGeometry, traits::bounds_of};
use anyhow::Result;
use std::fmt::Debug;

#[derive(Clone, PartialEq, Default)]
pub struct MultiLineStringGeometry(pub Vec<LineStringGeometry>);

impl GeometryTrait for MultiLineStringGeometry {
	fn verify(&self) -> Result<()> {
		self.0.iter().try_for_each(|l| l.verify())
	}

	fn is_empty(&self) -> bool {
		self.0.iter().all(|l| l.is_empty())
	}

	fn compute_bounds(&self) -> Option<[f64; 4]> {
		bounds_of(&self.0)
	}
}

impl Debug for MultiLineStringGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_vec!(MultiLineStringGeometry, LineStringGeometry);

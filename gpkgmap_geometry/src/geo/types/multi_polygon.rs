use super::{GeometryTrait, PolygonGeometry, traits::bounds_of};
use anyhow::Result;
use std::fmt::Debug;

#[derive(Clone, PartialEq, Default)]
pub struct MultiPolygonGeometry(pub Vec<PolygonGeometry>);

impl GeometryTrait for MultiPolygonGeometry {
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

impl Debug for MultiPolygonGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_vec!(MultiPolygonGeometry, PolygonGeometry);

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bounds_span_all_members() {
		let multi = MultiPolygonGeometry::from(vec![
			vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
			vec![vec![[6.0, -2.0], [9.0, 0.0], [9.0, 4.0], [6.0, -2.0]]],
		]);
		assert_eq!(multi.compute_bounds(), Some([0.0, -2.0, 9.0, 4.0]));
		assert!(multi.verify().is_ok());
		assert!(MultiPolygonGeometry::default().is_empty());
	}
}

use anyhow::Result;
use std::fmt::Debug;

/// Common interface of all geometry primitives.
pub trait GeometryTrait: Debug + Clone {
	/// Checks structural validity, e.g. that rings are closed.
	fn verify(&self) -> Result<()>;

	/// Returns `true` if the geometry has no coordinates at all.
	fn is_empty(&self) -> bool;

	/// Returns `Some([x_min, y_min, x_max, y_max])`, or `None` for an empty geometry.
	fn compute_bounds(&self) -> Option<[f64; 4]>;
}

pub(crate) fn merge_bounds(a: Option<[f64; 4]>, b: Option<[f64; 4]>) -> Option<[f64; 4]> {
	match (a, b) {
		(Some(a), Some(b)) => Some([a[0].min(b[0]), a[1].min(b[1]), a[2].max(b[2]), a[3].max(b[3])]),
		(a, None) => a,
		(None, b) => b,
	}
}

pub(crate) fn bounds_of<'a, G: GeometryTrait + 'a>(items: impl IntoIterator<Item = &'a G>) -> Option<[f64; 4]> {
	items
		.into_iter()
		.fold(None, |acc, item| merge_bounds(acc, item.compute_bounds()))
}

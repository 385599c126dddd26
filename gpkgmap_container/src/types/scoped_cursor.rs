use super::{FeatureCursor, FeatureRow};
use anyhow::Result;

/// Owns a [`FeatureCursor`] and closes it exactly once when dropped.
///
/// Iteration may end by exhaustion, by an error returned from `next_row`, or by the
/// consumer bailing out early; in every case the cursor is closed on drop.
pub struct ScopedCursor {
	cursor: Box<dyn FeatureCursor>,
}

impl ScopedCursor {
	pub fn new(cursor: Box<dyn FeatureCursor>) -> ScopedCursor {
		ScopedCursor { cursor }
	}

	pub fn next_row(&mut self) -> Result<Option<FeatureRow>> {
		self.cursor.next_row()
	}

	/// Closes the cursor now instead of at the end of the scope.
	pub fn close(self) {
		drop(self);
	}
}

impl Iterator for ScopedCursor {
	type Item = Result<FeatureRow>;

	fn next(&mut self) -> Option<Self::Item> {
		self.next_row().transpose()
	}
}

impl Drop for ScopedCursor {
	fn drop(&mut self) {
		log::trace!("closing feature cursor");
		self.cursor.close();
	}
}

use crate::{AddedShape, Viewport};
use std::fmt::{self, Display};

/// What was drawn for one feature dataset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DatasetSummary {
	pub name: String,
	pub rows: usize,
	pub markers: usize,
	/// Map objects other than markers.
	pub shapes: usize,
}

impl DatasetSummary {
	pub fn new(name: &str) -> DatasetSummary {
		DatasetSummary {
			name: name.to_string(),
			..Default::default()
		}
	}

	pub fn record(&mut self, added: &AddedShape) {
		let markers = added.marker_count();
		self.rows += 1;
		self.markers += markers;
		self.shapes += added.object_count() - markers;
	}
}

/// Result of one run of [`MapReadyPipeline`](crate::MapReadyPipeline).
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSummary {
	pub container: String,
	pub tile_table: String,
	pub datasets: Vec<DatasetSummary>,
	pub viewport: Viewport,
}

impl RenderSummary {
	pub fn markers(&self) -> usize {
		self.datasets.iter().map(|d| d.markers).sum()
	}

	pub fn shapes(&self) -> usize {
		self.datasets.iter().map(|d| d.shapes).sum()
	}
}

impl Display for RenderSummary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "container: {}", self.container)?;
		writeln!(f, "tile overlay: {}", self.tile_table)?;
		for d in &self.datasets {
			writeln!(
				f,
				"features {}: {} rows, {} markers, {} shapes",
				d.name, d.rows, d.markers, d.shapes
			)?;
		}
		let target = self.viewport.target;
		write!(
			f,
			"camera: {:.6}, {:.6} at zoom {}",
			target.latitude, target.longitude, self.viewport.zoom
		)
	}
}

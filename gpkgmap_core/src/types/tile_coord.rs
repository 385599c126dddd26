//! XYZ tile addressing as used by tile overlays.

use anyhow::{Result, ensure};
use std::fmt::{self, Debug};

/// A tile coordinate in the Web-Mercator XYZ pyramid, `y` counting from the north.
#[derive(Eq, PartialEq, Clone, Hash, Copy)]
pub struct TileCoord {
	/// The zoom level of the tile.
	pub level: u8,
	/// The x index of the tile.
	pub x: u32,
	/// The y index of the tile.
	pub y: u32,
}

impl TileCoord {
	/// Creates a new `TileCoord`.
	///
	/// # Errors
	/// Returns an error if `level` > 31 or `x`/`y` lie outside the level.
	pub fn new(level: u8, x: u32, y: u32) -> Result<TileCoord> {
		ensure!(level <= 31, "level ({level}) must be <= 31");
		let max = 1u64 << level;
		ensure!(u64::from(x) < max, "x ({x}) out of bounds for level {level}");
		ensure!(u64::from(y) < max, "y ({y}) out of bounds for level {level}");
		Ok(TileCoord { level, x, y })
	}

	/// Number of tiles along one axis at this level.
	pub fn tiles_per_axis(&self) -> u64 {
		1u64 << self.level
	}
}

impl Debug for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TileCoord({}, [{}, {}])", self.level, self.x, self.y)
	}
}

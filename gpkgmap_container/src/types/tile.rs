use gpkgmap_core::Blob;
use std::fmt::Debug;

/// Encoded image data of one tile plus its pixel size.
#[derive(Clone, PartialEq)]
pub struct Tile {
	pub width: u32,
	pub height: u32,
	pub data: Blob,
}

impl Tile {
	pub fn new(width: u32, height: u32, data: Blob) -> Tile {
		Tile { width, height, data }
	}
}

impl Debug for Tile {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Tile({}x{}, {} bytes)", self.width, self.height, self.data.len())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn debug() {
		let tile = Tile::new(256, 256, Blob::from(vec![1, 2, 3]));
		assert_eq!(format!("{tile:?}"), "Tile(256x256, 3 bytes)");
	}
}

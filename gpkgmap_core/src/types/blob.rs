//! This module provides the [`Blob`] struct, a thin wrapper around [`Vec<u8>`] for tile
//! bytes and geometry blobs read from SQLite.

use std::fmt::Debug;

/// A simple wrapper around [`Vec<u8>`].
///
/// ```rust
/// use gpkgmap_core::Blob;
///
/// let blob = Blob::from(vec![0x89, 0x50, 0x4e, 0x47]);
/// assert_eq!(blob.len(), 4);
/// assert_eq!(blob.as_slice(), &[0x89, 0x50, 0x4e, 0x47]);
/// ```
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Blob(Vec<u8>);

impl Blob {
	pub fn new_empty() -> Blob {
		Blob(Vec::new())
	}

	pub fn as_slice(&self) -> &[u8] {
		&self.0
	}

	pub fn into_vec(self) -> Vec<u8> {
		self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<Vec<u8>> for Blob {
	fn from(value: Vec<u8>) -> Self {
		Blob(value)
	}
}

impl From<&[u8]> for Blob {
	fn from(value: &[u8]) -> Self {
		Blob(value.to_vec())
	}
}

impl Debug for Blob {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Blob({}): ", self.0.len())?;
		let head = &self.0[..self.0.len().min(8)];
		for byte in head {
			write!(f, "{byte:02x} ")?;
		}
		if self.0.len() > 8 {
			write!(f, "...")?;
		}
		Ok(())
	}
}

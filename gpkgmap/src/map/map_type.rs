use serde::Deserialize;
use std::fmt::{self, Display};

/// Base map imagery shown below all overlays.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MapType {
	None,
	Normal,
	#[default]
	Satellite,
	Terrain,
	Hybrid,
}

impl Display for MapType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			MapType::None => "none",
			MapType::Normal => "normal",
			MapType::Satellite => "satellite",
			MapType::Terrain => "terrain",
			MapType::Hybrid => "hybrid",
		})
	}
}

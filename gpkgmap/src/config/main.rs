use super::IconsConfig;
use crate::MapType;
use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::{
	fs::File,
	io::{BufReader, Read},
	path::Path,
};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
	/// Base map imagery
	pub map_type: MapType,

	/// Stacking order of the tile overlay. Negative values draw it below the features.
	pub tile_overlay_z_index: f32,

	/// Zoom level whose stored tiles define the extent the camera is fitted to
	pub bounds_zoom: u8,

	/// Zoom level of the camera after fitting
	pub camera_zoom: f32,

	/// Marker icons
	pub icons: IconsConfig,

	/// Feature attribute used as marker title
	pub title_attribute: String,

	/// Rows fetched per query while iterating a feature table
	pub cursor_batch_size: usize,
}

impl Default for Config {
	fn default() -> Self {
		Config {
			map_type: MapType::Satellite,
			tile_overlay_z_index: -2.0,
			bounds_zoom: 14,
			camera_zoom: 12.0,
			icons: IconsConfig::default(),
			title_attribute: String::from("name"),
			cursor_batch_size: 100,
		}
	}
}

impl Config {
	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		let config: Config = serde_yaml_ng::from_reader(reader)?;
		config.checked()
	}

	pub fn from_string(text: &str) -> Result<Self> {
		let config: Config = serde_yaml_ng::from_str(text)?;
		config.checked()
	}

	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("opening config {path:?}"))?;
		Config::from_reader(BufReader::new(file)).with_context(|| format!("parsing config {path:?}"))
	}

	fn checked(self) -> Result<Self> {
		ensure!(self.cursor_batch_size > 0, "cursor_batch_size must be > 0");
		ensure!(self.bounds_zoom <= 31, "bounds_zoom ({}) must be <= 31", self.bounds_zoom);
		ensure!(
			self.camera_zoom.is_finite() && self.camera_zoom >= 0.0,
			"camera_zoom ({}) must be a non-negative number",
			self.camera_zoom
		);
		ensure!(!self.title_attribute.is_empty(), "title_attribute must not be empty");
		Ok(self)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use std::collections::BTreeMap;

	#[test]
	fn empty_is_default() {
		assert_eq!(Config::from_string("{}").unwrap(), Config::default());
	}

	#[test]
	fn parse_full_config() {
		let cfg = Config::from_string(
			"map_type: terrain
tile_overlay_z_index: -5
bounds_zoom: 13
camera_zoom: 10.5
icons:
  default: pin
  datasets:
    Cafes: cup
title_attribute: label
cursor_batch_size: 7
",
		)
		.unwrap();

		assert_eq!(
			cfg,
			Config {
				map_type: MapType::Terrain,
				tile_overlay_z_index: -5.0,
				bounds_zoom: 13,
				camera_zoom: 10.5,
				icons: IconsConfig {
					default: "pin".to_string(),
					datasets: BTreeMap::from([("Cafes".to_string(), "cup".to_string())]),
				},
				title_attribute: "label".to_string(),
				cursor_batch_size: 7,
			}
		);
	}

	#[test]
	fn partial_icons_keep_defaults() {
		let cfg = Config::from_string("icons:\n  default: pin\n").unwrap();
		assert_eq!(cfg.icons.default, "pin");
		assert_eq!(cfg.icons.datasets.get("Pizza").map(String::as_str), Some("pizza"));
	}

	#[test]
	fn unknown_field_is_rejected() {
		let err = Config::from_string("zoom: 3").unwrap_err();
		assert!(err.to_string().contains("unknown field"), "{err}");
	}

	#[test]
	fn invalid_values_are_rejected() {
		assert!(Config::from_string("cursor_batch_size: 0").is_err());
		assert!(Config::from_string("bounds_zoom: 40").is_err());
		assert!(Config::from_string("map_type: globe").is_err());
	}

	#[test]
	fn from_path() -> Result<()> {
		let file = assert_fs::NamedTempFile::new("gpkgmap.yml")?;
		std::fs::write(file.path(), "map_type: none\n")?;
		let cfg = Config::from_path(file.path())?;
		assert_eq!(cfg.map_type, MapType::None);
		assert!(Config::from_path(Path::new("/does/not/exist.yml")).is_err());
		Ok(())
	}
}

#![allow(unused)]

use anyhow::{Result, bail};
use assert_cmd::{Command, cargo};
use gpkgmap::{CameraUpdate, MapObjectId, MapType, MapView, RecordingMap, TileOverlayOptions};
use gpkgmap_container::{
	FeatureCursor, FeatureDataset, FeatureRow, GeoContainer, Tile, TileDataset, TileProvider,
};
use gpkgmap_core::{BoundingBox, Projection, TileCoord};
use gpkgmap_geometry::{GeoProperties, GeoValue, Geometry, MarkerOptions, PolygonOptions, PolylineOptions};
use std::{cell::Cell, path::PathBuf, rc::Rc};
use tempfile::{TempDir, tempdir};

#[cfg(windows)]
pub const BINARY_NAME: &str = "gpkgmap.exe";
#[cfg(not(windows))]
pub const BINARY_NAME: &str = "gpkgmap";

pub fn gpkgmap_cmd() -> Command {
	Command::new(cargo::cargo_bin!())
}

/// Writes the St. Louis package into a new temporary directory.
pub fn st_louis_file() -> (TempDir, PathBuf) {
	let dir = tempdir().expect("failed to create temp dir");
	let path = dir.path().join("StLouis.gpkg");
	gpkgmap_container::testing::write_st_louis(&path).expect("failed to write St. Louis package");
	(dir, path)
}

/// A feature row with a `name` attribute.
pub fn row(id: i64, name: &str, geometry: Geometry) -> FeatureRow {
	FeatureRow::new(id, GeoProperties::from(vec![("name", GeoValue::from(name))]), Some(geometry))
}

/// Open/close bookkeeping of [`MockFeatures`] cursors.
#[derive(Default)]
pub struct CursorLog {
	pub opened: Cell<usize>,
	pub closed: Cell<usize>,
}

#[derive(Clone)]
pub struct MockFeatures {
	pub name: String,
	pub projection: Projection,
	pub rows: Vec<FeatureRow>,
	/// `next_row` fails when asked for the row with this index.
	pub fail_at: Option<usize>,
	pub log: Rc<CursorLog>,
}

impl MockFeatures {
	pub fn new(name: &str, rows: Vec<FeatureRow>) -> MockFeatures {
		MockFeatures {
			name: name.to_string(),
			projection: Projection::wgs84(),
			rows,
			fail_at: None,
			log: Rc::new(CursorLog::default()),
		}
	}
}

impl FeatureDataset for MockFeatures {
	fn name(&self) -> &str {
		&self.name
	}

	fn projection(&self) -> &Projection {
		&self.projection
	}

	fn query_for_all(&self) -> Result<Box<dyn FeatureCursor>> {
		self.log.opened.set(self.log.opened.get() + 1);
		Ok(Box::new(MockCursor {
			rows: self.rows.clone(),
			position: 0,
			fail_at: self.fail_at,
			log: self.log.clone(),
		}))
	}
}

struct MockCursor {
	rows: Vec<FeatureRow>,
	position: usize,
	fail_at: Option<usize>,
	log: Rc<CursorLog>,
}

impl FeatureCursor for MockCursor {
	fn next_row(&mut self) -> Result<Option<FeatureRow>> {
		if Some(self.position) == self.fail_at {
			bail!("disk I/O error");
		}
		let row = self.rows.get(self.position).cloned();
		self.position += 1;
		Ok(row)
	}

	fn close(&mut self) {
		self.log.closed.set(self.log.closed.get() + 1);
	}
}

#[derive(Clone)]
pub struct MockTiles {
	pub name: String,
	pub projection: Projection,
	pub bbox: BoundingBox,
}

impl TileDataset for MockTiles {
	fn name(&self) -> &str {
		&self.name
	}

	fn projection(&self) -> &Projection {
		&self.projection
	}

	fn bounding_box(&self, _zoom: u8) -> Result<BoundingBox> {
		Ok(self.bbox)
	}

	fn tile_provider(&self) -> Result<Box<dyn TileProvider>> {
		Ok(Box::new(MockProvider(self.name.clone())))
	}
}

struct MockProvider(String);

impl TileProvider for MockProvider {
	fn name(&self) -> &str {
		&self.0
	}

	fn has_tile(&self, _coord: &TileCoord) -> Result<bool> {
		Ok(false)
	}

	fn get_tile(&self, _coord: &TileCoord) -> Result<Option<Tile>> {
		Ok(None)
	}
}

pub struct MockContainer {
	pub name: String,
	pub tiles: Vec<MockTiles>,
	pub features: Vec<MockFeatures>,
}

impl MockContainer {
	pub fn new(name: &str, tiles: Vec<MockTiles>, features: Vec<MockFeatures>) -> MockContainer {
		MockContainer {
			name: name.to_string(),
			tiles,
			features,
		}
	}
}

impl GeoContainer for MockContainer {
	fn name(&self) -> &str {
		&self.name
	}

	fn tile_tables(&self) -> Result<Vec<String>> {
		Ok(self.tiles.iter().map(|t| t.name.clone()).collect())
	}

	fn feature_tables(&self) -> Result<Vec<String>> {
		Ok(self.features.iter().map(|f| f.name.clone()).collect())
	}

	fn tile_dataset(&self, table: &str) -> Result<Box<dyn TileDataset>> {
		let Some(t) = self.tiles.iter().find(|t| t.name == table) else {
			bail!("no tile table '{table}'");
		};
		Ok(Box::new(t.clone()))
	}

	fn feature_dataset(&self, table: &str) -> Result<Box<dyn FeatureDataset>> {
		let Some(f) = self.features.iter().find(|f| f.name == table) else {
			bail!("no feature table '{table}'");
		};
		Ok(Box::new(f.clone()))
	}
}

/// A [`RecordingMap`] that also records the order of calls.
#[derive(Default)]
pub struct CallLog {
	pub map: RecordingMap,
	pub calls: Vec<&'static str>,
}

impl MapView for CallLog {
	fn set_map_type(&mut self, map_type: MapType) {
		self.calls.push("set_map_type");
		self.map.set_map_type(map_type);
	}

	fn add_tile_overlay(&mut self, options: TileOverlayOptions) -> Result<MapObjectId> {
		self.calls.push("add_tile_overlay");
		self.map.add_tile_overlay(options)
	}

	fn add_marker(&mut self, options: MarkerOptions) -> Result<MapObjectId> {
		self.calls.push("add_marker");
		self.map.add_marker(options)
	}

	fn add_polyline(&mut self, options: PolylineOptions) -> Result<MapObjectId> {
		self.calls.push("add_polyline");
		self.map.add_polyline(options)
	}

	fn add_polygon(&mut self, options: PolygonOptions) -> Result<MapObjectId> {
		self.calls.push("add_polygon");
		self.map.add_polygon(options)
	}

	fn move_camera(&mut self, update: CameraUpdate) -> Result<()> {
		self.calls.push("move_camera");
		self.map.move_camera(update)
	}
}

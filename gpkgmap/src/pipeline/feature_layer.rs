use crate::{AddedShape, Config, DatasetSummary, IconPolicy, MapView, add_shape_to_map};
use anyhow::{Context, Result};
use gpkgmap_container::{FeatureDataset, FeatureRow, GeoContainer, ScopedCursor};
use gpkgmap_core::MapError;
use gpkgmap_geometry::{GeoValue, Icon, MapShape, MapShapeConverter, MapShapeKind, MarkerOptions};

/// Draws the rows of feature datasets onto a map.
///
/// Rows converting to a bare position become markers titled with the `title_attribute`
/// value and carrying the dataset's icon. Every other shape is added as converted.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureLayerRenderer {
	pub icons: IconPolicy,
	pub title_attribute: String,
}

impl FeatureLayerRenderer {
	pub fn new(icons: IconPolicy, title_attribute: &str) -> FeatureLayerRenderer {
		FeatureLayerRenderer {
			icons,
			title_attribute: title_attribute.to_string(),
		}
	}

	pub fn from_config(config: &Config) -> FeatureLayerRenderer {
		FeatureLayerRenderer::new(IconPolicy::from(&config.icons), &config.title_attribute)
	}

	/// Renders every feature table of `container` in the order the container reports.
	pub fn render_all(&self, container: &dyn GeoContainer, map: &mut dyn MapView) -> Result<Vec<DatasetSummary>> {
		let mut summaries = Vec::new();
		for table in container.feature_tables()? {
			let dataset = container.feature_dataset(&table)?;
			let summary = self
				.render_dataset(dataset.as_ref(), map)
				.with_context(|| format!("rendering feature table '{table}'"))?;
			summaries.push(summary);
		}
		Ok(summaries)
	}

	/// Renders all rows of one dataset.
	///
	/// The first failing row aborts the dataset. The cursor is closed in every case.
	pub fn render_dataset(&self, dataset: &dyn FeatureDataset, map: &mut dyn MapView) -> Result<DatasetSummary> {
		let name = dataset.name();
		let converter = MapShapeConverter::new(dataset.projection())?;
		let icon = self.icons.icon_for(name);
		log::debug!("render '{name}' ({}) with icon {icon:?}", dataset.projection());

		let mut cursor = ScopedCursor::new(dataset.query_for_all()?);
		let mut summary = DatasetSummary::new(name);
		while let Some(row) = cursor.next_row()? {
			let added = self
				.render_row(name, &row, &converter, icon, map)
				.with_context(|| format!("rendering feature {}", row.id))?;
			summary.record(&added);
		}
		cursor.close();

		log::debug!(
			"rendered '{name}': {} rows, {} markers, {} shapes",
			summary.rows,
			summary.markers,
			summary.shapes
		);
		Ok(summary)
	}

	fn render_row(
		&self,
		dataset: &str,
		row: &FeatureRow,
		converter: &MapShapeConverter,
		icon: &Icon,
		map: &mut dyn MapView,
	) -> Result<AddedShape> {
		let geometry = row.geometry.as_ref().ok_or_else(|| MapError::MissingGeometry {
			dataset: dataset.to_string(),
			row: row.id.to_string(),
		})?;
		let shape = converter.to_shape(geometry)?;

		match shape.as_lat_lng() {
			Some(position) => {
				let title = row
					.value(&self.title_attribute)
					.and_then(GeoValue::as_str)
					.ok_or_else(|| MapError::MissingAttribute {
						dataset: dataset.to_string(),
						row: row.id.to_string(),
						attribute: self.title_attribute.clone(),
					})?;
				let marker = MarkerOptions::new(position).with_title(title).with_icon(icon.clone());
				add_shape_to_map(
					map,
					&MapShape::new(shape.geometry_type, MapShapeKind::MarkerOptions(marker)),
				)
			}
			None => add_shape_to_map(map, &shape),
		}
	}
}

impl Default for FeatureLayerRenderer {
	fn default() -> Self {
		FeatureLayerRenderer::new(IconPolicy::default(), "name")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::RecordingMap;
	use approx::assert_relative_eq;
	use gpkgmap_container::{
		GeoPackage,
		testing::{GeoPackageBuilder, st_louis},
	};
	use gpkgmap_geometry::{GeoPackageGeometry, Geometry};
	use pretty_assertions::assert_eq;

	#[test]
	fn renders_st_louis() -> Result<()> {
		let package = st_louis()?;
		let mut map = RecordingMap::new();
		let summaries = FeatureLayerRenderer::default().render_all(&*package, &mut map)?;

		let counts: Vec<(&str, usize, usize, usize)> = summaries
			.iter()
			.map(|s| (s.name.as_str(), s.rows, s.markers, s.shapes))
			.collect();
		assert_eq!(
			counts,
			vec![
				("Cafes", 3, 3, 0),
				("Parks", 1, 0, 1),
				("Pizza", 2, 2, 0),
				("Streets", 1, 0, 1)
			]
		);

		let titles: Vec<(&str, &str)> = map
			.markers
			.iter()
			.map(|m| (m.title.as_deref().unwrap(), m.icon.as_ref().unwrap().name.as_str()))
			.collect();
		assert_eq!(
			titles,
			vec![
				("Cafe", "poi"),
				("Kaldi's", "poi"),
				("Blueprint", "poi"),
				("Pie Palace", "pizza"),
				("Dewey's", "pizza")
			]
		);

		// stored in EPSG:3857, drawn in degrees
		let pie_palace = map.markers[3].position;
		assert_relative_eq!(pie_palace.longitude, -90.24, epsilon = 1e-9);
		assert_relative_eq!(pie_palace.latitude, 38.63, epsilon = 1e-9);

		assert_eq!(map.polygons.len(), 1);
		assert_eq!(map.polygons[0].holes.len(), 1);
		assert_eq!(map.polylines.len(), 1);
		assert_eq!(map.polylines[0].points.len(), 3);
		Ok(())
	}

	fn package_with(rows: &[(Option<&str>, Option<Vec<u8>>)]) -> Result<(assert_fs::TempDir, GeoPackage)> {
		let dir = assert_fs::TempDir::new()?;
		let path = dir.path().join("Test.gpkg");
		let mut builder = GeoPackageBuilder::create(&path)?;
		builder.add_feature_table("Places", "POINT", 4326, &[])?;
		for (name, geometry) in rows {
			builder.insert_raw_feature("Places", *name, geometry.clone())?;
		}
		drop(builder);
		let package = GeoPackage::open_path(&path)?;
		Ok((dir, package))
	}

	fn point_blob(x: f64, y: f64) -> Result<Vec<u8>> {
		Ok(GeoPackageGeometry::new(4326, Geometry::new_point([x, y]))
			.to_bytes()?
			.into_vec())
	}

	#[test]
	fn missing_title() -> Result<()> {
		let (_dir, package) = package_with(&[
			(Some("A"), Some(point_blob(1.0, 2.0)?)),
			(None, Some(point_blob(3.0, 4.0)?)),
		])?;
		let mut map = RecordingMap::new();
		let err = FeatureLayerRenderer::default()
			.render_all(&package, &mut map)
			.unwrap_err();
		assert_eq!(
			err.downcast_ref::<MapError>(),
			Some(&MapError::MissingAttribute {
				dataset: "Places".to_string(),
				row: "2".to_string(),
				attribute: "name".to_string(),
			})
		);
		assert_eq!(map.markers.len(), 1);
		Ok(())
	}

	#[test]
	fn missing_geometry() -> Result<()> {
		let (_dir, package) = package_with(&[(Some("A"), None)])?;
		let mut map = RecordingMap::new();
		let err = FeatureLayerRenderer::default()
			.render_all(&package, &mut map)
			.unwrap_err();
		assert!(matches!(
			err.downcast_ref::<MapError>(),
			Some(MapError::MissingGeometry { .. })
		));
		assert!(map.markers.is_empty());
		Ok(())
	}

	#[test]
	fn custom_title_attribute() -> Result<()> {
		let (_dir, package) = package_with(&[(Some("A"), Some(point_blob(1.0, 2.0)?))])?;
		let mut map = RecordingMap::new();
		let renderer = FeatureLayerRenderer::new(IconPolicy::new(Icon::from_resource("pin")), "label");
		let err = renderer.render_all(&package, &mut map).unwrap_err();
		assert_eq!(
			err.downcast_ref::<MapError>(),
			Some(&MapError::MissingAttribute {
				dataset: "Places".to_string(),
				row: "1".to_string(),
				attribute: "label".to_string(),
			})
		);
		Ok(())
	}
}

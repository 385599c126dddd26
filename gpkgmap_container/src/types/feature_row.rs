use gpkgmap_geometry::{GeoProperties, GeoValue, Geometry};

/// One row of a feature table: its primary key, attribute values and geometry.
///
/// `geometry` is `None` if the column is NULL or holds an empty geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureRow {
	pub id: i64,
	pub properties: GeoProperties,
	pub geometry: Option<Geometry>,
}

impl FeatureRow {
	pub fn new(id: i64, properties: GeoProperties, geometry: Option<Geometry>) -> FeatureRow {
		FeatureRow {
			id,
			properties,
			geometry,
		}
	}

	pub fn value(&self, column: &str) -> Option<&GeoValue> {
		self.properties.get(column)
	}
}

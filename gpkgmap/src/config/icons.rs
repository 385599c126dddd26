use serde::Deserialize;
use std::collections::BTreeMap;

/// Marker icons: one default plus overrides by feature dataset name.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct IconsConfig {
	/// Icon used for datasets without an entry in `datasets`.
	pub default: String,

	/// Icon per dataset name. Names are matched exactly.
	pub datasets: BTreeMap<String, String>,
}

impl Default for IconsConfig {
	fn default() -> Self {
		IconsConfig {
			default: String::from("poi"),
			datasets: BTreeMap::from([(String::from("Pizza"), String::from("pizza"))]),
		}
	}
}

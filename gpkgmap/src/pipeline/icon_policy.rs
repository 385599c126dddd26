use crate::IconsConfig;
use gpkgmap_geometry::Icon;
use std::collections::BTreeMap;

/// Chooses the marker icon of a feature dataset by its name.
#[derive(Clone, Debug, PartialEq)]
pub struct IconPolicy {
	default: Icon,
	datasets: BTreeMap<String, Icon>,
}

impl IconPolicy {
	/// A policy that uses `default` for every dataset.
	pub fn new(default: Icon) -> IconPolicy {
		IconPolicy {
			default,
			datasets: BTreeMap::new(),
		}
	}

	pub fn with_icon(mut self, dataset: &str, icon: Icon) -> Self {
		self.datasets.insert(dataset.to_string(), icon);
		self
	}

	/// The icon for `dataset`. Dataset names are compared exactly.
	pub fn icon_for(&self, dataset: &str) -> &Icon {
		self.datasets.get(dataset).unwrap_or(&self.default)
	}
}

impl From<&IconsConfig> for IconPolicy {
	fn from(config: &IconsConfig) -> Self {
		config
			.datasets
			.iter()
			.fold(IconPolicy::new(Icon::from_resource(&config.default)), |policy, (dataset, icon)| {
				policy.with_icon(dataset, Icon::from_resource(icon))
			})
	}
}

impl Default for IconPolicy {
	fn default() -> Self {
		IconPolicy::from(&IconsConfig::default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("Pizza", "pizza")]
	#[case("Cafes", "poi")]
	#[case("pizza", "poi")]
	#[case("", "poi")]
	fn default_policy(#[case] dataset: &str, #[case] icon: &str) {
		assert_eq!(IconPolicy::default().icon_for(dataset).name, icon);
	}

	#[test]
	fn from_config() {
		let config = IconsConfig {
			default: "pin".to_string(),
			datasets: [("Cafes".to_string(), "cup".to_string())].into(),
		};
		let policy = IconPolicy::from(&config);
		assert_eq!(policy.icon_for("Cafes"), &Icon::from_resource("cup"));
		assert_eq!(policy.icon_for("Pizza"), &Icon::from_resource("pin"));
	}
}

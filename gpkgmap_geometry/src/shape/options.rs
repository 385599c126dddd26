use gpkgmap_core::LatLng;
use std::fmt::{self, Debug};

/// A named bitmap resource used as marker image.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Icon {
	pub name: String,
}

impl Icon {
	pub fn from_resource(name: &str) -> Icon {
		Icon { name: name.to_string() }
	}
}

impl Debug for Icon {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Icon({})", self.name)
	}
}

/// A point marker with optional title and icon.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerOptions {
	pub position: LatLng,
	pub title: Option<String>,
	pub icon: Option<Icon>,
}

impl MarkerOptions {
	pub fn new(position: LatLng) -> MarkerOptions {
		MarkerOptions {
			position,
			title: None,
			icon: None,
		}
	}

	pub fn with_title(mut self, title: &str) -> Self {
		self.title = Some(title.to_string());
		self
	}

	pub fn with_icon(mut self, icon: Icon) -> Self {
		self.icon = Some(icon);
		self
	}
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct PolylineOptions {
	pub points: Vec<LatLng>,
}

/// Outer ring in `points`, inner rings in `holes`, both in stored order.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct PolygonOptions {
	pub points: Vec<LatLng>,
	pub holes: Vec<Vec<LatLng>>,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct MultiLatLng(pub Vec<LatLng>);

#[derive(Clone, Debug, PartialEq, Default)]
pub struct MultiPolylineOptions(pub Vec<PolylineOptions>);

#[derive(Clone, Debug, PartialEq, Default)]
pub struct MultiPolygonOptions(pub Vec<PolygonOptions>);

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn marker_builder() {
		let marker = MarkerOptions::new(LatLng::new(1.0, 2.0))
			.with_title("Pie Palace")
			.with_icon(Icon::from_resource("pizza"));
		assert_eq!(marker.title.as_deref(), Some("Pie Palace"));
		assert_eq!(format!("{:?}", marker.icon.unwrap()), "Icon(pizza)");
	}
}

use crate::Projection;
use anyhow::{Result, ensure};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

static MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;
static RADIUS: f64 = 6_378_137.0; // meters

/// Anything that maps an `(x, y)` pair from one coordinate space to another.
///
/// [`ProjectionTransform`] is the built-in implementation; tests and hosts can plug in
/// their own.
pub trait CoordinateTransform {
	fn transform(&self, x: f64, y: f64) -> Result<(f64, f64)>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TransformKind {
	Identity,
	MercatorToWgs84,
	Wgs84ToMercator,
}

/// A transformation between two supported projections.
///
/// # Examples
/// ```
/// use gpkgmap_core::{CoordinateTransform, Projection};
///
/// let t = Projection::web_mercator().transformation(&Projection::wgs84()).unwrap();
/// let (lon, lat) = t.transform(0.0, 0.0).unwrap();
/// assert_eq!((lon, lat), (0.0, 0.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectionTransform {
	from: Projection,
	to: Projection,
	kind: TransformKind,
}

impl ProjectionTransform {
	pub fn new(from: &Projection, to: &Projection) -> Result<ProjectionTransform> {
		let kind = if from.is_equivalent(to) {
			TransformKind::Identity
		} else if from.is_web_mercator() && to.is_wgs84() {
			TransformKind::MercatorToWgs84
		} else if from.is_wgs84() && to.is_web_mercator() {
			TransformKind::Wgs84ToMercator
		} else {
			return Err(from.unsupported(to).into());
		};
		log::trace!("transformation {from} -> {to}: {kind:?}");
		Ok(ProjectionTransform {
			from: from.clone(),
			to: to.clone(),
			kind,
		})
	}

	pub fn from_projection(&self) -> &Projection {
		&self.from
	}

	pub fn to_projection(&self) -> &Projection {
		&self.to
	}

	pub fn is_identity(&self) -> bool {
		self.kind == TransformKind::Identity
	}
}

impl CoordinateTransform for ProjectionTransform {
	fn transform(&self, x: f64, y: f64) -> Result<(f64, f64)> {
		ensure!(x.is_finite() && y.is_finite(), "cannot transform ({x}, {y})");
		Ok(match self.kind {
			TransformKind::Identity => (x, y),
			TransformKind::MercatorToWgs84 => {
				let lon = (x / RADIUS).to_degrees();
				let lat = (2.0 * (y / RADIUS).exp().atan() - FRAC_PI_2).to_degrees();
				(lon, lat)
			}
			TransformKind::Wgs84ToMercator => {
				let lat = y.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);
				let mx = RADIUS * x.to_radians();
				let my = RADIUS * (FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();
				(mx, my)
			}
		})
	}
}

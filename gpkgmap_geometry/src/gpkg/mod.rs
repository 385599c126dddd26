//! The GeoPackage binary geometry encoding: a `GP` header followed by ISO WKB.

mod header;
mod wkb_reader;
mod wkb_writer;

pub use header::*;
pub use wkb_reader::read_wkb;
pub use wkb_writer::write_wkb;

use gpkgmap_core::MapError;

fn invalid(reason: impl Into<String>) -> anyhow::Error {
	MapError::InvalidGeometryData(reason.into()).into()
}

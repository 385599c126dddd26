mod feature_cursor;
mod feature_dataset;
mod geopackage;
mod manager;
mod spatial_ref;
mod tile_dataset;
mod tile_matrix;
mod tile_provider;

pub use feature_cursor::*;
pub use feature_dataset::*;
pub use geopackage::*;
pub use manager::*;
pub use tile_dataset::*;
pub use tile_matrix::*;
pub use tile_provider::*;

type SqlitePool = r2d2::Pool<r2d2_sqlite::SqliteConnectionManager>;

/// Quotes a table or column name for use in SQL text.
pub(crate) fn quote_identifier(name: &str) -> String {
	format!("\"{}\"", name.replace('"', "\"\""))
}

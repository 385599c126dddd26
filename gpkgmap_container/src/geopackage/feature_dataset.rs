use super::{GeoPackageFeatureCursor, SqlitePool, quote_identifier, spatial_ref::projection_for_srs};
use crate::{FeatureCursor, FeatureDataset};
use anyhow::{Context, Result};
use gpkgmap_core::{MapError, Projection};
use r2d2_sqlite::rusqlite::{OptionalExtension, params};
use std::fmt::Debug;

/// A feature table of a GeoPackage.
pub struct GeoPackageFeatureDataset {
	table: String,
	pool: SqlitePool,
	projection: Projection,
	geometry_type_name: String,
	geometry_column: String,
	id_column: String,
	attribute_columns: Vec<String>,
	batch_size: usize,
}

impl GeoPackageFeatureDataset {
	pub(crate) fn load(pool: SqlitePool, package: &str, table: &str, batch_size: usize) -> Result<GeoPackageFeatureDataset> {
		log::debug!("load feature table '{table}' of '{package}'");

		let conn = pool.get()?;
		let geometry = conn
			.query_row(
				"SELECT column_name, geometry_type_name, srs_id FROM gpkg_geometry_columns WHERE table_name = ?1",
				params![table],
				|row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?, row.get::<_, i64>(2)?)),
			)
			.optional()
			.context("reading gpkg_geometry_columns")?;
		let Some((geometry_column, geometry_type_name, srs_id)) = geometry else {
			return Err(MapError::InvalidContainer {
				name: package.to_string(),
				reason: format!("feature table '{table}' has no entry in gpkg_geometry_columns"),
			}
			.into());
		};
		let projection = projection_for_srs(&conn, package, srs_id)?;

		let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", quote_identifier(table)))?;
		let columns = stmt
			.query_map([], |row| Ok((row.get::<_, String>(1)?, row.get::<_, i64>(5)?)))?
			.collect::<Result<Vec<_>, _>>()
			.context("reading table_info")?;

		let id_column = columns
			.iter()
			.find(|(_, pk)| *pk > 0)
			.map_or_else(|| "rowid".to_string(), |(name, _)| name.clone());
		let attribute_columns = columns
			.into_iter()
			.map(|(name, _)| name)
			.filter(|name| *name != id_column && *name != geometry_column)
			.collect::<Vec<_>>();

		log::trace!(
			"feature table '{table}': {geometry_type_name} in {projection}, id '{id_column}', attributes {attribute_columns:?}"
		);

		Ok(GeoPackageFeatureDataset {
			table: table.to_string(),
			pool,
			projection,
			geometry_type_name,
			geometry_column,
			id_column,
			attribute_columns,
			batch_size,
		})
	}

	/// The `geometry_type_name` declared in `gpkg_geometry_columns`, e.g. `POINT`.
	pub fn geometry_type_name(&self) -> &str {
		&self.geometry_type_name
	}

	pub fn geometry_column(&self) -> &str {
		&self.geometry_column
	}

	pub fn attribute_columns(&self) -> &[String] {
		&self.attribute_columns
	}

	fn select_sql(&self) -> String {
		let mut columns = vec![quote_identifier(&self.id_column), quote_identifier(&self.geometry_column)];
		columns.extend(self.attribute_columns.iter().map(|c| quote_identifier(c)));
		format!(
			"SELECT {} FROM {} WHERE {id} > ?1 ORDER BY {id} LIMIT ?2",
			columns.join(", "),
			quote_identifier(&self.table),
			id = quote_identifier(&self.id_column)
		)
	}
}

impl FeatureDataset for GeoPackageFeatureDataset {
	fn name(&self) -> &str {
		&self.table
	}

	fn projection(&self) -> &Projection {
		&self.projection
	}

	fn query_for_all(&self) -> Result<Box<dyn FeatureCursor>> {
		log::debug!("query all rows of '{}'", self.table);
		let conn = self
			.pool
			.get()
			.with_context(|| format!("acquiring a connection for '{}'", self.table))?;
		Ok(Box::new(GeoPackageFeatureCursor::new(
			&self.table,
			conn,
			self.select_sql(),
			self.attribute_columns.clone(),
			self.batch_size,
		)))
	}
}

impl Debug for GeoPackageFeatureDataset {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("GeoPackageFeatureDataset")
			.field("table", &self.table)
			.field("projection", &self.projection)
			.field("geometry_type_name", &self.geometry_type_name)
			.finish()
	}
}

use crate::{FeatureCursor, FeatureRow};
use anyhow::{Context, Result, bail};
use gpkgmap_geometry::{GeoPackageGeometry, GeoProperties, GeoValue};
use r2d2::PooledConnection;
use r2d2_sqlite::{
	SqliteConnectionManager,
	rusqlite::{params, types::ValueRef},
};
use std::collections::VecDeque;

/// Pages through a feature table by primary key, `batch_size` rows per query.
///
/// The cursor holds one pooled connection until it is closed. Rows are read a page at
/// a time, but each geometry is decoded only when its row is returned, so a broken
/// geometry fails that row and leaves the rows before it intact.
pub struct GeoPackageFeatureCursor {
	table: String,
	conn: Option<PooledConnection<SqliteConnectionManager>>,
	sql: String,
	attribute_columns: Vec<String>,
	batch_size: usize,
	last_id: i64,
	buffer: VecDeque<RawRow>,
	exhausted: bool,
}

/// A row as read from SQLite, before the geometry is decoded.
struct RawRow {
	id: i64,
	geometry: Option<Vec<u8>>,
	values: Vec<GeoValue>,
}

impl GeoPackageFeatureCursor {
	pub(crate) fn new(
		table: &str,
		conn: PooledConnection<SqliteConnectionManager>,
		sql: String,
		attribute_columns: Vec<String>,
		batch_size: usize,
	) -> GeoPackageFeatureCursor {
		GeoPackageFeatureCursor {
			table: table.to_string(),
			conn: Some(conn),
			sql,
			attribute_columns,
			batch_size: batch_size.max(1),
			last_id: i64::MIN,
			buffer: VecDeque::new(),
			exhausted: false,
		}
	}

	pub fn is_closed(&self) -> bool {
		self.conn.is_none()
	}

	fn fetch_batch(&mut self) -> Result<()> {
		let Some(conn) = self.conn.as_ref() else {
			bail!("cursor over '{}' is closed", self.table);
		};
		log::trace!("SQL: {} [{}, {}]", self.sql, self.last_id, self.batch_size);

		let value_count = self.attribute_columns.len();
		let mut stmt = conn.prepare_cached(&self.sql)?;
		let raw_rows = stmt
			.query_map(params![self.last_id, self.batch_size as i64], |row| {
				let values = (0..value_count)
					.map(|i| row.get_ref(i + 2).map(to_geo_value))
					.collect::<Result<Vec<_>, _>>()?;
				Ok(RawRow {
					id: row.get(0)?,
					geometry: row.get(1)?,
					values,
				})
			})?
			.collect::<Result<Vec<_>, _>>()
			.with_context(|| format!("reading rows of '{}'", self.table))?;

		if raw_rows.len() < self.batch_size {
			self.exhausted = true;
		}

		if let Some(last) = raw_rows.last() {
			self.last_id = last.id;
		}
		self.buffer.extend(raw_rows);
		Ok(())
	}

	fn decode(&self, raw: RawRow) -> Result<FeatureRow> {
		let geometry = match raw.geometry {
			Some(bytes) => GeoPackageGeometry::from_bytes(&bytes)
				.with_context(|| format!("decoding geometry of row {} in '{}'", raw.id, self.table))?
				.into_geometry(),
			None => None,
		};
		let properties = self.attribute_columns.iter().cloned().zip(raw.values).collect::<GeoProperties>();
		Ok(FeatureRow::new(raw.id, properties, geometry))
	}
}

fn to_geo_value(value: ValueRef<'_>) -> GeoValue {
	match value {
		ValueRef::Null => GeoValue::Null,
		ValueRef::Integer(v) => GeoValue::Int(v),
		ValueRef::Real(v) => GeoValue::Double(v),
		ValueRef::Text(v) => GeoValue::String(String::from_utf8_lossy(v).into_owned()),
		ValueRef::Blob(v) => GeoValue::Blob(v.to_vec()),
	}
}

impl FeatureCursor for GeoPackageFeatureCursor {
	fn next_row(&mut self) -> Result<Option<FeatureRow>> {
		if self.buffer.is_empty() && !self.exhausted {
			self.fetch_batch()?;
		}
		match self.buffer.pop_front() {
			Some(raw) => self.decode(raw).map(Some),
			None => Ok(None),
		}
	}

	fn close(&mut self) {
		if self.conn.take().is_some() {
			log::trace!("closed cursor over '{}'", self.table);
		}
		self.buffer.clear();
		self.exhausted = true;
	}
}

impl Drop for GeoPackageFeatureCursor {
	fn drop(&mut self) {
		self.close();
	}
}

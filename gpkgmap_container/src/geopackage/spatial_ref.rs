use anyhow::{Context, Result};
use gpkgmap_core::{MapError, Projection};
use r2d2_sqlite::rusqlite::{Connection, OptionalExtension, params};

/// Resolves a `srs_id` through `gpkg_spatial_ref_sys`.
pub(crate) fn projection_for_srs(conn: &Connection, package: &str, srs_id: i64) -> Result<Projection> {
	let row = conn
		.query_row(
			"SELECT organization, organization_coordsys_id FROM gpkg_spatial_ref_sys WHERE srs_id = ?1",
			params![srs_id],
			|row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
		)
		.optional()
		.with_context(|| format!("looking up srs_id {srs_id}"))?;

	match row {
		Some((organization, code)) => Ok(Projection::new(&organization, code)),
		None => Err(MapError::InvalidContainer {
			name: package.to_string(),
			reason: format!("srs_id {srs_id} is not defined in gpkg_spatial_ref_sys"),
		}
		.into()),
	}
}

use anyhow::{Context, Result};
use gpkgmap_container::{GeoContainer, GeoPackage, ScopedCursor};
use std::path::PathBuf;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// GeoPackage file (*.gpkg) you want to probe
	#[arg(required = true)]
	filename: PathBuf,

	/// zoom level used to report the extent of tile tables
	#[arg(long, short, default_value_t = 14)]
	zoom: u8,

	/// also count the rows of every feature table
	#[arg(long, short)]
	count: bool,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	eprintln!("probe {:?}", arguments.filename);

	let package = GeoPackage::open_path(&arguments.filename)?;
	print!("{}", describe(&package, arguments.zoom, arguments.count)?);
	Ok(())
}

fn describe(container: &dyn GeoContainer, zoom: u8, count: bool) -> Result<String> {
	let mut text = format!("container: {}\n", container.name());

	for table in container.tile_tables()? {
		let dataset = container.tile_dataset(&table)?;
		let extent = match dataset.bounding_box(zoom) {
			Ok(bbox) => format!("{bbox:?} at zoom {zoom}"),
			Err(err) => err.to_string(),
		};
		text.push_str(&format!("tiles {table}: {}, {extent}\n", dataset.projection()));
	}

	for table in container.feature_tables()? {
		let dataset = container.feature_dataset(&table)?;
		if count {
			let cursor = ScopedCursor::new(dataset.query_for_all()?);
			let mut rows = 0;
			for row in cursor {
				row.with_context(|| format!("reading '{table}'"))?;
				rows += 1;
			}
			text.push_str(&format!("features {table}: {}, {rows} rows\n", dataset.projection()));
		} else {
			text.push_str(&format!("features {table}: {}\n", dataset.projection()));
		}
	}
	Ok(text)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tests::run_command;
	use gpkgmap_container::testing::st_louis;
	use pretty_assertions::assert_eq;

	#[test]
	fn describe_st_louis() -> Result<()> {
		let package = st_louis()?;
		assert_eq!(
			describe(&*package, 15, true)?,
			"container: StLouis
tiles stlouis_tiles: EPSG:3857, tile table 'stlouis_tiles' has no tiles at zoom level 15
features Cafes: EPSG:4326, 3 rows
features Parks: EPSG:4326, 1 rows
features Pizza: EPSG:3857, 2 rows
features Streets: EPSG:4326, 1 rows
"
		);
		Ok(())
	}

	#[test]
	fn probe_file() -> Result<()> {
		let package = st_louis()?;
		let path = package.path().to_str().context("path")?.to_string();
		run_command(vec!["gpkgmap", "probe", "-q", "-c", &path])?;
		Ok(())
	}

	#[test]
	fn probe_missing_file() {
		assert!(run_command(vec!["gpkgmap", "probe", "-q", "/does/not/exist.gpkg"]).is_err());
	}
}

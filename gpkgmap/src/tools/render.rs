use anyhow::{Context, Result};
use gpkgmap::{Config, ContainerLoader, MapReadyPipeline, RecordingMap};
use std::path::{Path, PathBuf};

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// GeoPackage file (*.gpkg) to render
	#[arg(required = true)]
	filename: PathBuf,

	/// name to store the GeoPackage under
	/// [default: file name without extension]
	#[arg(long, short, verbatim_doc_comment)]
	name: Option<String>,

	/// directory of imported GeoPackages
	/// [default: "gpkgmap" in the system temp directory]
	#[arg(long, short, verbatim_doc_comment)]
	store: Option<PathBuf>,

	/// YAML configuration file
	#[arg(long, short)]
	config: Option<PathBuf>,

	/// print every marker, polyline and polygon
	#[arg(long, short)]
	list: bool,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	eprintln!("render {:?}", arguments.filename);

	let config = match &arguments.config {
		Some(path) => Config::from_path(path)?,
		None => Config::default(),
	};
	let name = match &arguments.name {
		Some(name) => name.clone(),
		None => default_name(&arguments.filename)?,
	};
	let store = arguments
		.store
		.clone()
		.unwrap_or_else(|| std::env::temp_dir().join("gpkgmap"));

	let loader = ContainerLoader::from_config(&store, &config)?;
	let pipeline = MapReadyPipeline::import(loader, &name, arguments.filename.clone(), &config);

	let mut map = RecordingMap::new();
	let summary = pipeline.on_map_ready(&mut map)?;

	println!("{summary}");
	if arguments.list {
		print!("{}", list_objects(&map));
	}
	Ok(())
}

fn default_name(path: &Path) -> Result<String> {
	let stem = path
		.file_stem()
		.and_then(|s| s.to_str())
		.with_context(|| format!("cannot derive a GeoPackage name from {path:?}"))?;
	Ok(stem.to_string())
}

fn list_objects(map: &RecordingMap) -> String {
	let mut text = String::new();
	for marker in &map.markers {
		let p = marker.position;
		text.push_str(&format!(
			"marker {:?} at {:.6}, {:.6} icon {}\n",
			marker.title.as_deref().unwrap_or(""),
			p.latitude,
			p.longitude,
			marker.icon.as_ref().map_or("-", |i| i.name.as_str())
		));
	}
	for line in &map.polylines {
		text.push_str(&format!("polyline with {} points\n", line.points.len()));
	}
	for polygon in &map.polygons {
		text.push_str(&format!(
			"polygon with {} points and {} holes\n",
			polygon.points.len(),
			polygon.holes.len()
		));
	}
	text
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tests::run_command;
	use gpkgmap_container::testing::write_st_louis;

	#[test]
	fn name_from_file() -> Result<()> {
		assert_eq!(default_name(Path::new("/data/StLouis.gpkg"))?, "StLouis");
		assert!(default_name(Path::new("/")).is_err());
		Ok(())
	}

	#[test]
	fn render_file() -> Result<()> {
		let dir = assert_fs::TempDir::new()?;
		let source = dir.path().join("StLouis.gpkg");
		write_st_louis(&source)?;
		let store = dir.path().join("store");

		run_command(vec![
			"gpkgmap",
			"render",
			"-q",
			"--store",
			store.to_str().context("store")?,
			"--list",
			source.to_str().context("source")?,
		])?;
		assert!(store.join("StLouis.gpkg").is_file());
		Ok(())
	}
}

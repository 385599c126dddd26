mod test_utilities;

use predicates::str;
use rstest::rstest;
use test_utilities::*;

#[test]
fn command() -> Result<(), Box<dyn std::error::Error>> {
	gpkgmap_cmd()
		.assert()
		.failure()
		.code(2)
		.stdout(str::is_empty())
		.stderr(str::contains(format!("Usage: {BINARY_NAME} [OPTIONS] <COMMAND>")));
	Ok(())
}

#[rstest]
#[case("probe", "[OPTIONS] <FILENAME>")]
#[case("render", "[OPTIONS] <FILENAME>")]
fn subcommand(#[case] sub_command: &str, #[case] usage: &str) -> Result<(), Box<dyn std::error::Error>> {
	gpkgmap_cmd()
		.args(sub_command.split(' '))
		.assert()
		.failure()
		.code(2)
		.stdout(str::is_empty())
		.stderr(str::contains(format!("Usage: {BINARY_NAME} {sub_command} {usage}")));
	Ok(())
}

#[test]
fn probe() -> Result<(), Box<dyn std::error::Error>> {
	let (_dir, path) = st_louis_file();
	gpkgmap_cmd()
		.args(["probe", "--count", path.to_str().unwrap()])
		.assert()
		.success()
		.stdout(str::contains("tiles stlouis_tiles: EPSG:3857, BoundingBox("))
		.stdout(str::contains("features Pizza: EPSG:3857, 2 rows"))
		.stderr(str::contains("probe "));
	Ok(())
}

#[test]
fn render() -> Result<(), Box<dyn std::error::Error>> {
	let (dir, path) = st_louis_file();
	let store = dir.path().join("store");
	gpkgmap_cmd()
		.args(["render", "--store", store.to_str().unwrap(), path.to_str().unwrap()])
		.assert()
		.success()
		.stdout(str::contains("container: StLouis\ntile overlay: stlouis_tiles\n"))
		.stdout(str::contains("features Cafes: 3 rows, 3 markers, 0 shapes"))
		.stdout(str::contains("features Parks: 1 rows, 0 markers, 1 shapes"))
		.stdout(str::contains("features Pizza: 2 rows, 2 markers, 0 shapes"))
		.stdout(str::contains("camera: 38.642613, -90.186768 at zoom 12"));
	assert!(store.join("StLouis.gpkg").is_file());
	Ok(())
}

#[test]
fn render_with_name_list_and_config() -> Result<(), Box<dyn std::error::Error>> {
	let (dir, path) = st_louis_file();
	let config = dir.path().join("gpkgmap.yml");
	std::fs::write(&config, "camera_zoom: 10\nicons:\n  default: pin\n")?;
	let store = dir.path().join("store");

	gpkgmap_cmd()
		.args([
			"render",
			"--name",
			"Downtown",
			"--store",
			store.to_str().unwrap(),
			"--config",
			config.to_str().unwrap(),
			"--list",
			path.to_str().unwrap(),
		])
		.assert()
		.success()
		.stdout(str::contains("container: Downtown"))
		.stdout(str::contains("at zoom 10"))
		.stdout(str::contains("marker \"Kaldi's\" at 38.640000, -90.260000 icon pin"))
		.stdout(str::contains("marker \"Dewey's\" at 38.610000, -90.220000 icon pizza"))
		.stdout(str::contains("polygon with 5 points and 1 holes"))
		.stdout(str::contains("polyline with 3 points"));
	assert!(store.join("Downtown.gpkg").is_file());
	Ok(())
}

#[test]
fn render_missing_file() -> Result<(), Box<dyn std::error::Error>> {
	let dir = tempfile::tempdir()?;
	gpkgmap_cmd()
		.args([
			"render",
			"--store",
			dir.path().to_str().unwrap(),
			"/does/not/exist.gpkg",
		])
		.assert()
		.failure()
		.code(1)
		.stdout(str::is_empty())
		.stderr(str::contains("Error: importing GeoPackage 'exist'"));
	Ok(())
}

#[test]
fn render_invalid_config() -> Result<(), Box<dyn std::error::Error>> {
	let (dir, path) = st_louis_file();
	let config = dir.path().join("gpkgmap.yml");
	std::fs::write(&config, "zoom: 3\n")?;
	gpkgmap_cmd()
		.args(["render", "--config", config.to_str().unwrap(), path.to_str().unwrap()])
		.assert()
		.failure()
		.stderr(str::contains("parsing config"));
	Ok(())
}

#[test]
fn render_without_tiles() -> Result<(), Box<dyn std::error::Error>> {
	let dir = tempfile::tempdir()?;
	let path = dir.path().join("Features.gpkg");
	gpkgmap_container::testing::GeoPackageBuilder::create(&path)?.add_st_louis_features()?;
	gpkgmap_cmd()
		.args([
			"render",
			"--store",
			dir.path().join("store").to_str().unwrap(),
			path.to_str().unwrap(),
		])
		.assert()
		.failure()
		.stderr(str::contains("no tile data available in GeoPackage 'Features'"));
	Ok(())
}

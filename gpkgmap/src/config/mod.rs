//! YAML configuration of the map pipeline.

mod icons;
mod main;

pub use icons::IconsConfig;
pub use main::Config;

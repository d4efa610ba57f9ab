//! This module is responsible for reading venue features (`GeoJSON`)
//! and building the indoor routing graph from them.

mod builder;
mod config;
pub mod ingest;
mod locator;

use std::path::Path;

use log::info;

pub use builder::GraphBuilder;
pub use config::{PathfinderConfig, PenaltyMode};
pub use ingest::{features_from_geojson, features_from_path, features_from_str, features_of_kind};

use crate::{Error, Pathfinder};

/// Creates a pathfinder from a `GeoJSON` file
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the file cannot be
/// read or parsed, or the graph cannot be built from its features.
pub fn create_pathfinder(
    path: impl AsRef<Path>,
    config: PathfinderConfig,
) -> Result<Pathfinder, Error> {
    config.validate()?;

    let path = path.as_ref();
    info!("Loading venue features: {}", path.display());
    let features = features_from_path(path)?;

    Pathfinder::with_config(&features, config)
}

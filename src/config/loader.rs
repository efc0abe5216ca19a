//! Configuration resolution for casioplot
//!
//! Runs the whole pipeline once: locate the starting file, walk its chain,
//! validate the merged settings and derive the canvas geometry.

use super::chain::walk_chain;
use super::error::ConfigError;
use super::geometry::{derive_geometry, ResolvedGeometry};
use super::locator::{find_config, LocatedFile, Locations};
use super::pointer::Origin;
use super::schema::Configuration;
use super::validate::validate;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Fully resolved configuration.
///
/// Built once and only read afterwards; the screen and window components
/// borrow it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedConfig {
    pub configuration: Configuration,
    pub geometry: ResolvedGeometry,
    /// Files the chain read, most specific first
    pub chain: Vec<LocatedFile>,
}

impl ResolvedConfig {
    /// Canvas width in pixels
    pub fn width(&self) -> u32 {
        self.geometry.width
    }

    /// Canvas height in pixels
    pub fn height(&self) -> u32 {
        self.geometry.height
    }

    /// Background image to draw behind the canvas, if any
    pub fn background_path(&self) -> Option<&Path> {
        self.geometry.background.as_ref().map(|image| image.path.as_path())
    }

    /// The file the resolution started from
    pub fn source(&self) -> Option<&Path> {
        self.chain.first().map(|file| file.path.as_path())
    }
}

/// Resolve the configuration for the running process.
///
/// Uses the current directory, the user's config directory and the bundled
/// presets. See [`find_config`] for the search order.
///
/// # Example
/// ```no_run
/// let config = casioplot::config::load_config()?;
/// println!("canvas: {}x{}", config.width(), config.height());
/// # Ok::<(), casioplot::config::ConfigError>(())
/// ```
pub fn load_config() -> Result<ResolvedConfig, ConfigError> {
    load_config_with(&Locations::from_env())
}

/// Resolve the configuration with explicit filesystem roots.
pub fn load_config_with(locations: &Locations) -> Result<ResolvedConfig, ConfigError> {
    resolve(find_config(locations), locations)
}

/// Resolve the configuration starting from a specific file, treated as the
/// project's own config file.
pub fn load_config_from(path: &Path, locations: &Locations) -> Result<ResolvedConfig, ConfigError> {
    let start = LocatedFile { path: absolute(path, &locations.project_dir), origin: Origin::Project };
    resolve(start, locations)
}

fn resolve(start: LocatedFile, locations: &Locations) -> Result<ResolvedConfig, ConfigError> {
    let outcome = walk_chain(start, locations)?;
    let mut configuration = validate(&outcome.settings)?;
    let geometry = derive_geometry(&mut configuration, locations)?;

    let resolved = ResolvedConfig { configuration, geometry, chain: outcome.files };
    info!(
        source = ?resolved.source(),
        files = resolved.chain.len(),
        width = resolved.width(),
        height = resolved.height(),
        "configuration resolved"
    );

    Ok(resolved)
}

/// Resolve a path relative to the project root.
///
/// If the path is absolute, returns it unchanged.
fn absolute(path: &Path, project_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_dir.join(path)
    }
}

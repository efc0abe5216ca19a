//! Configuration module for casioplot
//!
//! Resolves the settings of the virtual screen from a chain of TOML files:
//! the project's `casioplot_config.toml`, a user-level file in
//! `~/.config/casioplot`, and the presets bundled with the library.

pub mod bundled;
pub mod chain;
pub mod error;
pub mod geometry;
pub mod loader;
pub mod locator;
pub mod parser;
pub mod pointer;
pub mod schema;
pub mod validate;

pub use error::{ConfigError, FormatError, GeometryError, ResolutionError, ValidationError};
pub use geometry::{BackgroundImage, ResolvedGeometry};
pub use loader::{load_config, load_config_from, load_config_with, ResolvedConfig};
pub use locator::{find_config, LocatedFile, Locations};
pub use pointer::{ChainPointer, Origin, SourceClass};
pub use schema::*;

//! Chain pointers between config files
//!
//! A config file can name a more generic file to inherit unset values from,
//! through the top-level `default_to` key:
//!
//! ```toml
//! default_to = "preset/fx-CG50"
//! ```

use super::error::ResolutionError;
use super::locator::{Locations, CONFIG_EXTENSION};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Kind of file a chain pointer can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceClass {
    /// User-level file in the global config directory
    Global,
    /// File bundled with the library
    Preset,
}

impl SourceClass {
    pub fn prefix(self) -> &'static str {
        match self {
            SourceClass::Global => "global",
            SourceClass::Preset => "preset",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "global" => Some(SourceClass::Global),
            // upstream preset files spell it in the plural
            "preset" | "presets" => Some(SourceClass::Preset),
            _ => None,
        }
    }
}

/// Where a file in the chain came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// The project's own config file, or one given explicitly
    Project,
    Global,
    Preset,
}

impl From<SourceClass> for Origin {
    fn from(class: SourceClass) -> Self {
        match class {
            SourceClass::Global => Origin::Global,
            SourceClass::Preset => Origin::Preset,
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Origin::Project => "project",
            Origin::Global => "global",
            Origin::Preset => "preset",
        })
    }
}

/// Parsed `default_to` value: `<class>/<file_name>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainPointer {
    pub class: SourceClass,
    /// File name inside the class directory, always with an extension
    pub file_name: String,
}

impl ChainPointer {
    /// Parse a pointer. Returns `None` if it isn't `<class>/<file_name>`.
    ///
    /// A file name without extension gets `.toml` appended, so
    /// `preset/default` and `preset/default.toml` are the same pointer.
    pub fn parse(text: &str) -> Option<Self> {
        let (prefix, name) = text.split_once('/')?;
        if name.is_empty() || name.contains('/') || name.contains('\\') || name == ".." {
            return None;
        }
        let class = SourceClass::from_prefix(prefix)?;

        let file_name = if Path::new(name).extension().is_some() {
            name.to_string()
        } else {
            format!("{}.{}", name, CONFIG_EXTENSION)
        };

        Some(Self { class, file_name })
    }

    /// Concrete path of the targeted file
    pub fn resolve(&self, locations: &Locations) -> Result<PathBuf, ResolutionError> {
        match self.class {
            SourceClass::Global => locations
                .global_dir
                .as_ref()
                .map(|dir| dir.join(&self.file_name))
                .ok_or_else(|| ResolutionError::NoGlobalDir { reference: self.to_string() }),
            SourceClass::Preset => Ok(locations.presets_dir.join(&self.file_name)),
        }
    }
}

impl fmt::Display for ChainPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.class.prefix(), self.file_name)
    }
}

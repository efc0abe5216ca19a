//! Error types for configuration resolution
//!
//! Every failure is fatal: resolution either produces a complete
//! configuration or one of these errors.

use super::schema::{Section, Setting, SettingKind};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration resolution error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Malformed config file
    #[error(transparent)]
    Format(#[from] FormatError),
    /// A file or image referenced by the chain can't be used
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    /// Merged settings are missing, mistyped or out of range
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Margins don't fit the background image
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    /// File I/O error
    #[error("Failed to read config '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Problems with the content of a single config file
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FormatError {
    #[error("Failed to parse '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{}: the section '[{section}]' doesn't exist", .path.display())]
    UnknownSection { path: PathBuf, section: String },
    #[error("{}: '{section}' must be a section (table), found a {found}", .path.display())]
    SectionNotTable { path: PathBuf, section: String, found: &'static str },
    #[error("{}: '[{first}]' and '[{second}]' are the same section, use only one", .path.display())]
    DuplicateSection { path: PathBuf, first: String, second: String },
    #[error("{}: the setting '{setting}' in '[{section}]' doesn't exist", .path.display())]
    UnknownSetting { path: PathBuf, section: String, setting: String },
    #[error(
        "{}: the setting '{setting}' doesn't belong to the section '[{found}]', it belongs to '[{expected}]'",
        .path.display()
    )]
    MisplacedSetting { path: PathBuf, setting: Setting, found: String, expected: Section },
    #[error("{}: '{first}' and '{second}' are the same setting, use only one", .path.display())]
    DuplicateSetting { path: PathBuf, first: String, second: String },
    #[error("{}: 'default_to' must be a string, found a {found}", .path.display())]
    PointerNotString { path: PathBuf, found: &'static str },
    #[error(
        "{}: invalid 'default_to' pointer '{pointer}', it must be 'global/<file_name>' or 'preset/<file_name>'",
        .path.display()
    )]
    MalformedPointer { path: PathBuf, pointer: String },
}

/// Problems following the chain or locating the background image
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResolutionError {
    #[error("The config file '{}' doesn't exist (chain position {position})", .path.display())]
    MissingFile { path: PathBuf, position: usize },
    #[error(
        "A global config file must not default to another global config file: '{}' points to '{pointer}' (chain position {position}), only preset files like 'preset/default' are allowed",
        .path.display()
    )]
    GlobalToGlobal { path: PathBuf, pointer: String, position: usize },
    #[error("The config file '{}' appears twice in the chain (chain position {position})", .path.display())]
    Revisited { path: PathBuf, position: usize },
    #[error("The config chain is longer than {max} files, stopped at '{}'", .path.display())]
    TooLong { path: PathBuf, max: usize },
    #[error("'{reference}' needs the global config directory, but neither XDG_CONFIG_HOME nor HOME is set")]
    NoGlobalDir { reference: String },
    #[error(
        "The 'background' setting can't be '{value}', it must be '<image_name>', 'global/<image_name>' or 'bg_images/<image_name>'"
    )]
    BackgroundSyntax { value: String },
    #[error("The background image '{}' doesn't exist", .path.display())]
    MissingImage { path: PathBuf },
}

/// A merged setting that fails its schema entry
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("The setting '{setting}' must have a value attributed")]
    Missing { setting: Setting },
    #[error("The setting '{setting}' must be of type '{expected}' but the value given is {actual}")]
    WrongType { setting: Setting, expected: SettingKind, actual: String },
    #[error("The setting '{setting}' must {constraint}, but the value given is {actual}")]
    Constraint { setting: Setting, constraint: &'static str, actual: String },
}

impl ValidationError {
    /// The offending setting
    pub fn setting(&self) -> Setting {
        match self {
            ValidationError::Missing { setting }
            | ValidationError::WrongType { setting, .. }
            | ValidationError::Constraint { setting, .. } => *setting,
        }
    }
}

/// Relationship between the margins and the background image
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GeometryError {
    #[error("Failed to read the size of the background image '{}': {source}", .path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error(
        "Invalid settings, the combined values of '{first}' and '{second}' ({combined}) must be smaller than the {axis} of the background image ({limit})"
    )]
    MarginsExceedImage {
        first: Setting,
        second: Setting,
        combined: u64,
        axis: &'static str,
        limit: u32,
    },
}

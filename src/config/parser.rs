//! Parsing of a single config file
//!
//! A config file is TOML with one table per [`Section`] and an optional
//! top-level `default_to` chain pointer:
//!
//! ```toml
//! default_to = "preset/default"
//!
//! [canvas]
//! width = 500
//! ```
//!
//! The whole file is checked against the schema before any value is
//! collected, so a malformed file is rejected as a unit.

use super::error::{ConfigError, FormatError};
use super::pointer::ChainPointer;
use super::schema::{Section, Setting, POINTER_KEY};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Settings declared by one file, not necessarily all of them.
///
/// Values keep their TOML type until validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialConfiguration {
    values: BTreeMap<Setting, toml::Value>,
}

impl PartialConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, setting: Setting) -> Option<&toml::Value> {
        self.values.get(&setting)
    }

    pub fn contains(&self, setting: Setting) -> bool {
        self.values.contains_key(&setting)
    }

    /// Set a value, returning the previous one
    pub fn insert(&mut self, setting: Setting, value: toml::Value) -> Option<toml::Value> {
        self.values.insert(setting, value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Declared settings in schema order
    pub fn iter(&self) -> impl Iterator<Item = (Setting, &toml::Value)> {
        self.values.iter().map(|(setting, value)| (*setting, value))
    }

    /// Schema settings without a value
    pub fn missing(&self) -> impl Iterator<Item = Setting> + '_ {
        Setting::ALL.into_iter().filter(move |setting| !self.contains(*setting))
    }
}

impl FromIterator<(Setting, toml::Value)> for PartialConfiguration {
    fn from_iter<I: IntoIterator<Item = (Setting, toml::Value)>>(iter: I) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}

/// Content of one parsed config file
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFile {
    pub settings: PartialConfiguration,
    pub pointer: Option<ChainPointer>,
}

/// Read and parse a config file.
///
/// The file is read in full and closed before parsing starts.
pub fn parse_file(path: &Path) -> Result<ParsedFile, ConfigError> {
    let contents = fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    Ok(parse_str(&contents, path)?)
}

/// Parse config file contents. `path` is only used in error messages.
pub fn parse_str(contents: &str, path: &Path) -> Result<ParsedFile, FormatError> {
    let table: toml::Table = toml::from_str(contents)
        .map_err(|source| FormatError::Parse { path: path.to_path_buf(), source })?;

    check_layout(&table, path)?;
    let pointer = read_pointer(&table, path)?;

    let mut settings = PartialConfiguration::new();
    for (key, value) in &table {
        if key == POINTER_KEY {
            continue;
        }
        // check_layout guarantees sections are tables of known settings
        if let toml::Value::Table(entries) = value {
            for (name, value) in entries {
                if let Some(setting) = Setting::from_name(name) {
                    settings.insert(setting, value.clone());
                }
            }
        }
    }

    Ok(ParsedFile { settings, pointer })
}

/// Reject unknown sections, unknown settings and settings in the wrong section
fn check_layout(table: &toml::Table, path: &Path) -> Result<(), FormatError> {
    let mut seen: BTreeMap<Section, &str> = BTreeMap::new();

    for (key, value) in table {
        if key == POINTER_KEY {
            continue;
        }

        let section = Section::from_name(key).ok_or_else(|| FormatError::UnknownSection {
            path: path.to_path_buf(),
            section: key.clone(),
        })?;

        if let Some(first) = seen.insert(section, key) {
            return Err(FormatError::DuplicateSection {
                path: path.to_path_buf(),
                first: first.to_string(),
                second: key.clone(),
            });
        }

        let entries = value.as_table().ok_or_else(|| FormatError::SectionNotTable {
            path: path.to_path_buf(),
            section: key.clone(),
            found: value.type_str(),
        })?;

        let mut names: BTreeMap<Setting, &str> = BTreeMap::new();
        for name in entries.keys() {
            let setting = check_setting(name, key, section, path)?;
            if let Some(first) = names.insert(setting, name) {
                return Err(FormatError::DuplicateSetting {
                    path: path.to_path_buf(),
                    first: first.to_string(),
                    second: name.clone(),
                });
            }
        }
    }

    Ok(())
}

fn check_setting(
    name: &str,
    key: &str,
    section: Section,
    path: &Path,
) -> Result<Setting, FormatError> {
    let setting = Setting::from_name(name).ok_or_else(|| FormatError::UnknownSetting {
        path: path.to_path_buf(),
        section: key.to_string(),
        setting: name.to_string(),
    })?;

    if setting.section() != section {
        return Err(FormatError::MisplacedSetting {
            path: path.to_path_buf(),
            setting,
            found: key.to_string(),
            expected: setting.section(),
        });
    }

    Ok(setting)
}

fn read_pointer(table: &toml::Table, path: &Path) -> Result<Option<ChainPointer>, FormatError> {
    let Some(value) = table.get(POINTER_KEY) else {
        return Ok(None);
    };

    let text = value.as_str().ok_or_else(|| FormatError::PointerNotString {
        path: path.to_path_buf(),
        found: value.type_str(),
    })?;

    ChainPointer::parse(text).map(Some).ok_or_else(|| FormatError::MalformedPointer {
        path: path.to_path_buf(),
        pointer: text.to_string(),
    })
}

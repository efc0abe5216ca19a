//! Inheritance chain between config files
//!
//! Starting from the located file, each file may point at a more generic one
//! through `default_to`. Values from earlier files always win; later files
//! only fill the gaps.

use super::bundled;
use super::error::{ConfigError, ResolutionError};
use super::locator::{LocatedFile, Locations};
use super::parser::{parse_file, parse_str, ParsedFile, PartialConfiguration};
use super::pointer::{Origin, SourceClass};
use tracing::debug;

/// Most files a chain may contain. Real chains are project, global and one
/// or two presets.
pub const MAX_CHAIN_LENGTH: usize = 8;

/// Result of walking a chain
#[derive(Debug, Clone, PartialEq)]
pub struct ChainOutcome {
    /// Merged settings, possibly still incomplete
    pub settings: PartialConfiguration,
    /// Files read, most specific first
    pub files: Vec<LocatedFile>,
}

/// Copy every setting of `ancestor` that `settings` doesn't have yet.
///
/// Returns how many settings were adopted.
pub fn merge_missing(settings: &mut PartialConfiguration, ancestor: &PartialConfiguration) -> usize {
    let mut adopted = 0;
    for (setting, value) in ancestor.iter() {
        if !settings.contains(setting) {
            settings.insert(setting, value.clone());
            adopted += 1;
        }
    }
    adopted
}

/// Parse `start` and every file it chains to, merging as it goes.
///
/// A global file may only point at a preset file, which is checked before
/// the next file is opened. A file can't appear twice and the chain can't
/// grow past [`MAX_CHAIN_LENGTH`].
pub fn walk_chain(start: LocatedFile, locations: &Locations) -> Result<ChainOutcome, ConfigError> {
    let mut settings = PartialConfiguration::new();
    let mut files: Vec<LocatedFile> = Vec::new();
    let mut current = start;

    loop {
        let position = files.len();

        if position == MAX_CHAIN_LENGTH {
            return Err(ResolutionError::TooLong { path: current.path, max: MAX_CHAIN_LENGTH }.into());
        }
        if files.iter().any(|file| file.path == current.path) {
            return Err(ResolutionError::Revisited { path: current.path, position }.into());
        }

        let Some(parsed) = read_file(&current, locations)? else {
            return Err(ResolutionError::MissingFile { path: current.path, position }.into());
        };
        let adopted = merge_missing(&mut settings, &parsed.settings);
        debug!(
            path = %current.path.display(),
            origin = %current.origin,
            position,
            adopted,
            "merged config file"
        );

        let Some(pointer) = parsed.pointer else {
            files.push(current);
            break;
        };

        if current.origin == Origin::Global && pointer.class == SourceClass::Global {
            return Err(ResolutionError::GlobalToGlobal {
                path: current.path,
                pointer: pointer.to_string(),
                position,
            }
            .into());
        }

        let next = LocatedFile { path: pointer.resolve(locations)?, origin: pointer.class.into() };
        debug!(pointer = %pointer, path = %next.path.display(), "following chain pointer");

        files.push(current);
        current = next;
    }

    Ok(ChainOutcome { settings, files })
}

/// Parse a chain file, or the embedded copy of a bundled preset missing on
/// disk. `None` if neither exists.
fn read_file(file: &LocatedFile, locations: &Locations) -> Result<Option<ParsedFile>, ConfigError> {
    if file.path.is_file() {
        return parse_file(&file.path).map(Some);
    }
    if file.origin != Origin::Preset {
        return Ok(None);
    }

    match bundled::preset_at(&file.path, locations) {
        Some(contents) => {
            debug!(path = %file.path.display(), "using embedded copy of bundled preset");
            Ok(Some(parse_str(contents, &file.path)?))
        }
        None => Ok(None),
    }
}

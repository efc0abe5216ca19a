//! Config file discovery
//!
//! Picks the most specific config file to start a resolution from.

use super::pointer::Origin;
use glob::{glob, Pattern};
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Library name, used for the global config directory
pub const LIBRARY_NAME: &str = "casioplot";

/// Config file in the directory of the project using casioplot.
/// Namespaced because the project may have config files of its own.
pub const PROJECT_CONFIG_FILE: &str = "casioplot_config.toml";

/// Extension of config files
pub const CONFIG_EXTENSION: &str = "toml";

/// Bundled preset every chain can fall back to
pub const DEFAULT_PRESET: &str = "default.toml";

/// Filesystem roots used during resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locations {
    /// Directory of the project using casioplot
    pub project_dir: PathBuf,
    /// User-level config directory, `None` when it can't be determined
    pub global_dir: Option<PathBuf>,
    /// Bundled preset config files
    pub presets_dir: PathBuf,
    /// Bundled background images
    pub bg_images_dir: PathBuf,
}

impl Locations {
    /// Locations for the running process: current directory, XDG config
    /// directory and the bundled data shipped with the crate.
    pub fn from_env() -> Self {
        let project_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::with_bundled(project_dir, global_config_dir())
    }

    /// Custom project and global directories, bundled presets and images
    pub fn with_bundled(project_dir: PathBuf, global_dir: Option<PathBuf>) -> Self {
        let bundled = bundled_dir();
        Self {
            project_dir,
            global_dir,
            presets_dir: bundled.join("presets"),
            bg_images_dir: bundled.join("bg_images"),
        }
    }
}

/// Directory the crate's presets and background images ship in.
///
/// Only exists while the build tree does; missing bundled files are read
/// from the copies in [`super::bundled`].
pub fn bundled_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// User-level config directory.
///
/// `XDG_CONFIG_HOME/casioplot`, or `~/.config/casioplot` when
/// `XDG_CONFIG_HOME` is unset or empty.
pub fn global_config_dir() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| env::var("HOME").ok().map(|h| PathBuf::from(h).join(".config")))?;

    Some(xdg_config.join(LIBRARY_NAME))
}

/// A config file together with the kind of location it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocatedFile {
    pub path: PathBuf,
    pub origin: Origin,
}

/// Find the config file a resolution starts from.
///
/// Search order:
/// 1. `casioplot_config.toml` in the project directory
/// 2. The first `.toml` file, alphabetically, in the global config directory
/// 3. The bundled `presets/default.toml`
///
/// Never fails, the bundled default is always the last resort. It is
/// embedded in the library, so it can be read even when `presets_dir` is gone.
pub fn find_config(locations: &Locations) -> LocatedFile {
    let project_config = locations.project_dir.join(PROJECT_CONFIG_FILE);
    if project_config.is_file() {
        debug!(path = %project_config.display(), "using project config file");
        return LocatedFile { path: project_config, origin: Origin::Project };
    }

    if let Some(path) = locations.global_dir.as_deref().and_then(find_global_config) {
        debug!(path = %path.display(), "using global config file");
        return LocatedFile { path, origin: Origin::Global };
    }

    let path = locations.presets_dir.join(DEFAULT_PRESET);
    debug!(path = %path.display(), "using default preset");
    LocatedFile { path, origin: Origin::Preset }
}

/// First config file in alphabetical order inside `dir`.
///
/// Returns `None` if the directory doesn't exist or holds no config file.
pub fn find_global_config(dir: &Path) -> Option<PathBuf> {
    if !dir.is_dir() {
        return None;
    }

    let pattern = format!("{}/*.{}", Pattern::escape(&dir.to_string_lossy()), CONFIG_EXTENSION);
    let mut files: Vec<PathBuf> =
        glob(&pattern).ok()?.filter_map(Result::ok).filter(|path| path.is_file()).collect();

    files.sort();
    files.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn locations(temp: &TempDir) -> Locations {
        let project_dir = temp.path().join("project");
        let global_dir = temp.path().join("global");
        fs::create_dir_all(&project_dir).expect("should create project dir");
        Locations::with_bundled(project_dir, Some(global_dir))
    }

    #[test]
    fn test_project_config_wins() {
        let temp = TempDir::new().expect("should create temp dir");
        let locations = locations(&temp);
        let global_dir = locations.global_dir.clone().expect("global dir is set");
        fs::create_dir_all(&global_dir).expect("should create global dir");
        fs::write(global_dir.join("a.toml"), "").expect("should write global config");
        fs::write(locations.project_dir.join(PROJECT_CONFIG_FILE), "")
            .expect("should write project config");

        let found = find_config(&locations);
        assert_eq!(found.origin, Origin::Project);
        assert_eq!(found.path, locations.project_dir.join(PROJECT_CONFIG_FILE));
    }

    #[test]
    fn test_first_global_config_alphabetically() {
        let temp = TempDir::new().expect("should create temp dir");
        let locations = locations(&temp);
        let global_dir = locations.global_dir.clone().expect("global dir is set");
        fs::create_dir_all(&global_dir).expect("should create global dir");
        fs::write(global_dir.join("zeta.toml"), "").expect("should write config");
        fs::write(global_dir.join("alpha.toml"), "").expect("should write config");
        fs::write(global_dir.join("aaa.txt"), "").expect("should write non-config file");

        let found = find_config(&locations);
        assert_eq!(found.origin, Origin::Global);
        assert_eq!(found.path, global_dir.join("alpha.toml"));
    }

    #[test]
    fn test_global_dir_without_config_files_is_skipped() {
        let temp = TempDir::new().expect("should create temp dir");
        let locations = locations(&temp);
        let global_dir = locations.global_dir.clone().expect("global dir is set");
        fs::create_dir_all(global_dir.join("nested.toml")).expect("should create directory");
        fs::write(global_dir.join("notes.md"), "").expect("should write file");

        let found = find_config(&locations);
        assert_eq!(found.origin, Origin::Preset);
        assert_eq!(found.path, locations.presets_dir.join(DEFAULT_PRESET));
    }

    #[test]
    fn test_falls_back_to_bundled_default() {
        let temp = TempDir::new().expect("should create temp dir");
        let mut locations = locations(&temp);
        locations.global_dir = None;

        let found = find_config(&locations);
        assert_eq!(found.origin, Origin::Preset);
        assert!(found.path.is_file(), "bundled default preset should ship with the crate");
    }

    #[test]
    fn test_global_dir_with_glob_characters() {
        let temp = TempDir::new().expect("should create temp dir");
        let dir = temp.path().join("conf[1]");
        fs::create_dir_all(&dir).expect("should create dir");
        fs::write(dir.join("mine.toml"), "").expect("should write config");

        assert_eq!(find_global_config(&dir), Some(dir.join("mine.toml")));
    }

    /// Run `f` with the given environment variables, restoring them afterwards
    fn with_env(vars: &[(&str, Option<&str>)], f: impl FnOnce()) {
        let previous: Vec<(&str, Option<std::ffi::OsString>)> =
            vars.iter().map(|(name, _)| (*name, env::var_os(name))).collect();
        for (name, value) in vars {
            match value {
                Some(value) => env::set_var(name, value),
                None => env::remove_var(name),
            }
        }

        f();

        for (name, value) in previous {
            match value {
                Some(value) => env::set_var(name, value),
                None => env::remove_var(name),
            }
        }
    }

    #[test]
    #[serial]
    fn test_global_config_dir_prefers_xdg() {
        with_env(&[("XDG_CONFIG_HOME", Some("/tmp/xdg-test")), ("HOME", Some("/home/user"))], || {
            assert_eq!(global_config_dir(), Some(PathBuf::from("/tmp/xdg-test/casioplot")));
        });
    }

    #[test]
    #[serial]
    fn test_global_config_dir_falls_back_to_home() {
        with_env(&[("XDG_CONFIG_HOME", None), ("HOME", Some("/home/user"))], || {
            assert_eq!(global_config_dir(), Some(PathBuf::from("/home/user/.config/casioplot")));
        });
    }

    #[test]
    #[serial]
    fn test_empty_xdg_config_home_is_ignored() {
        with_env(&[("XDG_CONFIG_HOME", Some("")), ("HOME", Some("/home/user"))], || {
            assert_eq!(global_config_dir(), Some(PathBuf::from("/home/user/.config/casioplot")));
        });
    }

    #[test]
    #[serial]
    fn test_no_global_dir_without_xdg_or_home() {
        with_env(&[("XDG_CONFIG_HOME", None), ("HOME", None)], || {
            assert_eq!(global_config_dir(), None);
        });
    }
}

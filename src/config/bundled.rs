//! Presets and background images compiled into the library
//!
//! The bundled directories are looked up next to the crate sources, which
//! aren't there anymore once an installed binary outlives its build tree.
//! These copies stand in for any bundled file missing on disk, so the
//! default preset is always available.

use super::locator::Locations;
use std::path::Path;

/// Bundled preset config files, by file name
pub const PRESETS: &[(&str, &str)] = &[
    ("default.toml", include_str!("../../presets/default.toml")),
    ("fx-CG50.toml", include_str!("../../presets/fx-CG50.toml")),
    ("fx-CG50_AU.toml", include_str!("../../presets/fx-CG50_AU.toml")),
    ("graph_90+e.toml", include_str!("../../presets/graph_90+e.toml")),
];

/// Bundled background images, by file name
pub const BG_IMAGES: &[(&str, &[u8])] =
    &[("fx-CG50.png", include_bytes!("../../bg_images/fx-CG50.png"))];

/// Embedded preset by file name
pub fn preset(file_name: &str) -> Option<&'static str> {
    PRESETS.iter().find(|(name, _)| *name == file_name).map(|(_, contents)| *contents)
}

/// Embedded background image by file name
pub fn bg_image(file_name: &str) -> Option<&'static [u8]> {
    BG_IMAGES.iter().find(|(name, _)| *name == file_name).map(|(_, bytes)| *bytes)
}

/// Embedded copy of a preset path that doesn't exist on disk
pub fn preset_at(path: &Path, locations: &Locations) -> Option<&'static str> {
    embedded_name(path, &locations.presets_dir).and_then(preset)
}

/// Embedded copy of a background image path that doesn't exist on disk
pub fn bg_image_at(path: &Path, locations: &Locations) -> Option<&'static [u8]> {
    embedded_name(path, &locations.bg_images_dir).and_then(bg_image)
}

/// File name of `path` when it is a missing file directly inside `dir`
fn embedded_name<'a>(path: &'a Path, dir: &Path) -> Option<&'a str> {
    if path.is_file() || path.parent() != Some(dir) {
        return None;
    }
    path.file_name()?.to_str()
}

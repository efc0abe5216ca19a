//! Integration tests for configuration resolution.
//!
//! Each test builds a project directory and a global config directory in a
//! temp dir and resolves against the presets bundled with the crate.

use std::fs;
use std::path::{Path, PathBuf};

use casioplot::config::{
    load_config_from, load_config_with, ConfigError, GeometryError, Locations, Origin,
    ResolutionError, Setting, ValidationError,
};
use casioplot::screen::ScreenLayout;
use image::RgbImage;
use tempfile::TempDir;

const PROJECT_FILE: &str = "casioplot_config.toml";

/// Project and global directories inside a temp dir
fn setup(temp: &TempDir) -> (Locations, PathBuf) {
    let project_dir = temp.path().join("project");
    let global_dir = temp.path().join("global");
    fs::create_dir_all(&project_dir).expect("should create project dir");
    fs::create_dir_all(&global_dir).expect("should create global dir");
    (Locations::with_bundled(project_dir, Some(global_dir.clone())), global_dir)
}

fn write(path: &Path, contents: &str) {
    fs::write(path, contents).expect("should write config file");
}

fn write_project(locations: &Locations, contents: &str) {
    write(&locations.project_dir.join(PROJECT_FILE), contents);
}

#[test]
fn test_project_value_overrides_preset() {
    let temp = TempDir::new().expect("should create temp dir");
    let (locations, _) = setup(&temp);
    write_project(&locations, "default_to = \"preset/default\"\n\n[canvas]\nwidth = 500\n");

    let config = load_config_with(&locations).expect("should resolve");
    assert_eq!((config.width(), config.height()), (500, 192));
    assert_eq!(config.chain.len(), 2);
    assert_eq!(config.chain[0].origin, Origin::Project);
    assert_eq!(config.chain[1].origin, Origin::Preset);
}

#[test]
fn test_global_file_pointing_to_global_fails() {
    let temp = TempDir::new().expect("should create temp dir");
    let (locations, global_dir) = setup(&temp);
    write_project(&locations, "default_to = \"global/foo.toml\"\n");
    write(&global_dir.join("foo.toml"), "default_to = \"global/bar.toml\"\n");

    let err = load_config_with(&locations).expect_err("global to global should fail");
    match err {
        ConfigError::Resolution(ResolutionError::GlobalToGlobal { path, pointer, position }) => {
            assert_eq!(path, global_dir.join("foo.toml"));
            assert_eq!(pointer, "global/bar.toml");
            assert_eq!(position, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!global_dir.join("bar.toml").exists());
}

#[test]
fn test_global_file_found_by_locator() {
    let temp = TempDir::new().expect("should create temp dir");
    let (locations, global_dir) = setup(&temp);
    write(
        &global_dir.join("mine.toml"),
        "default_to = \"preset/default\"\n\n[saving_screen]\nimage_name = \"plot\"\n",
    );

    let config = load_config_with(&locations).expect("should resolve");
    assert_eq!(config.chain[0].origin, Origin::Global);
    assert_eq!(config.configuration.saving_screen.image_name, "plot");
}

#[test]
fn test_canvas_derived_from_background_image() {
    let temp = TempDir::new().expect("should create temp dir");
    let (locations, _) = setup(&temp);
    RgbImage::new(400, 220)
        .save(locations.project_dir.join("screen.png"))
        .expect("should write image");
    write_project(
        &locations,
        r#"default_to = "preset/default"

[margins]
left_margin = 8
right_margin = 8
top_margin = 20
bottom_margin = 10

[background]
bg_in_use = true
background = "screen.png"
"#,
    );

    let config = load_config_with(&locations).expect("should resolve");
    assert_eq!((config.width(), config.height()), (384, 190));
    assert_eq!(config.background_path(), Some(locations.project_dir.join("screen.png").as_path()));

    let layout = ScreenLayout::from(&config);
    assert_eq!((layout.window_width, layout.window_height), (400, 220));
}

#[test]
fn test_unknown_image_format_is_rejected() {
    let temp = TempDir::new().expect("should create temp dir");
    let (locations, _) = setup(&temp);
    write_project(
        &locations,
        "default_to = \"preset/default\"\n\n[saving_screen]\nimage_format = \"webp\"\n",
    );

    let err = load_config_with(&locations).expect_err("webp should be rejected");
    assert!(matches!(
        err,
        ConfigError::Validation(ValidationError::Constraint { setting: Setting::ImageFormat, .. })
    ));
    assert!(err.to_string().contains("jpeg, jpg, png, gif, bmp, tiff or tif"));
}

fn with_horizontal_margins(locations: &Locations, left: u32, right: u32) -> Result<u32, ConfigError> {
    RgbImage::new(100, 50)
        .save(locations.project_dir.join("small.png"))
        .expect("should write image");
    write_project(
        locations,
        &format!(
            "default_to = \"preset/default\"\n\n[margins]\nleft_margin = {left}\nright_margin = {right}\n\n[background]\nbg_in_use = true\nbackground = \"small.png\"\n"
        ),
    );
    load_config_with(locations).map(|config| config.width())
}

#[test]
fn test_margins_boundary() {
    let temp = TempDir::new().expect("should create temp dir");
    let (locations, _) = setup(&temp);

    assert_eq!(with_horizontal_margins(&locations, 50, 49).expect("one pixel remains"), 1);

    let err = with_horizontal_margins(&locations, 50, 50).expect_err("no pixel remains");
    match err {
        ConfigError::Geometry(GeometryError::MarginsExceedImage { first, second, .. }) => {
            assert_eq!((first, second), (Setting::LeftMargin, Setting::RightMargin));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_serialized_configuration_resolves_to_itself() {
    let temp = TempDir::new().expect("should create temp dir");
    let (locations, _) = setup(&temp);
    write_project(
        &locations,
        r#"default_to = "preset/default"

[canvas]
width = 320
height = 240

[saving_screen]
save_screen = true
image_format = "bmp"
save_multiple = true
save_rate = 4
"#,
    );
    let original = load_config_with(&locations).expect("should resolve");

    let serialized = original.configuration.to_toml().expect("should serialize");
    write_project(&locations, &serialized);

    let reloaded = load_config_with(&locations).expect("serialized config should resolve");
    assert_eq!(reloaded.configuration, original.configuration);
    assert_eq!(reloaded.chain.len(), 1);
}

#[test]
fn test_bundled_presets_resolve() {
    let expected = [
        ("default", (384, 192), false),
        ("fx-CG50", (384, 192), true),
        ("fx-CG50_AU", (384, 192), true),
        ("graph_90+e", (384, 192), true),
    ];

    for (preset, size, has_background) in expected {
        let temp = TempDir::new().expect("should create temp dir");
        let (locations, _) = setup(&temp);
        let start = locations.project_dir.join("device.toml");
        write(&start, &format!("default_to = \"preset/{preset}\"\n"));

        let config = load_config_from(&start, &locations)
            .unwrap_or_else(|e| panic!("preset {preset} should resolve: {e}"));
        assert_eq!((config.width(), config.height()), size, "preset {preset}");
        assert_eq!(config.background_path().is_some(), has_background, "preset {preset}");
    }
}

/// Bundled directories that no longer exist, as for an installed binary
/// whose build tree was removed
fn without_bundled_dirs(temp: &TempDir, locations: Locations) -> Locations {
    Locations {
        presets_dir: temp.path().join("gone").join("presets"),
        bg_images_dir: temp.path().join("gone").join("bg_images"),
        ..locations
    }
}

#[test]
fn test_default_resolves_without_bundled_dirs() {
    let temp = TempDir::new().expect("should create temp dir");
    let (locations, _) = setup(&temp);
    let locations = without_bundled_dirs(&temp, locations);

    let config = load_config_with(&locations).expect("last-resort default must always resolve");
    assert_eq!((config.width(), config.height()), (384, 192));
    assert_eq!(config.chain.len(), 1);
    assert_eq!(config.chain[0].origin, Origin::Preset);
    assert!(!config.configuration.drawing.correct_colors);
}

#[test]
fn test_device_preset_resolves_without_bundled_dirs() {
    let temp = TempDir::new().expect("should create temp dir");
    let (locations, _) = setup(&temp);
    let locations = without_bundled_dirs(&temp, locations);
    write_project(&locations, "default_to = \"preset/graph_90+e\"\n");

    let config = load_config_with(&locations).expect("embedded presets should resolve");
    assert_eq!((config.width(), config.height()), (384, 192));
    assert!(config.configuration.drawing.correct_colors);
    let background = config.geometry.background.expect("fx-CG50 uses a background");
    assert!(background.embedded);
    assert_eq!((background.width, background.height), (400, 228));
}

#[test]
fn test_preset_cycle_is_stopped() {
    let temp = TempDir::new().expect("should create temp dir");
    let (locations, _) = setup(&temp);
    let presets = temp.path().join("presets");
    fs::create_dir_all(&presets).expect("should create presets dir");
    write(&presets.join("a.toml"), "default_to = \"preset/b\"\n");
    write(&presets.join("b.toml"), "default_to = \"preset/a\"\n");
    let locations = Locations { presets_dir: presets, ..locations };
    write_project(&locations, "default_to = \"preset/a\"\n");

    let err = load_config_with(&locations).expect_err("cycle should fail");
    assert!(matches!(err, ConfigError::Resolution(ResolutionError::Revisited { .. })));
}

//! Canvas geometry from the background image
//!
//! When a background image is in use, the canvas fills the image minus the
//! margins, so the declared `width` and `height` are replaced.

use super::bundled;
use super::error::{ConfigError, GeometryError, ResolutionError};
use super::locator::Locations;
use super::schema::{Configuration, MarginSettings, Setting};
use serde::Serialize;
use std::borrow::Cow;
use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Prefix of background images in the global config directory
pub const GLOBAL_IMAGE_PREFIX: &str = "global/";

/// Prefix of background images bundled with the library
pub const BUNDLED_IMAGE_PREFIX: &str = "bg_images/";

/// Background image in use, with its pixel size
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackgroundImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// `path` is missing on disk and the copy compiled into the library is used
    pub embedded: bool,
}

impl BackgroundImage {
    /// Encoded image data, read from `path` or taken from the embedded copy
    pub fn bytes(&self) -> io::Result<Cow<'static, [u8]>> {
        let embedded = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(bundled::bg_image)
            .filter(|_| self.embedded);

        match embedded {
            Some(bytes) => Ok(Cow::Borrowed(bytes)),
            None => fs::read(&self.path).map(Cow::Owned),
        }
    }
}

/// Final canvas size
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedGeometry {
    pub width: u32,
    pub height: u32,
    pub background: Option<BackgroundImage>,
}

/// Path of the image a `background` setting refers to.
///
/// - `<name>`: relative to the project directory
/// - `global/<name>`: in the global config directory
/// - `bg_images/<name>`: one of the bundled images, on disk or embedded
pub fn resolve_background_path(value: &str, locations: &Locations) -> Result<PathBuf, ResolutionError> {
    let path = if let Some(name) = value.strip_prefix(GLOBAL_IMAGE_PREFIX) {
        let dir = locations
            .global_dir
            .as_ref()
            .ok_or_else(|| ResolutionError::NoGlobalDir { reference: value.to_string() })?;
        checked_name(name, value)?;
        dir.join(name)
    } else if let Some(name) = value.strip_prefix(BUNDLED_IMAGE_PREFIX) {
        checked_name(name, value)?;
        locations.bg_images_dir.join(name)
    } else {
        checked_name(value, value)?;
        locations.project_dir.join(value)
    };

    if !path.is_file() && bundled::bg_image_at(&path, locations).is_none() {
        return Err(ResolutionError::MissingImage { path });
    }
    Ok(path)
}

fn checked_name(name: &str, value: &str) -> Result<(), ResolutionError> {
    if name.is_empty() || name.contains('/') || name.contains('\\') || name == ".." {
        return Err(ResolutionError::BackgroundSyntax { value: value.to_string() });
    }
    Ok(())
}

/// Canvas size that fits an image of `image_width` x `image_height` inside the margins.
///
/// Fails unless left+right < image width and top+bottom < image height.
pub fn fit_canvas(
    image_width: u32,
    image_height: u32,
    margins: &MarginSettings,
) -> Result<(u32, u32), GeometryError> {
    let width = shrink(image_width, margins.horizontal()).ok_or(GeometryError::MarginsExceedImage {
        first: Setting::LeftMargin,
        second: Setting::RightMargin,
        combined: margins.horizontal(),
        axis: "width",
        limit: image_width,
    })?;
    let height = shrink(image_height, margins.vertical()).ok_or(GeometryError::MarginsExceedImage {
        first: Setting::TopMargin,
        second: Setting::BottomMargin,
        combined: margins.vertical(),
        axis: "height",
        limit: image_height,
    })?;
    Ok((width, height))
}

/// `size - margins` when at least one pixel remains
fn shrink(size: u32, margins: u64) -> Option<u32> {
    let remaining = u64::from(size).checked_sub(margins).filter(|remaining| *remaining > 0)?;
    u32::try_from(remaining).ok()
}

/// Derive the canvas size, overwriting width and height when a background
/// image is in use. A no-op otherwise.
pub fn derive_geometry(
    config: &mut Configuration,
    locations: &Locations,
) -> Result<ResolvedGeometry, ConfigError> {
    if !config.background.bg_in_use {
        return Ok(ResolvedGeometry {
            width: config.canvas.width,
            height: config.canvas.height,
            background: None,
        });
    }

    let path = resolve_background_path(&config.background.background, locations)?;
    let embedded = bundled::bg_image_at(&path, locations);
    let (image_width, image_height) = match embedded {
        Some(bytes) => embedded_image_size(bytes, &path)?,
        None => image_size(&path)?,
    };
    let (width, height) = fit_canvas(image_width, image_height, &config.margins)?;

    debug!(
        path = %path.display(),
        image_width,
        image_height,
        width,
        height,
        embedded = embedded.is_some(),
        "canvas size derived from background image"
    );

    config.canvas.width = width;
    config.canvas.height = height;

    Ok(ResolvedGeometry {
        width,
        height,
        background: Some(BackgroundImage {
            path,
            width: image_width,
            height: image_height,
            embedded: embedded.is_some(),
        }),
    })
}

/// Pixel size read from the image header, without decoding pixel data
fn image_size(path: &Path) -> Result<(u32, u32), GeometryError> {
    image::image_dimensions(path)
        .map_err(|source| GeometryError::ImageRead { path: path.to_path_buf(), source })
}

/// Pixel size read from the header of an embedded image
fn embedded_image_size(bytes: &[u8], path: &Path) -> Result<(u32, u32), GeometryError> {
    image::io::Reader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)
        .and_then(|reader| reader.into_dimensions())
        .map_err(|source| GeometryError::ImageRead { path: path.to_path_buf(), source })
}

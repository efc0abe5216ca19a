//! Configuration schema for casioplot config files
//!
//! Defines the closed set of settings, the sections they belong to, and the
//! typed [`Configuration`] record a chain of config files resolves into.

use serde::Serialize;
use std::fmt;

/// Top-level key holding the chain pointer to a more generic config file
pub const POINTER_KEY: &str = "default_to";

/// Raster formats a screenshot of the virtual screen can be saved as
pub const IMAGE_FORMATS: [&str; 7] = ["jpeg", "jpg", "png", "gif", "bmp", "tiff", "tif"];

/// Config file section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    /// `[canvas]`
    Canvas,
    /// `[margins]`
    Margins,
    /// `[background]`
    Background,
    /// `[showing_screen]`, also accepted as `[show_screen]`
    ShowingScreen,
    /// `[saving_screen]`
    SavingScreen,
    /// `[drawing]`
    Drawing,
}

impl Section {
    /// Every section, in file layout order
    pub const ALL: [Section; 6] = [
        Section::Canvas,
        Section::Margins,
        Section::Background,
        Section::ShowingScreen,
        Section::SavingScreen,
        Section::Drawing,
    ];

    /// Canonical section name as written in a config file
    pub fn name(self) -> &'static str {
        match self {
            Section::Canvas => "canvas",
            Section::Margins => "margins",
            Section::Background => "background",
            Section::ShowingScreen => "showing_screen",
            Section::SavingScreen => "saving_screen",
            Section::Drawing => "drawing",
        }
    }

    /// Look up a section by name. Older config files use `show_screen`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "canvas" => Some(Section::Canvas),
            "margins" => Some(Section::Margins),
            "background" => Some(Section::Background),
            "showing_screen" | "show_screen" => Some(Section::ShowingScreen),
            "saving_screen" => Some(Section::SavingScreen),
            "drawing" => Some(Section::Drawing),
            _ => None,
        }
    }

    /// Settings that live in this section, in schema order
    pub fn settings(self) -> impl Iterator<Item = Setting> {
        Setting::ALL.into_iter().filter(move |setting| setting.section() == self)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value type a setting must have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    Integer,
    Boolean,
    String,
}

impl SettingKind {
    pub fn name(self) -> &'static str {
        match self {
            SettingKind::Integer => "integer",
            SettingKind::Boolean => "boolean",
            SettingKind::String => "string",
        }
    }

    /// Exact type match, no coercion between TOML types
    pub fn matches(self, value: &toml::Value) -> bool {
        matches!(
            (self, value),
            (SettingKind::Integer, toml::Value::Integer(_))
                | (SettingKind::Boolean, toml::Value::Boolean(_))
                | (SettingKind::String, toml::Value::String(_))
        )
    }
}

impl fmt::Display for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A recognized setting.
///
/// Variant order is schema order: the validator walks settings in this order
/// and a `BTreeMap<Setting, _>` iterates in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Setting {
    Width,
    Height,
    LeftMargin,
    RightMargin,
    TopMargin,
    BottomMargin,
    BgInUse,
    Background,
    ShowScreen,
    CloseWindow,
    SaveScreen,
    ImageName,
    ImageFormat,
    SaveMultiple,
    SaveRate,
    CorrectColors,
    DebuggingMessages,
}

impl Setting {
    /// The whole schema
    pub const ALL: [Setting; 17] = [
        Setting::Width,
        Setting::Height,
        Setting::LeftMargin,
        Setting::RightMargin,
        Setting::TopMargin,
        Setting::BottomMargin,
        Setting::BgInUse,
        Setting::Background,
        Setting::ShowScreen,
        Setting::CloseWindow,
        Setting::SaveScreen,
        Setting::ImageName,
        Setting::ImageFormat,
        Setting::SaveMultiple,
        Setting::SaveRate,
        Setting::CorrectColors,
        Setting::DebuggingMessages,
    ];

    /// Key used in config files
    pub fn name(self) -> &'static str {
        match self {
            Setting::Width => "width",
            Setting::Height => "height",
            Setting::LeftMargin => "left_margin",
            Setting::RightMargin => "right_margin",
            Setting::TopMargin => "top_margin",
            Setting::BottomMargin => "bottom_margin",
            Setting::BgInUse => "bg_in_use",
            Setting::Background => "background",
            Setting::ShowScreen => "show_screen",
            Setting::CloseWindow => "close_window",
            Setting::SaveScreen => "save_screen",
            Setting::ImageName => "image_name",
            Setting::ImageFormat => "image_format",
            Setting::SaveMultiple => "save_multiple",
            Setting::SaveRate => "save_rate",
            Setting::CorrectColors => "correct_colors",
            Setting::DebuggingMessages => "debugging_messages",
        }
    }

    /// Look up a setting by name. `debuging_messages` is the spelling used
    /// by older config files.
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "debuging_messages" {
            return Some(Setting::DebuggingMessages);
        }
        Setting::ALL.into_iter().find(|setting| setting.name() == name)
    }

    /// Section the setting must be declared in
    pub fn section(self) -> Section {
        match self {
            Setting::Width | Setting::Height => Section::Canvas,
            Setting::LeftMargin
            | Setting::RightMargin
            | Setting::TopMargin
            | Setting::BottomMargin => Section::Margins,
            Setting::BgInUse | Setting::Background => Section::Background,
            Setting::ShowScreen | Setting::CloseWindow => Section::ShowingScreen,
            Setting::SaveScreen
            | Setting::ImageName
            | Setting::ImageFormat
            | Setting::SaveMultiple
            | Setting::SaveRate => Section::SavingScreen,
            Setting::CorrectColors | Setting::DebuggingMessages => Section::Drawing,
        }
    }

    pub fn kind(self) -> SettingKind {
        match self {
            Setting::Width
            | Setting::Height
            | Setting::LeftMargin
            | Setting::RightMargin
            | Setting::TopMargin
            | Setting::BottomMargin
            | Setting::SaveRate => SettingKind::Integer,
            Setting::BgInUse
            | Setting::ShowScreen
            | Setting::CloseWindow
            | Setting::SaveScreen
            | Setting::SaveMultiple
            | Setting::CorrectColors
            | Setting::DebuggingMessages => SettingKind::Boolean,
            Setting::Background | Setting::ImageName | Setting::ImageFormat => SettingKind::String,
        }
    }

    /// Human-readable value constraint, completing "the setting must ..."
    pub fn constraint(self) -> Option<&'static str> {
        match self {
            Setting::Width | Setting::Height => Some("be greater than zero"),
            Setting::LeftMargin
            | Setting::RightMargin
            | Setting::TopMargin
            | Setting::BottomMargin => Some("be greater or equal to zero"),
            Setting::ImageName => Some("be a non-empty string"),
            Setting::ImageFormat => {
                Some("be one of the following values: jpeg, jpg, png, gif, bmp, tiff or tif")
            }
            Setting::SaveRate => Some(
                "be greater than zero when 'save_multiple' is true, and never negative",
            ),
            _ => None,
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Screenshot file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Jpg,
    Png,
    Gif,
    Bmp,
    Tiff,
    Tif,
}

impl ImageFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "jpeg" => Some(ImageFormat::Jpeg),
            "jpg" => Some(ImageFormat::Jpg),
            "png" => Some(ImageFormat::Png),
            "gif" => Some(ImageFormat::Gif),
            "bmp" => Some(ImageFormat::Bmp),
            "tiff" => Some(ImageFormat::Tiff),
            "tif" => Some(ImageFormat::Tif),
            _ => None,
        }
    }

    /// Name as written in config files, also used as the file extension
    pub fn as_str(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Tiff => "tiff",
            ImageFormat::Tif => "tif",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `[canvas]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanvasSettings {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
}

/// `[margins]` section, space between the window border and the canvas
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarginSettings {
    pub left_margin: u32,
    pub right_margin: u32,
    pub top_margin: u32,
    pub bottom_margin: u32,
}

impl MarginSettings {
    pub fn horizontal(&self) -> u64 {
        u64::from(self.left_margin) + u64::from(self.right_margin)
    }

    pub fn vertical(&self) -> u64 {
        u64::from(self.top_margin) + u64::from(self.bottom_margin)
    }
}

/// `[background]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackgroundSettings {
    /// When false, `background` is ignored
    pub bg_in_use: bool,
    /// Image reference: `<name>`, `global/<name>` or `bg_images/<name>`
    pub background: String,
}

/// `[showing_screen]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowingScreenSettings {
    /// Show the virtual screen in a window
    pub show_screen: bool,
    /// Close the window when the program exits
    pub close_window: bool,
}

/// `[saving_screen]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavingScreenSettings {
    /// Save the virtual screen as an image
    pub save_screen: bool,
    /// Screenshot file name, without extension
    pub image_name: String,
    pub image_format: ImageFormat,
    /// Save a numbered series of images instead of overwriting one
    pub save_multiple: bool,
    /// With `save_multiple`, save every `save_rate` screen refreshes
    pub save_rate: u32,
}

/// `[drawing]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawingSettings {
    /// Reduce pixel colors to what the calculator's 16-bit screen can show
    pub correct_colors: bool,
    /// Warn when a pixel or text is drawn outside the canvas
    pub debugging_messages: bool,
}

/// Complete, validated configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    pub canvas: CanvasSettings,
    pub margins: MarginSettings,
    pub background: BackgroundSettings,
    pub showing_screen: ShowingScreenSettings,
    pub saving_screen: SavingScreenSettings,
    pub drawing: DrawingSettings,
}

impl Configuration {
    /// Serialize back into the config file layout, one table per section
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

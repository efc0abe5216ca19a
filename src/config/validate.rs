//! Validation of merged settings
//!
//! Turns the untyped [`PartialConfiguration`] produced by the chain into a
//! typed [`Configuration`]. Settings are checked in schema order and the
//! first failure is returned.

use super::error::ValidationError;
use super::parser::PartialConfiguration;
use super::schema::{
    BackgroundSettings, CanvasSettings, Configuration, DrawingSettings, ImageFormat,
    MarginSettings, SavingScreenSettings, Setting, ShowingScreenSettings,
};

const U32_RANGE: &str = "fit in an unsigned 32-bit integer";

/// Lower bound an integer setting must respect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Positive,
    NonNegative,
}

/// Bound for an integer setting. `save_rate` is only required to be positive
/// when numbered screenshots are enabled.
fn integer_bound(setting: Setting, save_multiple: bool) -> Bound {
    match setting {
        Setting::Width | Setting::Height => Bound::Positive,
        Setting::SaveRate if save_multiple => Bound::Positive,
        _ => Bound::NonNegative,
    }
}

/// Check presence, type and value of every setting.
pub fn validate(settings: &PartialConfiguration) -> Result<Configuration, ValidationError> {
    let checker = Checker { settings };

    let canvas = CanvasSettings {
        width: checker.integer(Setting::Width, false)?,
        height: checker.integer(Setting::Height, false)?,
    };
    let margins = MarginSettings {
        left_margin: checker.integer(Setting::LeftMargin, false)?,
        right_margin: checker.integer(Setting::RightMargin, false)?,
        top_margin: checker.integer(Setting::TopMargin, false)?,
        bottom_margin: checker.integer(Setting::BottomMargin, false)?,
    };
    let background = BackgroundSettings {
        bg_in_use: checker.boolean(Setting::BgInUse)?,
        background: checker.string(Setting::Background)?.to_string(),
    };
    let showing_screen = ShowingScreenSettings {
        show_screen: checker.boolean(Setting::ShowScreen)?,
        close_window: checker.boolean(Setting::CloseWindow)?,
    };

    let save_screen = checker.boolean(Setting::SaveScreen)?;
    let image_name = checker.string(Setting::ImageName)?;
    if image_name.is_empty() {
        return Err(checker.constraint(Setting::ImageName));
    }
    let image_format = ImageFormat::from_name(checker.string(Setting::ImageFormat)?)
        .ok_or_else(|| checker.constraint(Setting::ImageFormat))?;
    let save_multiple = checker.boolean(Setting::SaveMultiple)?;
    let save_rate = checker.integer(Setting::SaveRate, save_multiple)?;

    let drawing = DrawingSettings {
        correct_colors: checker.boolean(Setting::CorrectColors)?,
        debugging_messages: checker.boolean(Setting::DebuggingMessages)?,
    };

    Ok(Configuration {
        canvas,
        margins,
        background,
        showing_screen,
        saving_screen: SavingScreenSettings {
            save_screen,
            image_name: image_name.to_string(),
            image_format,
            save_multiple,
            save_rate,
        },
        drawing,
    })
}

/// Render a value for error messages, e.g. `"webp" (string)`
fn describe(value: &toml::Value) -> String {
    format!("{} ({})", value, value.type_str())
}

fn wrong_type(setting: Setting, value: &toml::Value) -> ValidationError {
    ValidationError::WrongType { setting, expected: setting.kind(), actual: describe(value) }
}

struct Checker<'a> {
    settings: &'a PartialConfiguration,
}

impl<'a> Checker<'a> {
    fn present(&self, setting: Setting) -> Result<&'a toml::Value, ValidationError> {
        self.settings.get(setting).ok_or(ValidationError::Missing { setting })
    }

    fn integer(&self, setting: Setting, save_multiple: bool) -> Result<u32, ValidationError> {
        let value = self.present(setting)?;
        let raw = value.as_integer().ok_or_else(|| wrong_type(setting, value))?;

        let in_bound = match integer_bound(setting, save_multiple) {
            Bound::Positive => raw > 0,
            Bound::NonNegative => raw >= 0,
        };
        if !in_bound {
            return Err(self.constraint(setting));
        }

        u32::try_from(raw).map_err(|_| ValidationError::Constraint {
            setting,
            constraint: U32_RANGE,
            actual: describe(value),
        })
    }

    fn boolean(&self, setting: Setting) -> Result<bool, ValidationError> {
        let value = self.present(setting)?;
        value.as_bool().ok_or_else(|| wrong_type(setting, value))
    }

    fn string(&self, setting: Setting) -> Result<&'a str, ValidationError> {
        let value = self.present(setting)?;
        value.as_str().ok_or_else(|| wrong_type(setting, value))
    }

    /// Constraint failure for a present, well-typed setting
    fn constraint(&self, setting: Setting) -> ValidationError {
        let actual = self.settings.get(setting).map(describe).unwrap_or_default();
        ValidationError::Constraint {
            setting,
            constraint: setting.constraint().unwrap_or("be valid"),
            actual,
        }
    }
}

//! Screen layout derived from a resolved configuration
//!
//! Read-only helpers for the window and framebuffer: where the canvas sits
//! inside the window, how drawn pixels are filtered, how screenshots are
//! named and when numbered screenshots are due.

use crate::config::{DrawingSettings, ResolvedConfig, SavingScreenSettings};
use std::path::PathBuf;
use tracing::warn;

/// RGB pixel color
pub type Color = (u8, u8, u8);

/// Color as the calculator's RGB565 screen shows it
pub fn calculator_color((red, green, blue): Color) -> Color {
    (red & 0xF8, green & 0xFC, blue & 0xF8)
}

/// Window and canvas placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Window width: margins plus canvas
    pub window_width: u32,
    /// Window height: margins plus canvas
    pub window_height: u32,
    /// Left edge of the canvas inside the window
    pub canvas_x: u32,
    /// Top edge of the canvas inside the window
    pub canvas_y: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl ScreenLayout {
    pub fn new(config: &ResolvedConfig) -> Self {
        let margins = &config.configuration.margins;
        Self {
            window_width: margins
                .left_margin
                .saturating_add(config.width())
                .saturating_add(margins.right_margin),
            window_height: margins
                .top_margin
                .saturating_add(config.height())
                .saturating_add(margins.bottom_margin),
            canvas_x: margins.left_margin,
            canvas_y: margins.top_margin,
            canvas_width: config.width(),
            canvas_height: config.height(),
        }
    }

    /// Whether canvas coordinates fall on the canvas
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.canvas_width) && y < i64::from(self.canvas_height)
    }
}

/// Applies the `[drawing]` settings to pixels before they reach the canvas
#[derive(Debug, Clone)]
pub struct PixelFilter {
    layout: ScreenLayout,
    correct_colors: bool,
    debugging_messages: bool,
}

impl PixelFilter {
    pub fn new(layout: ScreenLayout, drawing: &DrawingSettings) -> Self {
        Self {
            layout,
            correct_colors: drawing.correct_colors,
            debugging_messages: drawing.debugging_messages,
        }
    }

    /// Color to store for a pixel
    pub fn color(&self, color: Color) -> Color {
        if self.correct_colors {
            calculator_color(color)
        } else {
            color
        }
    }

    /// Whether `operation` may touch the pixel at `(x, y)`. Out-of-canvas
    /// coordinates are ignored, with a warning if `debugging_messages` is set.
    pub fn accepts(&self, operation: &str, x: i64, y: i64) -> bool {
        if self.layout.contains(x, y) {
            return true;
        }
        if self.debugging_messages {
            warn!(
                operation,
                x,
                y,
                width = self.layout.canvas_width,
                height = self.layout.canvas_height,
                "coordinates outside the canvas"
            );
        }
        false
    }
}

impl From<&ResolvedConfig> for PixelFilter {
    fn from(config: &ResolvedConfig) -> Self {
        Self::new(ScreenLayout::new(config), &config.configuration.drawing)
    }
}

impl From<&ResolvedConfig> for ScreenLayout {
    fn from(config: &ResolvedConfig) -> Self {
        Self::new(config)
    }
}

/// Screenshot file name: `<image_name><index>.<image_format>`
pub fn screenshot_path(saving: &SavingScreenSettings, index: Option<u32>) -> PathBuf {
    let suffix = index.map(|i| i.to_string()).unwrap_or_default();
    PathBuf::from(format!("{}{}.{}", saving.image_name, suffix, saving.image_format))
}

/// Counts screen refreshes and says when the next numbered screenshot is due.
///
/// Only active when both `save_screen` and `save_multiple` are set.
#[derive(Debug, Clone)]
pub struct SaveSchedule {
    enabled: bool,
    rate: u32,
    counter: u32,
    next_index: u32,
}

impl SaveSchedule {
    pub fn new(saving: &SavingScreenSettings) -> Self {
        Self {
            enabled: saving.save_screen && saving.save_multiple && saving.save_rate > 0,
            rate: saving.save_rate,
            counter: 1,
            next_index: 1,
        }
    }

    /// Record one screen refresh. Returns the screenshot index to save, if due.
    pub fn tick(&mut self) -> Option<u32> {
        if !self.enabled {
            return None;
        }

        if self.counter == self.rate {
            let index = self.next_index;
            self.next_index += 1;
            self.counter = 1;
            Some(index)
        } else {
            self.counter += 1;
            None
        }
    }
}

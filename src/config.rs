/*
 * Runtime configuration for the menu chrome. Values are resolved once when
 * the hook is installed and never change afterwards; every toggle keeps a
 * single code path that tests can drive with either setting.
 */

use crate::styling_primitives::Color;

/// Width of the native popup border the legacy redraw paints over.
pub const DEFAULT_NONCLIENT_MARGIN: i32 = 3;

pub const DEFAULT_BORDER_COLOR_DARK: Color = Color::new(0x45, 0x45, 0x45);
pub const DEFAULT_BORDER_COLOR_LIGHT: Color = Color::new(0xD6, 0xD6, 0xD6);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromeConfig {
    pub round_corners: bool,
    pub recolor_borders: bool,
    pub legacy_border_redraw: bool,
    pub border_color_dark: Color,
    pub border_color_light: Color,
    pub nonclient_margin: i32,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            round_corners: true,
            recolor_borders: true,
            legacy_border_redraw: true,
            border_color_dark: DEFAULT_BORDER_COLOR_DARK,
            border_color_light: DEFAULT_BORDER_COLOR_LIGHT,
            nonclient_margin: DEFAULT_NONCLIENT_MARGIN,
        }
    }
}

impl ChromeConfig {
    pub fn with_round_corners(mut self, enabled: bool) -> Self {
        self.round_corners = enabled;
        self
    }

    pub fn with_recolor_borders(mut self, enabled: bool) -> Self {
        self.recolor_borders = enabled;
        self
    }

    pub fn with_legacy_border_redraw(mut self, enabled: bool) -> Self {
        self.legacy_border_redraw = enabled;
        self
    }

    pub fn with_border_colors(mut self, dark: Color, light: Color) -> Self {
        self.border_color_dark = dark;
        self.border_color_light = light;
        self
    }

    /// Negative margins are clamped to zero.
    pub fn with_nonclient_margin(mut self, margin: i32) -> Self {
        self.nonclient_margin = margin.max(0);
        self
    }

    pub fn border_color(&self, dark_mode: bool) -> Color {
        if dark_mode {
            self.border_color_dark
        } else {
            self.border_color_light
        }
    }
}

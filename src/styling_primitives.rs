/*
 * Platform-agnostic color primitives. Native visual-attribute calls expect
 * colors in BGR order (`COLORREF`), while configuration is written as RGB.
 * The conversions live here so both the portable core and the Win32
 * adapters agree on the layout.
 */

use crate::error::{ChromeError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` or `RRGGBB`.
    pub fn from_hex(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ChromeError::InvalidColor(input.to_string()));
        }
        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| ChromeError::InvalidColor(input.to_string()))?;
        Ok(Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        })
    }
}

/// Native color value in `0x00BBGGRR` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorRef(pub u32);

pub fn color_to_colorref(color: &Color) -> ColorRef {
    ColorRef((color.r as u32) | ((color.g as u32) << 8) | ((color.b as u32) << 16))
}

pub fn colorref_to_color(cr: ColorRef) -> Color {
    Color {
        r: (cr.0 & 0xFF) as u8,
        g: ((cr.0 >> 8) & 0xFF) as u8,
        b: ((cr.0 >> 16) & 0xFF) as u8,
    }
}

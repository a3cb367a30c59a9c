use super::to_hwnd;
use crate::chrome::{ATTRIBUTE_BORDER_COLOR, ATTRIBUTE_CORNER_PREFERENCE, ChromeCustomizer};
use crate::styling_primitives::ColorRef;
use crate::types::{CornerStyle, WindowHandle};

use windows::Win32::Graphics::Dwm::{DWMWINDOWATTRIBUTE, DwmSetWindowAttribute};

/// Applies popup chrome through `DwmSetWindowAttribute`. Failures are cosmetic and only logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct DwmChromeCustomizer;

fn set_dword_attribute(window: WindowHandle, attribute: u32, value: u32) {
    let result = unsafe {
        DwmSetWindowAttribute(
            to_hwnd(window),
            DWMWINDOWATTRIBUTE(attribute as i32),
            &value as *const _ as *const _,
            std::mem::size_of_val(&value) as u32,
        )
    };
    if let Err(err) = result {
        log::warn!("[Chrome] DWM attribute {attribute} on {window:?} failed: {err:?}");
    }
}

impl ChromeCustomizer for DwmChromeCustomizer {
    fn apply_corner_style(&self, window: WindowHandle, style: CornerStyle) {
        set_dword_attribute(window, ATTRIBUTE_CORNER_PREFERENCE, style.native_value());
    }

    fn apply_border_color(&self, window: WindowHandle, color: ColorRef) {
        set_dword_attribute(window, ATTRIBUTE_BORDER_COLOR, color.0);
    }
}

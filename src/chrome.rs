/*
 * Visual chrome applied to a popup menu window when it is shown: small
 * rounded corners and a mode-dependent border color. Both are single
 * best-effort window-attribute calls on the newer host generation; the
 * older generation has neither attribute and relies on the legacy border
 * redraw in the interceptor instead.
 */

use crate::styling_primitives::ColorRef;
use crate::types::{AppearanceState, ChromeFeature, CornerStyle, WindowHandle};

/// Native attribute id for the corner preference.
pub const ATTRIBUTE_CORNER_PREFERENCE: u32 = 33;
/// Native attribute id for the border color.
pub const ATTRIBUTE_BORDER_COLOR: u32 = 34;

pub trait ChromeCustomizer: Send + Sync {
    fn apply_corner_style(&self, window: WindowHandle, style: CornerStyle);
    fn apply_border_color(&self, window: WindowHandle, color: ColorRef);
}

/// What `apply_popup_chrome` ended up doing, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppliedChrome {
    pub corners: bool,
    pub border: Option<ColorRef>,
}

pub fn apply_popup_chrome(
    appearance: &dyn AppearanceState,
    customizer: &dyn ChromeCustomizer,
    window: WindowHandle,
) -> AppliedChrome {
    let mut applied = AppliedChrome::default();
    if !appearance.host_generation_is_newer() {
        return applied;
    }

    if appearance.feature_enabled(ChromeFeature::RoundedCorners) {
        customizer.apply_corner_style(window, CornerStyle::RoundSmall);
        applied.corners = true;
    }

    if appearance.feature_enabled(ChromeFeature::BorderColor) {
        let color = appearance.border_color(appearance.dark_mode_active());
        customizer.apply_border_color(window, color);
        applied.border = Some(color);
    }

    log::debug!("[Chrome] Applied {applied:?} to popup {window:?}");
    applied
}

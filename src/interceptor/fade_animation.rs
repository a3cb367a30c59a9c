/*
 * Replaces the host's close animation for pointer-released menu items.
 *
 * The popup control sends `MN_BUTTONUP` right before it starts its own
 * selection fade, and only for pointer releases (keyboard selection never
 * animates). When the system fade preference is on and the released item
 * is an enabled leaf, we start our animation, switch the preference off for
 * the duration of the default handling and switch it back afterwards.
 */

use super::MenuHost;
use crate::types::{CloseAnimation, MessageOutcome, WindowHandle, WindowMessage};

/// Holds the selection fade off; restores the prior value when dropped.
struct FadeSuppression<'a, H: MenuHost> {
    host: &'a H,
    prior: bool,
}

impl<'a, H: MenuHost> FadeSuppression<'a, H> {
    fn engage(host: &'a H, prior: bool) -> Self {
        if !host.set_selection_fade(false) {
            log::warn!("[Interceptor] Failed to suspend the selection fade preference.");
        }
        Self { host, prior }
    }
}

impl<H: MenuHost> Drop for FadeSuppression<'_, H> {
    fn drop(&mut self) {
        if !self.host.set_selection_fade(self.prior) {
            log::warn!(
                "[Interceptor] Failed to restore the selection fade preference to {}.",
                self.prior
            );
        }
    }
}

/// Bar item ids are one-based; id 0 addresses the menu as a whole.
pub(crate) fn bar_position(item_index: u32) -> Option<i32> {
    i32::try_from(item_index).ok()?.checked_add(1)
}

pub(crate) fn handle_item_released<H: MenuHost>(
    host: &H,
    animation: &dyn CloseAnimation,
    window: WindowHandle,
    message: WindowMessage,
) -> MessageOutcome {
    let Some(prior @ true) = host.selection_fade_enabled() else {
        log::trace!("[Interceptor] Selection fade is off; leaving item release to the host.");
        return MessageOutcome::PassThrough;
    };

    let Some(menu) = host.menu_of(window) else {
        return MessageOutcome::PassThrough;
    };
    let index = message.wparam as u32;
    let Some(item) = host.menu_item(menu, index) else {
        log::debug!("[Interceptor] No item {index} in {menu:?}; not intercepting.");
        return MessageOutcome::PassThrough;
    };
    if !item.is_actionable() {
        return MessageOutcome::PassThrough;
    }

    let Some(position) = bar_position(index) else {
        return MessageOutcome::PassThrough;
    };
    let Some(geometry) = host.menu_bar_geometry(window, position) else {
        log::debug!("[Interceptor] Bar geometry unavailable for item {index} of {window:?}.");
        return MessageOutcome::PassThrough;
    };

    animation.begin_close_animation(&geometry);

    let result = {
        let _suppressed = FadeSuppression::engage(host, prior);
        host.forward_default(window, message)
    };
    MessageOutcome::Handled(result)
}

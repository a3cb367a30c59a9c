/*
 * Legacy border redraw for the older host generation. The native popup
 * frame is drawn light and cannot be recolored there, so both the frame
 * paint and the print-to-DC path cover it with the placeholder fill. The
 * print path then shifts the origin by the border width before letting the
 * host render the client area, keeping client content aligned.
 */

use super::message_router::{WM_PRINTCLIENT, update_region};
use super::{DrawingSurface, MenuHost};
use crate::types::{MessageOutcome, Point, WindowHandle, WindowMessage};

/// Restores the saved device-context state when dropped.
struct SavedState<'a, S: DrawingSurface> {
    surface: &'a mut S,
    saved: Option<i32>,
}

impl<'a, S: DrawingSurface> SavedState<'a, S> {
    fn save(surface: &'a mut S) -> Self {
        let saved = surface.save_state();
        if saved.is_none() {
            log::warn!("[Interceptor] Failed to save device context state.");
        }
        Self { surface, saved }
    }

    fn surface(&mut self) -> &mut S {
        &mut *self.surface
    }
}

impl<S: DrawingSurface> Drop for SavedState<'_, S> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved {
            self.surface.restore_state(saved);
        }
    }
}

fn fill_clip_area<S: DrawingSurface>(surface: &mut S) {
    if let Some(area) = surface.clip_box()
        && !area.is_empty()
    {
        surface.fill_placeholder(&area);
    }
}

pub(crate) fn handle_print<H: MenuHost>(
    host: &H,
    window: WindowHandle,
    message: WindowMessage,
    margin: i32,
) -> MessageOutcome {
    let Some(mut surface) = host.target_surface(message.wparam) else {
        return MessageOutcome::PassThrough;
    };

    let result = {
        let mut state = SavedState::save(&mut surface);
        fill_clip_area(state.surface());

        let previous = state
            .surface()
            .set_viewport_origin(Point { x: margin, y: margin });
        let result = host.forward_default(
            window,
            WindowMessage::new(WM_PRINTCLIENT, message.wparam, message.lparam),
        );
        if let Some(previous) = previous {
            state.surface().set_viewport_origin(previous);
        }
        result
    };

    log::trace!("[Interceptor] Printed {window:?} with border margin {margin}.");
    MessageOutcome::Handled(result)
}

pub(crate) fn handle_nonclient_paint<H: MenuHost>(
    host: &H,
    window: WindowHandle,
    message: WindowMessage,
) -> MessageOutcome {
    let Some(mut surface) = host.window_surface(window) else {
        log::warn!("[Interceptor] No window DC for {window:?}; using native frame paint.");
        return MessageOutcome::PassThrough;
    };

    if let Some(region) = update_region(message.wparam) {
        surface.select_clip_region(region);
    }
    fill_clip_area(&mut surface);

    MessageOutcome::Handled(0)
}

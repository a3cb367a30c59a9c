/*
 * Per-window message interceptor for accepted popup menus. Three messages
 * get custom handling: the print-to-DC request and the frame paint (both
 * only while the legacy border redraw is active) and the private
 * item-release message that precedes the host's own close animation.
 * Every other message is reported as `PassThrough` and the caller forwards
 * it unmodified.
 *
 * The host side (default forwarding, device contexts, menu queries and the
 * system fade preference) is reached through `MenuHost`, so the handlers
 * can be driven by synthetic message sequences.
 */

pub mod fade_animation;
pub mod legacy_border;
pub mod message_router;

use crate::config::ChromeConfig;
use crate::types::{
    AppearanceState, BarGeometry, ChromeFeature, CloseAnimation, MenuHandle, MenuItemDescriptor,
    MessageOutcome, Point, Rect, WindowHandle, WindowMessage,
};
use message_router::{MessageRoute, resolve_message_route};

use std::sync::Arc;

/// A device context the legacy border handlers draw into.
pub trait DrawingSurface {
    /// Pushes the current state; returns the saved-state index.
    fn save_state(&mut self) -> Option<i32>;
    fn restore_state(&mut self, saved: i32);
    fn select_clip_region(&mut self, region: usize);
    fn clip_box(&self) -> Option<Rect>;
    fn fill_placeholder(&mut self, area: &Rect);
    /// Returns the previous origin.
    fn set_viewport_origin(&mut self, origin: Point) -> Option<Point>;
}

pub trait MenuHost {
    type Surface: DrawingSurface;

    fn forward_default(&self, window: WindowHandle, message: WindowMessage) -> isize;
    /// Wraps a caller-owned device context; dropping it does not release it.
    fn target_surface(&self, raw_dc: usize) -> Option<Self::Surface>;
    /// Acquires a device context for the whole window, released on drop.
    fn window_surface(&self, window: WindowHandle) -> Option<Self::Surface>;
    fn selection_fade_enabled(&self) -> Option<bool>;
    fn set_selection_fade(&self, enabled: bool) -> bool;
    fn menu_of(&self, window: WindowHandle) -> Option<MenuHandle>;
    fn menu_item(&self, menu: MenuHandle, index: u32) -> Option<MenuItemDescriptor>;
    fn menu_bar_geometry(&self, window: WindowHandle, position: i32) -> Option<BarGeometry>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterceptorSettings {
    pub legacy_redraw: bool,
    pub nonclient_margin: i32,
}

impl InterceptorSettings {
    /// The border-color attribute replaces the legacy redraw on the newer generation.
    pub fn resolve(appearance: &dyn AppearanceState, config: &ChromeConfig) -> Self {
        Self {
            legacy_redraw: appearance.feature_enabled(ChromeFeature::LegacyBorderRedraw)
                && !appearance.host_generation_is_newer(),
            nonclient_margin: config.nonclient_margin,
        }
    }
}

pub struct MessageInterceptor {
    settings: InterceptorSettings,
    animation: Arc<dyn CloseAnimation>,
}

impl MessageInterceptor {
    pub fn new(settings: InterceptorSettings, animation: Arc<dyn CloseAnimation>) -> Self {
        log::debug!("[Interceptor] Created with {settings:?}");
        Self {
            settings,
            animation,
        }
    }

    pub fn settings(&self) -> InterceptorSettings {
        self.settings
    }

    pub fn on_message<H: MenuHost>(
        &self,
        host: &H,
        window: WindowHandle,
        message: WindowMessage,
    ) -> MessageOutcome {
        match resolve_message_route(message.opcode, self.settings.legacy_redraw) {
            MessageRoute::PrintWindow => legacy_border::handle_print(
                host,
                window,
                message,
                self.settings.nonclient_margin,
            ),
            MessageRoute::NonClientPaint => legacy_border::handle_nonclient_paint(host, window, message),
            MessageRoute::ItemReleased => fade_animation::handle_item_released(
                host,
                self.animation.as_ref(),
                window,
                message,
            ),
            MessageRoute::PassThrough => MessageOutcome::PassThrough,
        }
    }
}

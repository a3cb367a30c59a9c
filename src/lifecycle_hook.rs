/*
 * Top-level sink for window lifecycle notifications. For every created,
 * shown or destroyed window it consults the classifier and appearance
 * flags, keeps the per-thread primary-menu slot up to date, attaches the
 * message interceptor once per accepted window, applies the popup chrome
 * and keeps the external "current menu" registry informed.
 *
 * One `LifecycleHook` exists per UI thread. All callbacks run inline with
 * the host's dispatch, so every method here must return promptly.
 */

use crate::chrome::{ChromeCustomizer, apply_popup_chrome};
use crate::primary_menu::PrimaryMenuTracker;
use crate::types::{
    AppearanceState, InterceptorInstaller, LifecycleEventKind, MenuClassifier, MenuRegistry,
    WindowHandle, WindowValidator,
};

use std::collections::HashSet;
use std::sync::Arc;

pub const EVENT_OBJECT_CREATE: u32 = 0x8000;
pub const EVENT_OBJECT_DESTROY: u32 = 0x8001;
pub const EVENT_OBJECT_SHOW: u32 = 0x8002;

/// Maps a native lifecycle event id to the kinds the hook reacts to.
pub fn lifecycle_kind_from_event(event: u32) -> Option<LifecycleEventKind> {
    match event {
        EVENT_OBJECT_CREATE => Some(LifecycleEventKind::Created),
        EVENT_OBJECT_SHOW => Some(LifecycleEventKind::Shown),
        EVENT_OBJECT_DESTROY => Some(LifecycleEventKind::Destroyed),
        _ => None,
    }
}

/// Collaborators shared by every per-thread hook.
#[derive(Clone)]
pub struct HookServices {
    pub appearance: Arc<dyn AppearanceState>,
    pub classifier: Arc<dyn MenuClassifier>,
    pub validator: Arc<dyn WindowValidator>,
    pub registry: Arc<dyn MenuRegistry>,
    pub installer: Arc<dyn InterceptorInstaller>,
    pub chrome: Arc<dyn ChromeCustomizer>,
}

pub struct LifecycleHook {
    services: HookServices,
    tracker: PrimaryMenuTracker,
    // Windows that already carry an interceptor.
    registrations: HashSet<WindowHandle>,
}

impl LifecycleHook {
    pub fn new(services: HookServices) -> Self {
        Self {
            services,
            tracker: PrimaryMenuTracker::new(),
            registrations: HashSet::new(),
        }
    }

    pub fn on_lifecycle_event(&mut self, kind: LifecycleEventKind, window: WindowHandle) {
        if window.is_null() || !self.services.validator.is_window(window) {
            return;
        }

        match kind {
            LifecycleEventKind::Created => self.handle_created(window),
            LifecycleEventKind::Shown => self.handle_shown(window),
            LifecycleEventKind::Destroyed => self.handle_destroyed(window),
        }
    }

    pub fn primary_menu(&self) -> Option<WindowHandle> {
        self.tracker.current()
    }

    pub fn registration_count(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_registered(&self, window: WindowHandle) -> bool {
        self.registrations.contains(&window)
    }

    // Class check first; the transparency flag may cost a registry read.
    fn is_eligible(&self, window: WindowHandle) -> bool {
        self.services.classifier.is_themed_popup_menu(window)
            && self.services.appearance.transparency_enabled()
    }

    fn handle_created(&mut self, window: WindowHandle) {
        if !self.is_eligible(window) {
            return;
        }

        if self.tracker.try_adopt(window) {
            log::debug!("[MenuHook] Adopted {window:?} as primary menu.");
        }

        if !self.registrations.contains(&window) {
            if self.services.installer.install(window) {
                self.registrations.insert(window);
                log::debug!("[MenuHook] Interceptor installed on {window:?}.");
            } else {
                log::warn!("[MenuHook] Failed to install interceptor on {window:?}.");
            }
        }

        self.services.registry.set_current_menu(Some(window));
    }

    fn handle_shown(&mut self, window: WindowHandle) {
        if self.tracker.current().is_none() || !self.is_eligible(window) {
            return;
        }
        apply_popup_chrome(
            self.services.appearance.as_ref(),
            self.services.chrome.as_ref(),
            window,
        );
    }

    fn handle_destroyed(&mut self, window: WindowHandle) {
        self.registrations.remove(&window);

        if self.tracker.release_if_matches(window) {
            log::debug!("[MenuHook] Primary menu {window:?} destroyed.");
            self.services.registry.set_current_menu(None);
        }
    }
}

/// A thread's hook, tagged with the generation of the services it was built from.
#[derive(Default)]
pub struct ThreadHookSlot {
    current: Option<(u64, LifecycleHook)>,
}

impl ThreadHookSlot {
    pub const fn new() -> Self {
        Self { current: None }
    }

    pub fn generation(&self) -> Option<u64> {
        self.current.as_ref().map(|(generation, _)| *generation)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Routes one event to this thread's hook. `active` is the installed
    /// generation, 0 when nothing is installed. `load_services` only runs
    /// when the slot is empty or was built for another generation.
    pub fn dispatch<F>(
        &mut self,
        active: u64,
        load_services: F,
        kind: LifecycleEventKind,
        window: WindowHandle,
    ) where
        F: FnOnce() -> Option<(u64, HookServices)>,
    {
        if active == 0 {
            self.current = None;
            return;
        }

        if self.generation() != Some(active) {
            let Some((generation, services)) = load_services() else {
                self.current = None;
                return;
            };
            self.current = Some((generation, LifecycleHook::new(services)));
        }

        if let Some((_, hook)) = self.current.as_mut() {
            hook.on_lifecycle_event(kind, window);
        }
    }
}

/*
 * Single-slot tracker for the root window of the active popup cascade.
 * A cascade is created and messaged on the UI thread that opened it, so one
 * tracker lives per thread (owned by that thread's `LifecycleHook`) and no
 * locking is needed.
 */

use crate::types::WindowHandle;

#[derive(Debug, Default)]
pub struct PrimaryMenuTracker {
    primary: Option<WindowHandle>,
}

impl PrimaryMenuTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts `window` as the cascade root if the slot is empty.
    pub fn try_adopt(&mut self, window: WindowHandle) -> bool {
        if self.primary.is_some() || window.is_null() {
            return false;
        }
        self.primary = Some(window);
        true
    }

    /// Clears the slot only when `window` is the adopted root.
    pub fn release_if_matches(&mut self, window: WindowHandle) -> bool {
        if self.primary == Some(window) {
            self.primary = None;
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Option<WindowHandle> {
        self.primary
    }

    pub fn clear(&mut self) {
        self.primary = None;
    }
}

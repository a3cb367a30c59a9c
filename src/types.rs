/*
 * Platform-agnostic types shared by the interception pipeline and the
 * collaborator contracts it consumes. Nothing here touches Win32 directly,
 * so the lifecycle state machine and the message interceptor can be driven
 * by synthetic event sequences on any platform. The native adapters in
 * `win32` translate real handles and callbacks into these types.
 */

use crate::styling_primitives::ColorRef;

/// Opaque window handle owned by the host. Never created or destroyed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

impl WindowHandle {
    pub const NULL: WindowHandle = WindowHandle(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    pub fn raw(self) -> isize {
        self.0
    }
}

/// Opaque handle of the menu object backing a popup window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuHandle(pub isize);

impl MenuHandle {
    pub const NULL: MenuHandle = MenuHandle(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEventKind {
    Created,
    Shown,
    Destroyed,
}

/// A window message as delivered to an installed interceptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowMessage {
    pub opcode: u32,
    pub wparam: usize,
    pub lparam: isize,
}

impl WindowMessage {
    pub const fn new(opcode: u32, wparam: usize, lparam: isize) -> Self {
        Self {
            opcode,
            wparam,
            lparam,
        }
    }
}

/// Result of offering a message to the interceptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOutcome {
    /// Not ours: the caller forwards the message unmodified.
    PassThrough,
    /// Fully handled; the value is returned to the host as-is.
    Handled(isize),
}

/// Type and state flags of a single menu item, queried fresh every time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuItemDescriptor {
    pub is_separator: bool,
    pub is_disabled: bool,
    pub has_submenu: bool,
}

impl MenuItemDescriptor {
    /// Only enabled leaf items close the menu with an animation.
    pub fn is_actionable(&self) -> bool {
        !self.is_separator && !self.is_disabled && !self.has_submenu
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }
}

/// Geometry of one item of a menu window, as reported by the host's bar query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BarGeometry {
    pub bar: Rect,
    pub menu: MenuHandle,
    pub menu_window: WindowHandle,
    pub bar_focused: bool,
    pub item_focused: bool,
}

impl Default for MenuHandle {
    fn default() -> Self {
        MenuHandle::NULL
    }
}

impl Default for WindowHandle {
    fn default() -> Self {
        WindowHandle::NULL
    }
}

/// Corner preference values understood by the native window-attribute call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum CornerStyle {
    Default = 0,
    DoNotRound = 1,
    Round = 2,
    RoundSmall = 3,
}

impl CornerStyle {
    pub fn native_value(self) -> u32 {
        self as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChromeFeature {
    RoundedCorners,
    BorderColor,
    LegacyBorderRedraw,
}

/// Read-only appearance flags. Implementations must be side-effect free.
pub trait AppearanceState: Send + Sync {
    fn transparency_enabled(&self) -> bool;
    fn host_generation_is_newer(&self) -> bool;
    fn dark_mode_active(&self) -> bool;
    fn feature_enabled(&self, feature: ChromeFeature) -> bool;
    fn border_color(&self, dark_mode: bool) -> ColorRef;
}

pub trait MenuClassifier: Send + Sync {
    fn is_themed_popup_menu(&self, window: WindowHandle) -> bool;
}

/// Lifecycle notifications race with teardown; this answers "is it still alive".
pub trait WindowValidator: Send + Sync {
    fn is_window(&self, window: WindowHandle) -> bool;
}

/// External "current menu" sink used by unrelated UI logic.
pub trait MenuRegistry: Send + Sync {
    fn set_current_menu(&self, menu: Option<WindowHandle>);
}

/// Starts the replacement close animation. Must not block the caller.
pub trait CloseAnimation: Send + Sync {
    fn begin_close_animation(&self, geometry: &BarGeometry);
}

/// Attaches the message interceptor to a window. Returns false on failure.
pub trait InterceptorInstaller: Send + Sync {
    fn install(&self, window: WindowHandle) -> bool;
}

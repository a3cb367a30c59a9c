/*
 * Customizes the chrome and closing behavior of system popup menus: small
 * rounded corners and recolored borders on the newer host generation, a
 * placeholder redraw of the light legacy border on the older one, and a
 * replacement close animation for pointer-selected items.
 *
 * The interception pipeline (lifecycle hook, primary-menu tracking and the
 * per-window message interceptor) is platform-agnostic and driven through
 * the collaborator traits in `types`, so it builds and tests everywhere.
 * The `win32` module supplies the native hook, subclass and collaborator
 * implementations and is only compiled on Windows.
 */
pub mod chrome;
pub mod config;
pub mod error;
pub mod interceptor;
pub mod lifecycle_hook;
pub mod primary_menu;
pub mod styling_primitives;
#[cfg(test)]
pub(crate) mod test_support;
pub mod types;
#[cfg(target_os = "windows")]
pub mod win32;

pub use chrome::{ChromeCustomizer, apply_popup_chrome};
pub use config::ChromeConfig;
pub use error::{ChromeError, Result as ChromeResult};
pub use interceptor::{DrawingSurface, InterceptorSettings, MenuHost, MessageInterceptor};
pub use lifecycle_hook::{HookServices, LifecycleHook};
pub use primary_menu::PrimaryMenuTracker;
pub use styling_primitives::{Color, ColorRef};
pub use types::{
    AppearanceState, BarGeometry, ChromeFeature, CloseAnimation, CornerStyle,
    InterceptorInstaller, LifecycleEventKind, MenuClassifier, MenuHandle, MenuItemDescriptor,
    MenuRegistry, MessageOutcome, WindowHandle, WindowMessage, WindowValidator,
};

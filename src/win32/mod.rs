/*
 * Win32 adapters for the portable pipeline: the WinEvent hook that feeds
 * `LifecycleHook`, the window subclass that feeds `MessageInterceptor`, and
 * native implementations of the collaborator traits (registry-backed
 * appearance, class-name classifier, DWM chrome, GDI drawing surfaces).
 */

mod dwm_chrome;
mod event_hook;
mod menu_host;
mod subclass;
mod system_appearance;

pub use dwm_chrome::DwmChromeCustomizer;
pub use event_hook::{MenuHookRegistration, install_menu_hook};
pub use menu_host::{GdiSurface, Win32MenuHost};
pub use subclass::SubclassInstaller;
pub use system_appearance::{NativeWindowValidator, PopupMenuClassifier, SystemAppearance};

use crate::config::ChromeConfig;
use crate::error::Result;
use crate::interceptor::{InterceptorSettings, MessageInterceptor};
use crate::lifecycle_hook::HookServices;
use crate::types::{CloseAnimation, MenuHandle, MenuRegistry, WindowHandle};

use std::ffi::c_void;
use std::sync::Arc;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::HMENU;

pub(crate) fn to_hwnd(window: WindowHandle) -> HWND {
    HWND(window.raw() as *mut c_void)
}

pub(crate) fn from_hwnd(hwnd: HWND) -> WindowHandle {
    WindowHandle(hwnd.0 as isize)
}

pub(crate) fn to_hmenu(menu: MenuHandle) -> HMENU {
    HMENU(menu.0 as *mut c_void)
}

/// Wires the native collaborators together and installs the process-wide hook.
///
/// The caller supplies the "current menu" registry and the close animation;
/// everything else comes from the system. Dropping the returned registration
/// removes the hook.
pub fn install(
    config: ChromeConfig,
    registry: Arc<dyn MenuRegistry>,
    animation: Arc<dyn CloseAnimation>,
) -> Result<MenuHookRegistration> {
    let appearance = Arc::new(SystemAppearance::new(config.clone()));
    let settings = InterceptorSettings::resolve(appearance.as_ref(), &config);
    let interceptor = Arc::new(MessageInterceptor::new(settings, animation));

    let services = HookServices {
        appearance,
        classifier: Arc::new(PopupMenuClassifier),
        validator: Arc::new(NativeWindowValidator),
        registry,
        installer: Arc::new(SubclassInstaller::new(interceptor)),
        chrome: Arc::new(DwmChromeCustomizer),
    };
    install_menu_hook(services)
}

/*
 * Native answers to the appearance and classification questions the hook
 * asks. Transparency and dark mode are read live from the personalization
 * settings so a mode switch is picked up by the next menu; the OS build is
 * read once, since it cannot change while the process runs.
 */

use super::to_hwnd;
use crate::config::ChromeConfig;
use crate::error::{ChromeError, Result};
use crate::styling_primitives::{ColorRef, color_to_colorref};
use crate::types::{AppearanceState, ChromeFeature, MenuClassifier, WindowHandle, WindowValidator};

use std::ffi::c_void;
use windows::Win32::Foundation::ERROR_SUCCESS;
use windows::Win32::System::Registry::{
    HKEY, HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, RRF_RT_REG_DWORD, RRF_RT_REG_SZ, RegGetValueW,
};
use windows::Win32::UI::WindowsAndMessaging::{GetClassNameW, IsWindow};
use windows::core::{PCWSTR, w};

const PERSONALIZE_KEY: PCWSTR =
    w!("Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize");
const CURRENT_VERSION_KEY: PCWSTR = w!("SOFTWARE\\Microsoft\\Windows NT\\CurrentVersion");

/// First build of the host generation that supports rounded corners and border colors.
const FIRST_NEWER_GENERATION_BUILD: u32 = 22000;

/// Window class of the system popup menu.
const POPUP_MENU_CLASS: &str = "#32768";

fn read_dword(root: HKEY, key: PCWSTR, value: PCWSTR) -> Result<u32> {
    let mut data: u32 = 0;
    let mut size = std::mem::size_of::<u32>() as u32;
    let status = unsafe {
        RegGetValueW(
            root,
            key,
            value,
            RRF_RT_REG_DWORD,
            None,
            Some(&mut data as *mut u32 as *mut c_void),
            Some(&mut size),
        )
    };
    if status != ERROR_SUCCESS {
        return Err(ChromeError::Win32 {
            context: "RegGetValueW (DWORD)".to_string(),
            code: status.0,
        });
    }
    Ok(data)
}

fn read_string(root: HKEY, key: PCWSTR, value: PCWSTR) -> Result<String> {
    let mut buf = [0u16; 64];
    let mut size = std::mem::size_of_val(&buf) as u32;
    let status = unsafe {
        RegGetValueW(
            root,
            key,
            value,
            RRF_RT_REG_SZ,
            None,
            Some(buf.as_mut_ptr() as *mut c_void),
            Some(&mut size),
        )
    };
    if status != ERROR_SUCCESS {
        return Err(ChromeError::Win32 {
            context: "RegGetValueW (SZ)".to_string(),
            code: status.0,
        });
    }
    let len = (size as usize / 2).min(buf.len());
    Ok(String::from_utf16_lossy(&buf[..len])
        .trim_end_matches('\0')
        .to_string())
}

fn detect_newer_generation() -> bool {
    match read_string(HKEY_LOCAL_MACHINE, CURRENT_VERSION_KEY, w!("CurrentBuildNumber")) {
        Ok(build) => build
            .trim()
            .parse::<u32>()
            .map(|build| build >= FIRST_NEWER_GENERATION_BUILD)
            .unwrap_or(false),
        Err(err) => {
            log::warn!("[Win32] Could not read OS build number: {err}");
            false
        }
    }
}

#[derive(Debug)]
pub struct SystemAppearance {
    config: ChromeConfig,
    newer_generation: bool,
}

impl SystemAppearance {
    pub fn new(config: ChromeConfig) -> Self {
        let newer_generation = detect_newer_generation();
        log::debug!("[Win32] Newer host generation: {newer_generation}");
        Self {
            config,
            newer_generation,
        }
    }
}

impl AppearanceState for SystemAppearance {
    fn transparency_enabled(&self) -> bool {
        read_dword(HKEY_CURRENT_USER, PERSONALIZE_KEY, w!("EnableTransparency"))
            .map(|value| value != 0)
            .unwrap_or(false)
    }

    fn host_generation_is_newer(&self) -> bool {
        self.newer_generation
    }

    fn dark_mode_active(&self) -> bool {
        read_dword(HKEY_CURRENT_USER, PERSONALIZE_KEY, w!("AppsUseLightTheme"))
            .map(|value| value == 0)
            .unwrap_or(false)
    }

    fn feature_enabled(&self, feature: ChromeFeature) -> bool {
        match feature {
            ChromeFeature::RoundedCorners => self.config.round_corners,
            ChromeFeature::BorderColor => self.config.recolor_borders,
            ChromeFeature::LegacyBorderRedraw => self.config.legacy_border_redraw,
        }
    }

    fn border_color(&self, dark_mode: bool) -> ColorRef {
        color_to_colorref(&self.config.border_color(dark_mode))
    }
}

fn window_class_name(window: WindowHandle) -> Option<String> {
    let mut buf = [0u16; 64];
    let len = unsafe { GetClassNameW(to_hwnd(window), &mut buf) };
    if len <= 0 {
        return None;
    }
    Some(String::from_utf16_lossy(&buf[..(len as usize).min(buf.len())]))
}

/// Accepts windows of the system popup menu class.
#[derive(Debug, Default, Clone, Copy)]
pub struct PopupMenuClassifier;

impl MenuClassifier for PopupMenuClassifier {
    fn is_themed_popup_menu(&self, window: WindowHandle) -> bool {
        window_class_name(window).is_some_and(|class| class == POPUP_MENU_CLASS)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NativeWindowValidator;

impl WindowValidator for NativeWindowValidator {
    fn is_window(&self, window: WindowHandle) -> bool {
        unsafe { IsWindow(Some(to_hwnd(window))) }.as_bool()
    }
}

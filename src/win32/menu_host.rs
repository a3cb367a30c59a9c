/*
 * Native `MenuHost` used by the subclass procedure. Each method maps to one
 * Win32 call; failures come back as `None`/`false` and the interceptor
 * falls back to pass-through.
 */

use super::{to_hmenu, to_hwnd};
use crate::interceptor::message_router::MN_GETHMENU;
use crate::interceptor::{DrawingSurface, MenuHost};
use crate::types::{
    BarGeometry, MenuHandle, MenuItemDescriptor, Point, Rect, WindowHandle, WindowMessage,
};

use std::ffi::c_void;
use windows::Win32::Foundation::{HWND, LPARAM, POINT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    BLACK_BRUSH, FillRect, GetClipBox, GetStockObject, GetWindowDC, HBRUSH, HDC, HRGN, ReleaseDC,
    RestoreDC, SaveDC, SelectClipRgn, SetViewportOrgEx,
};
use windows::Win32::UI::Shell::DefSubclassProc;
use windows::Win32::UI::WindowsAndMessaging::{
    GetMenuBarInfo, GetMenuItemInfoW, MENUBARINFO, MENUITEMINFOW, MFS_DISABLED, MFT_SEPARATOR,
    MIIM_FTYPE, MIIM_STATE, MIIM_SUBMENU, OBJECT_IDENTIFIER, SPI_GETSELECTIONFADE,
    SPI_SETSELECTIONFADE, SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS, SendMessageW,
    SystemParametersInfoW,
};
use windows::core::BOOL;

/// Win32 `OBJID_CLIENT`: the bar query addresses the popup's own items.
const OBJID_CLIENT: i32 = -4;

fn rect_from_native(rect: RECT) -> Rect {
    Rect {
        left: rect.left,
        top: rect.top,
        right: rect.right,
        bottom: rect.bottom,
    }
}

fn rect_to_native(rect: &Rect) -> RECT {
    RECT {
        left: rect.left,
        top: rect.top,
        right: rect.right,
        bottom: rect.bottom,
    }
}

/// A device context; window DCs acquired by `window_surface` are released on drop.
#[derive(Debug)]
pub struct GdiSurface {
    hdc: HDC,
    owner: Option<HWND>,
}

impl DrawingSurface for GdiSurface {
    fn save_state(&mut self) -> Option<i32> {
        let saved = unsafe { SaveDC(self.hdc) };
        (saved != 0).then_some(saved)
    }

    fn restore_state(&mut self, saved: i32) {
        let _ = unsafe { RestoreDC(self.hdc, saved) };
    }

    fn select_clip_region(&mut self, region: usize) {
        let _ = unsafe { SelectClipRgn(self.hdc, Some(HRGN(region as *mut c_void))) };
    }

    fn clip_box(&self) -> Option<Rect> {
        let mut rect = RECT::default();
        let kind = unsafe { GetClipBox(self.hdc, &mut rect) };
        // RGN_ERROR
        (kind.0 != 0).then(|| rect_from_native(rect))
    }

    fn fill_placeholder(&mut self, area: &Rect) {
        unsafe {
            let brush = HBRUSH(GetStockObject(BLACK_BRUSH).0);
            FillRect(self.hdc, &rect_to_native(area), brush);
        }
    }

    fn set_viewport_origin(&mut self, origin: Point) -> Option<Point> {
        let mut previous = POINT::default();
        let ok = unsafe { SetViewportOrgEx(self.hdc, origin.x, origin.y, Some(&mut previous)) };
        ok.as_bool().then_some(Point {
            x: previous.x,
            y: previous.y,
        })
    }
}

impl Drop for GdiSurface {
    fn drop(&mut self) {
        if let Some(owner) = self.owner {
            unsafe {
                ReleaseDC(Some(owner), self.hdc);
            }
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Win32MenuHost;

impl MenuHost for Win32MenuHost {
    type Surface = GdiSurface;

    fn forward_default(&self, window: WindowHandle, message: WindowMessage) -> isize {
        unsafe {
            DefSubclassProc(
                to_hwnd(window),
                message.opcode,
                WPARAM(message.wparam),
                LPARAM(message.lparam),
            )
        }
        .0
    }

    fn target_surface(&self, raw_dc: usize) -> Option<GdiSurface> {
        (raw_dc != 0).then(|| GdiSurface {
            hdc: HDC(raw_dc as *mut c_void),
            owner: None,
        })
    }

    fn window_surface(&self, window: WindowHandle) -> Option<GdiSurface> {
        let hwnd = to_hwnd(window);
        let hdc = unsafe { GetWindowDC(Some(hwnd)) };
        if hdc.is_invalid() {
            return None;
        }
        Some(GdiSurface {
            hdc,
            owner: Some(hwnd),
        })
    }

    fn selection_fade_enabled(&self) -> Option<bool> {
        let mut enabled = BOOL(0);
        unsafe {
            SystemParametersInfoW(
                SPI_GETSELECTIONFADE,
                0,
                Some(&mut enabled as *mut BOOL as *mut c_void),
                SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
            )
        }
        .ok()
        .map(|_| enabled.as_bool())
    }

    fn set_selection_fade(&self, enabled: bool) -> bool {
        // The new value travels in the pointer argument itself.
        unsafe {
            SystemParametersInfoW(
                SPI_SETSELECTIONFADE,
                0,
                Some(enabled as usize as *mut c_void),
                SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
            )
        }
        .is_ok()
    }

    fn menu_of(&self, window: WindowHandle) -> Option<MenuHandle> {
        let raw = unsafe { SendMessageW(to_hwnd(window), MN_GETHMENU, None, None) }.0;
        (raw != 0).then_some(MenuHandle(raw))
    }

    fn menu_item(&self, menu: MenuHandle, index: u32) -> Option<MenuItemDescriptor> {
        let mut mii = MENUITEMINFOW {
            cbSize: std::mem::size_of::<MENUITEMINFOW>() as u32,
            fMask: MIIM_SUBMENU | MIIM_STATE | MIIM_FTYPE,
            ..Default::default()
        };
        unsafe { GetMenuItemInfoW(to_hmenu(menu), index, true, &mut mii) }.ok()?;
        Some(MenuItemDescriptor {
            is_separator: (mii.fType.0 & MFT_SEPARATOR.0) != 0,
            is_disabled: (mii.fState.0 & MFS_DISABLED.0) != 0,
            has_submenu: !mii.hSubMenu.0.is_null(),
        })
    }

    fn menu_bar_geometry(&self, window: WindowHandle, position: i32) -> Option<BarGeometry> {
        let mut info = MENUBARINFO {
            cbSize: std::mem::size_of::<MENUBARINFO>() as u32,
            ..Default::default()
        };
        unsafe {
            GetMenuBarInfo(
                to_hwnd(window),
                OBJECT_IDENTIFIER(OBJID_CLIENT),
                position,
                &mut info,
            )
        }
        .ok()?;
        Some(BarGeometry {
            bar: rect_from_native(info.rcBar),
            menu: MenuHandle(info.hMenu.0 as isize),
            menu_window: super::from_hwnd(info.hwndMenu),
            bar_focused: (info._bitfield & 0x1) != 0,
            item_focused: (info._bitfield & 0x2) != 0,
        })
    }
}

/*
 * Window subclass that routes popup menu messages through the shared
 * `MessageInterceptor`. Each installed window holds one strong reference
 * to the interceptor in its subclass reference data; the reference is
 * released and the subclass removed when the window sees `WM_NCDESTROY`.
 */

use super::menu_host::Win32MenuHost;
use super::{from_hwnd, to_hwnd};
use crate::interceptor::MessageInterceptor;
use crate::types::{InterceptorInstaller, MessageOutcome, WindowHandle, WindowMessage};

use std::sync::Arc;
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::Shell::{DefSubclassProc, RemoveWindowSubclass, SetWindowSubclass};
use windows::Win32::UI::WindowsAndMessaging::WM_NCDESTROY;

const MENU_SUBCLASS_ID: usize = 0x4D43_4852; // "MCHR"

pub struct SubclassInstaller {
    interceptor: Arc<MessageInterceptor>,
}

impl SubclassInstaller {
    pub fn new(interceptor: Arc<MessageInterceptor>) -> Self {
        Self { interceptor }
    }
}

impl InterceptorInstaller for SubclassInstaller {
    fn install(&self, window: WindowHandle) -> bool {
        let ref_data = Arc::into_raw(self.interceptor.clone()) as usize;
        let ok = unsafe {
            SetWindowSubclass(
                to_hwnd(window),
                Some(menu_subclass_proc),
                MENU_SUBCLASS_ID,
                ref_data,
            )
        }
        .as_bool();
        if !ok {
            drop(unsafe { Arc::from_raw(ref_data as *const MessageInterceptor) });
        }
        ok
    }
}

unsafe extern "system" fn menu_subclass_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
    _id_subclass: usize,
    ref_data: usize,
) -> LRESULT {
    if msg == WM_NCDESTROY {
        unsafe {
            let _ = RemoveWindowSubclass(hwnd, Some(menu_subclass_proc), MENU_SUBCLASS_ID);
            if ref_data != 0 {
                drop(Arc::from_raw(ref_data as *const MessageInterceptor));
            }
            return DefSubclassProc(hwnd, msg, wparam, lparam);
        }
    }

    if ref_data == 0 {
        return unsafe { DefSubclassProc(hwnd, msg, wparam, lparam) };
    }

    let interceptor = unsafe { &*(ref_data as *const MessageInterceptor) };
    let message = WindowMessage::new(msg, wparam.0, lparam.0);
    match interceptor.on_message(&Win32MenuHost, from_hwnd(hwnd), message) {
        MessageOutcome::Handled(result) => LRESULT(result),
        MessageOutcome::PassThrough => unsafe { DefSubclassProc(hwnd, msg, wparam, lparam) },
    }
}

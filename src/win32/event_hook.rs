/*
 * Process-wide WinEvent hook feeding the per-thread `LifecycleHook`s.
 *
 * The hook is registered in-context for the current process, so every
 * callback runs synchronously on the thread that created, showed or
 * destroyed the window. Each such thread lazily builds its own
 * `LifecycleHook` from the shared services; the primary-menu slot is
 * therefore scoped to the thread that owns the cascade.
 */

use super::from_hwnd;
use crate::error::{ChromeError, Result};
use crate::lifecycle_hook::{
    EVENT_OBJECT_CREATE, EVENT_OBJECT_SHOW, HookServices, ThreadHookSlot,
    lifecycle_kind_from_event,
};
use crate::types::{LifecycleEventKind, WindowHandle};

use std::cell::RefCell;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use windows::Win32::Foundation::{HMODULE, HWND};
use windows::Win32::System::LibraryLoader::GetModuleHandleExW;
use windows::Win32::System::Threading::GetCurrentProcessId;
use windows::Win32::UI::Accessibility::{HWINEVENTHOOK, SetWinEventHook, UnhookWinEvent};
use windows::core::PCWSTR;

const WINEVENT_INCONTEXT: u32 = 0x0004;
const GET_MODULE_HANDLE_EX_FLAG_UNCHANGED_REFCOUNT: u32 = 0x0002;
const GET_MODULE_HANDLE_EX_FLAG_FROM_ADDRESS: u32 = 0x0004;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

// Generation of the active registration, 0 when none. Read on every event;
// the services mutex is only touched when a thread's hook is stale.
static ACTIVE_GENERATION: AtomicU64 = AtomicU64::new(0);

// Services of the active registration, tagged with its generation.
static ACTIVE_SERVICES: Mutex<Option<(u64, HookServices)>> = Mutex::new(None);

thread_local! {
    static THREAD_HOOK: RefCell<ThreadHookSlot> = const { RefCell::new(ThreadHookSlot::new()) };
}

/// Keeps the WinEvent hook alive; unhooks when dropped.
#[derive(Debug)]
pub struct MenuHookRegistration {
    hook: HWINEVENTHOOK,
    generation: u64,
}

impl Drop for MenuHookRegistration {
    fn drop(&mut self) {
        let ok = unsafe { UnhookWinEvent(self.hook) }.as_bool();
        if !ok {
            log::warn!("[Win32] UnhookWinEvent failed for generation {}.", self.generation);
        }
        let mut active = ACTIVE_SERVICES
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if matches!(active.as_ref(), Some((generation, _)) if *generation == self.generation) {
            *active = None;
            let _ = ACTIVE_GENERATION.compare_exchange(
                self.generation,
                0,
                Ordering::AcqRel,
                Ordering::Acquire,
            );
        }
        THREAD_HOOK.with(|slot| {
            if let Ok(mut slot) = slot.try_borrow_mut() {
                slot.clear();
            }
        });
        log::debug!("[Win32] Menu lifecycle hook removed.");
    }
}

fn current_module() -> Result<HMODULE> {
    let mut module = HMODULE::default();
    unsafe {
        GetModuleHandleExW(
            GET_MODULE_HANDLE_EX_FLAG_FROM_ADDRESS | GET_MODULE_HANDLE_EX_FLAG_UNCHANGED_REFCOUNT,
            PCWSTR(menu_win_event_proc as *const () as *const u16),
            &mut module,
        )
    }
    .map_err(|err| ChromeError::HookInstallFailed(format!("module lookup failed: {err:?}")))?;
    Ok(module)
}

pub fn install_menu_hook(services: HookServices) -> Result<MenuHookRegistration> {
    let mut active = ACTIVE_SERVICES
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if active.is_some() {
        return Err(ChromeError::AlreadyInstalled);
    }

    let module = current_module()?;
    let hook = unsafe {
        SetWinEventHook(
            EVENT_OBJECT_CREATE,
            EVENT_OBJECT_SHOW,
            Some(module),
            Some(menu_win_event_proc),
            GetCurrentProcessId(),
            0,
            WINEVENT_INCONTEXT,
        )
    };
    if hook.is_invalid() {
        return Err(ChromeError::HookInstallFailed(
            "SetWinEventHook returned a null handle".to_string(),
        ));
    }

    let generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);
    *active = Some((generation, services));
    ACTIVE_GENERATION.store(generation, Ordering::Release);
    log::debug!("[Win32] Menu lifecycle hook installed (generation {generation}).");
    Ok(MenuHookRegistration { hook, generation })
}

unsafe extern "system" fn menu_win_event_proc(
    _hook: HWINEVENTHOOK,
    event: u32,
    hwnd: HWND,
    _id_object: i32,
    _id_child: i32,
    _event_thread: u32,
    _event_time: u32,
) {
    if let Some(kind) = lifecycle_kind_from_event(event) {
        dispatch_lifecycle_event(kind, from_hwnd(hwnd));
    }
}

fn active_services() -> Option<(u64, HookServices)> {
    ACTIVE_SERVICES
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

fn dispatch_lifecycle_event(kind: LifecycleEventKind, window: WindowHandle) {
    THREAD_HOOK.with(|slot| {
        // A collaborator may create windows while we are handling an event.
        let Ok(mut slot) = slot.try_borrow_mut() else {
            log::trace!("[Win32] Dropping reentrant {kind:?} event for {window:?}.");
            return;
        };

        let active = ACTIVE_GENERATION.load(Ordering::Acquire);
        slot.dispatch(active, active_services, kind, window);
    });
}

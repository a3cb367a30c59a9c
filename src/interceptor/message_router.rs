use log::trace;

pub const WM_NCPAINT: u32 = 0x0085;
pub const WM_PRINT: u32 = 0x0317;
pub const WM_PRINTCLIENT: u32 = 0x0318;
/// Private popup-menu message: returns the menu handle of the window.
pub const MN_GETHMENU: u32 = 0x01E1;
/// Private popup-menu message sent when an item is released with the pointer.
pub const MN_BUTTONUP: u32 = 0x01EF;

/// `WM_NCPAINT` wparam values that do not carry a usable region.
pub const REGION_ERROR: usize = 0;
pub const REGION_NULL: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRoute {
    PrintWindow,
    NonClientPaint,
    ItemReleased,
    PassThrough,
}

pub fn resolve_message_route(opcode: u32, legacy_redraw: bool) -> MessageRoute {
    match (opcode, legacy_redraw) {
        (WM_PRINT, true) => MessageRoute::PrintWindow,
        (WM_NCPAINT, true) => MessageRoute::NonClientPaint,
        (MN_BUTTONUP, _) => MessageRoute::ItemReleased,
        (WM_PRINT | WM_NCPAINT, false) => {
            trace!("[Interceptor] Legacy redraw disabled; passing {opcode:#06x} through");
            MessageRoute::PassThrough
        }
        _ => MessageRoute::PassThrough,
    }
}

/// Extracts the update region from a `WM_NCPAINT` wparam.
pub fn update_region(wparam: usize) -> Option<usize> {
    match wparam {
        REGION_ERROR | REGION_NULL => None,
        region => Some(region),
    }
}

use std::ffi::c_void;
use std::sync::Arc;

use cornice_core::WindowContext;
use windows::Win32::Foundation::{HANDLE, HWND, LPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumChildWindows, GWLP_WNDPROC, GetPropW, GetWindowLongPtrW, RemovePropW, SWP_FRAMECHANGED,
    SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER, SetPropW, SetWindowLongPtrW, SetWindowPos, WNDPROC,
};
use windows::core::{BOOL, PCWSTR, w};

use crate::backend::registry;
use crate::proc::delegate_window_procedure;

/// Window property holding the pre-adaptation window procedure.
///
/// Doubles as the "already attached" marker: a window carrying this
/// property is never wrapped twice.
fn prop_key() -> PCWSTR {
    w!("cornice-original-wndproc")
}

/// Reads back the original procedure stored on a window.
pub(crate) fn original_proc(hwnd: HWND) -> WNDPROC {
    // SAFETY: GetPropW reads a property we own; absent yields null.
    let raw = unsafe { GetPropW(hwnd, prop_key()) };

    // SAFETY: the property was written from a window procedure pointer
    // in attach_to_window; null transmutes to None.
    unsafe { std::mem::transmute::<*mut c_void, WNDPROC>(raw.0) }
}

/// Drops the stored procedure property during window destruction.
pub(crate) fn remove_original_proc(hwnd: HWND) {
    // SAFETY: RemovePropW on a property we own.
    unsafe {
        let _ = RemovePropW(hwnd, prop_key());
    }
}

/// Installs the subclass over `root` and its entire hierarchy.
///
/// Also pokes the window with a frame-changed `SetWindowPos` so the
/// non-client recalculation runs against the new procedure.
pub(crate) fn attach_hierarchy(root: HWND, context: &Arc<WindowContext>) {
    attach_to_window(root, context);

    // SAFETY: SetWindowPos with no move/size/z-order change only
    // triggers WM_NCCALCSIZE.
    unsafe {
        if let Err(err) = SetWindowPos(
            root,
            None,
            0,
            0,
            0,
            0,
            SWP_FRAMECHANGED | SWP_NOMOVE | SWP_NOSIZE | SWP_NOZORDER,
        ) {
            cornice_core::log_warn!("frame-changed poke on 0x{:X} failed: {err}", root.0 as usize);
        }
    }
}

/// Subclasses one window, then recurses over its current children.
fn attach_to_window(hwnd: HWND, context: &Arc<WindowContext>) {
    // SAFETY: GetPropW is a read-only query.
    if !unsafe { GetPropW(hwnd, prop_key()) }.0.is_null() {
        return;
    }

    let bound = registry().bind(hwnd.0 as usize, context);

    // SAFETY: we stash the current procedure before replacing it, so
    // the subclass can always delegate. The property write and the
    // procedure swap both target a window on the calling thread.
    unsafe {
        let previous = GetWindowLongPtrW(hwnd, GWLP_WNDPROC);
        if let Err(err) = SetPropW(hwnd, prop_key(), Some(HANDLE(previous as *mut c_void))) {
            // Without the stored procedure the subclass cannot
            // delegate, so leave this window untouched.
            cornice_core::log_warn!("storing wndproc on 0x{:X} failed: {err}", hwnd.0 as usize);
            if bound {
                registry().unregister(hwnd.0 as usize);
            }
            return;
        }
        SetWindowLongPtrW(
            hwnd,
            GWLP_WNDPROC,
            delegate_window_procedure as usize as isize,
        );
    }

    // Child enumeration is best-effort; whatever was reached so far
    // stays attached.
    // SAFETY: the callback only runs during this call, and the context
    // reference passed through LPARAM outlives it.
    unsafe {
        let _ = EnumChildWindows(
            Some(hwnd),
            Some(attach_callback),
            LPARAM(context as *const Arc<WindowContext> as isize),
        );
    }
}

/// Callback invoked by `EnumChildWindows` for each child window.
unsafe extern "system" fn attach_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam is the &Arc<WindowContext> passed by
    // attach_to_window, valid for the duration of the enumeration.
    let context = unsafe { &*(lparam.0 as *const Arc<WindowContext>) };

    attach_to_window(hwnd, context);

    BOOL(1) // TRUE — continue enumerating
}

use cornice_core::{CompatResult, ControlKind, FrameKind, WindowHandle};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{Atom, PropMode, Window};
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;

use crate::SUPPORTED_CONTROLS;
use crate::atoms::MWM_HINTS_DECORATIONS;
use crate::hierarchy;
use crate::pump::EventPump;

/// The X11 rendition of the borderless window engine.
pub struct X11Backend;

impl X11Backend {
    /// One-time process setup: connects the intercepting event pump.
    pub fn install() {
        EventPump::install();
    }

    /// Adapts `handle` and its whole hierarchy to borderless chrome.
    ///
    /// Window-manager decorations are switched off through Motif hints;
    /// move/resize/snap stay native because the interceptor re-requests
    /// them from the window manager. Idempotent: a handle that already
    /// has a context keeps it, and re-applying the hints changes
    /// nothing.
    pub fn set_window_borderless(handle: WindowHandle) {
        let pump = EventPump::install();
        let conn = pump.connection();

        if let Err(err) = remove_decorations(conn, pump.atoms()._MOTIF_WM_HINTS, handle) {
            cornice_core::log_warn!("removing decorations on 0x{handle:X} failed: {err}");
        }

        let context = hierarchy::register(conn, pump.registry(), handle);
        cornice_core::log_debug!("window 0x{:X} is now borderless", context.root());
    }

    /// Updates one frame parameter; no-op for unknown handles.
    pub fn set_window_frame_size(handle: WindowHandle, frame: FrameKind, size: i32) {
        let Some(pump) = EventPump::instance() else {
            return;
        };
        let Some(context) = pump.registry().lookup(handle) else {
            return;
        };
        context.set_frame_size(frame, size);
    }

    /// Updates one control rectangle; no-op for unknown handles and for
    /// control kinds this backend does not recognize.
    pub fn set_window_control_position(
        handle: WindowHandle,
        control: ControlKind,
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
    ) {
        if !SUPPORTED_CONTROLS.contains(&control) {
            cornice_core::log_debug!("control {control:?} is not supported on X11");
            return;
        }
        let Some(pump) = EventPump::instance() else {
            return;
        };
        let Some(context) = pump.registry().lookup(handle) else {
            return;
        };
        context.set_control_position(control, left, top, right, bottom);
    }
}

/// Clears the decorations field of `_MOTIF_WM_HINTS` on the window.
fn remove_decorations(
    conn: &RustConnection,
    hints_atom: Atom,
    handle: WindowHandle,
) -> CompatResult<()> {
    // flags = decorations-valid, decorations = none; the remaining
    // fields (functions, input mode, status) stay untouched at zero.
    let hints = [MWM_HINTS_DECORATIONS, 0, 0, 0, 0];

    conn.change_property32(
        PropMode::REPLACE,
        handle as Window,
        hints_atom,
        hints_atom,
        &hints,
    )?;
    conn.flush()?;
    Ok(())
}

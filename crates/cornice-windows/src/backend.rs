use std::sync::OnceLock;

use cornice_core::{ControlKind, FrameKind, WindowHandle, WindowRegistry};
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{GWL_STYLE, SetWindowLongW, WS_OVERLAPPEDWINDOW};

use crate::{SUPPORTED_CONTROLS, attach, frame};

static REGISTRY: OnceLock<WindowRegistry> = OnceLock::new();

/// The process-wide handle-to-context registry.
pub(crate) fn registry() -> &'static WindowRegistry {
    REGISTRY.get_or_init(WindowRegistry::new)
}

/// The Win32 rendition of the borderless window engine.
pub struct Win32Backend;

impl Win32Backend {
    /// One-time process setup: DPI awareness and the shared registry.
    pub fn install() {
        frame::enable_dpi_awareness();
        let _ = registry();
    }

    /// Adapts `handle` and its whole hierarchy to borderless chrome.
    ///
    /// Safe to call again on the same window: the context is reused,
    /// and a root already carrying the subclass marker is left
    /// untouched, so interception is never installed twice.
    pub fn set_window_borderless(handle: WindowHandle) {
        let hwnd = HWND(handle as *mut _);
        let (context, created) = registry().register_root(handle);

        frame::extend_frame(hwnd);

        // Keep the overlapped style so resizing, snapping, and the
        // drop shadow stay native; the caption itself stops painting
        // because WM_NCCALCSIZE hands the frame area to the client.
        //
        // SAFETY: SetWindowLongW only rewrites the style bits of a
        // window owned by this process.
        unsafe {
            SetWindowLongW(hwnd, GWL_STYLE, WS_OVERLAPPEDWINDOW.0 as i32);
        }

        attach::attach_hierarchy(hwnd, &context);

        if created {
            cornice_core::log_debug!("window 0x{handle:X} is now borderless");
        }
    }

    /// Updates one frame parameter; no-op for unknown handles.
    pub fn set_window_frame_size(handle: WindowHandle, frame: FrameKind, size: i32) {
        let Some(context) = registry().lookup(handle) else {
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
            cornice_core::log_debug!("control {control:?} is not supported on Windows");
            return;
        }
        let Some(context) = registry().lookup(handle) else {
            return;
        };
        context.set_control_position(control, left, top, right, bottom);
    }
}

use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Dwm::DwmExtendFrameIntoClientArea;
use windows::Win32::UI::Controls::MARGINS;
use windows::Win32::UI::HiDpi::{
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, GetDpiForWindow, GetSystemMetricsForDpi,
    SetProcessDpiAwarenessContext,
};
use windows::Win32::UI::WindowsAndMessaging::{IsZoomed, SM_CXPADDEDBORDER};

/// Declares this process as per-monitor DPI aware (V2).
///
/// [`caption_padding`] asks for the padded-border metric at the
/// window's own DPI; without per-monitor awareness Windows rescales
/// that answer (and every tracked bounds rectangle) against the
/// primary monitor, and the caption band drifts on mixed-DPI setups.
/// Runs once at backend installation, before any window is adapted.
pub fn enable_dpi_awareness() {
    // SAFETY: SetProcessDpiAwarenessContext is safe to call once at
    // startup. If it fails (e.g. already set via manifest), we ignore
    // the error.
    unsafe {
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
    }
}

/// Returns the extra border Windows adds above a maximized window.
///
/// A maximized borderless window is pushed past the monitor edge by the
/// padded-border metric; the tracked top edge (and `WM_NCCALCSIZE`)
/// must compensate or the caption band lands in the wrong place. The
/// metric scales with the window's DPI.
pub fn caption_padding(hwnd: HWND) -> i32 {
    // SAFETY: IsZoomed is a simple query on a window handle.
    if !unsafe { IsZoomed(hwnd) }.as_bool() {
        return 0;
    }

    // SAFETY: both calls only read metrics for a valid window handle.
    unsafe { GetSystemMetricsForDpi(SM_CXPADDEDBORDER, GetDpiForWindow(hwnd)) }
}

/// Extends the DWM frame one pixel into the client area.
///
/// This keeps the drop shadow and snap behavior alive after the window
/// style stops drawing any visible frame.
pub fn extend_frame(hwnd: HWND) {
    let margins = MARGINS {
        cxLeftWidth: 0,
        cxRightWidth: 0,
        cyTopHeight: 0,
        cyBottomHeight: 1,
    };

    // SAFETY: DwmExtendFrameIntoClientArea reads the MARGINS struct for
    // a valid window handle.
    if let Err(err) = unsafe { DwmExtendFrameIntoClientArea(hwnd, &margins) } {
        cornice_core::log_warn!("DWM frame extension failed: {err}");
    }
}

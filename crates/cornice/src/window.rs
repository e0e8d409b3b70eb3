use std::sync::Once;

use cornice_core::{ControlKind, FrameKind, WindowHandle};

/// The borderless window engine, seen from the caller's side.
///
/// Exactly one implementation is compiled per target; the hit-testing
/// and registry machinery behind it is shared.
pub trait BorderlessWindowBackend {
    /// One-time process setup. Runs before any window is adapted.
    fn install(&self);

    /// Adapts a window (and its hierarchy) to borderless chrome.
    fn set_window_borderless(&self, handle: WindowHandle);

    /// Updates a frame parameter; no-op for unadapted windows.
    fn set_window_frame_size(&self, handle: WindowHandle, frame: FrameKind, size: i32);

    /// Updates a control rectangle; no-op for unadapted windows and
    /// unsupported control kinds.
    fn set_window_control_position(
        &self,
        handle: WindowHandle,
        control: ControlKind,
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
    );

    /// The control kinds this backend recognizes.
    fn supported_controls(&self) -> &'static [ControlKind];
}

#[cfg(windows)]
pub use cornice_windows::Win32Backend as PlatformBackend;

#[cfg(target_os = "linux")]
pub use cornice_x11::X11Backend as PlatformBackend;

#[cfg(windows)]
impl BorderlessWindowBackend for PlatformBackend {
    fn install(&self) {
        PlatformBackend::install();
    }

    fn set_window_borderless(&self, handle: WindowHandle) {
        PlatformBackend::set_window_borderless(handle);
    }

    fn set_window_frame_size(&self, handle: WindowHandle, frame: FrameKind, size: i32) {
        PlatformBackend::set_window_frame_size(handle, frame, size);
    }

    fn set_window_control_position(
        &self,
        handle: WindowHandle,
        control: ControlKind,
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
    ) {
        PlatformBackend::set_window_control_position(handle, control, left, top, right, bottom);
    }

    fn supported_controls(&self) -> &'static [ControlKind] {
        &cornice_windows::SUPPORTED_CONTROLS
    }
}

#[cfg(target_os = "linux")]
impl BorderlessWindowBackend for PlatformBackend {
    fn install(&self) {
        PlatformBackend::install();
    }

    fn set_window_borderless(&self, handle: WindowHandle) {
        PlatformBackend::set_window_borderless(handle);
    }

    fn set_window_frame_size(&self, handle: WindowHandle, frame: FrameKind, size: i32) {
        PlatformBackend::set_window_frame_size(handle, frame, size);
    }

    fn set_window_control_position(
        &self,
        handle: WindowHandle,
        control: ControlKind,
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
    ) {
        PlatformBackend::set_window_control_position(handle, control, left, top, right, bottom);
    }

    fn supported_controls(&self) -> &'static [ControlKind] {
        &cornice_x11::SUPPORTED_CONTROLS
    }
}

static INIT: Once = Once::new();

/// One-time process-wide initialization.
///
/// Loads the config file, starts the logger, and installs the compiled
/// backend's event interception primitive. Runs at most once; the
/// adaptation entry points call it themselves, so explicit use is only
/// needed to control *when* the cost is paid.
pub fn init() {
    INIT.call_once(|| {
        let config = cornice_core::config::load();
        cornice_core::log::init(&config.log);

        PlatformBackend.install();
        cornice_core::log_info!("backend installed");
    });
}

/// Strips the OS chrome from `handle` while keeping native move,
/// resize, and snap behavior. Idempotent per window.
pub fn set_window_borderless(handle: WindowHandle) {
    init();
    PlatformBackend.set_window_borderless(handle);
}

/// Updates one frame parameter on an adapted window.
///
/// Silently does nothing if `handle` was never adapted or is already
/// destroyed; a window may go away between the caller's intent and
/// this call arriving.
pub fn set_window_frame_size(handle: WindowHandle, frame: FrameKind, size: i32) {
    PlatformBackend.set_window_frame_size(handle, frame, size);
}

/// Updates one control rectangle on an adapted window.
///
/// Same no-op semantics as [`set_window_frame_size`]. Coordinates are
/// client-relative and trusted as-is.
pub fn set_window_control_position(
    handle: WindowHandle,
    control: ControlKind,
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
) {
    PlatformBackend.set_window_control_position(handle, control, left, top, right, bottom);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_supports_close() {
        // Every backend must cover the one control all callers draw.
        assert!(
            PlatformBackend
                .supported_controls()
                .contains(&ControlKind::Close)
        );
    }

    #[test]
    fn updates_on_unadapted_windows_are_no_ops() {
        // Nothing was adapted, so these must fall through silently
        // without touching the windowing system.
        set_window_frame_size(0xdead, FrameKind::TitleBar, 32);
        set_window_control_position(0xdead, ControlKind::Close, 0, 0, 10, 10);
    }
}

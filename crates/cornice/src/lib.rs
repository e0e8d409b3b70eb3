//! Native desktop-integration shim for managed-runtime applications.
//!
//! The host runtime creates its windows normally; this crate adapts
//! them after the fact. [`window::set_window_borderless`] strips the
//! OS-drawn chrome from a window while keeping native move, resize, and
//! snap behavior, driven by caption and control regions the caller
//! describes through [`window::set_window_frame_size`] and
//! [`window::set_window_control_position`].
//!
//! Alongside the window engine, the crate carries the smaller
//! capabilities the runtime lacks: spawning children with redirected
//! stdio ([`process`]), dark-mode detection ([`theme`]), and native
//! file dialogs ([`shell`]).

#[cfg(not(any(windows, target_os = "linux")))]
compile_error!("cornice supports exactly two windowing backends: Win32 and X11");

/// Child-process spawning with redirected standard streams.
pub mod process;

/// Native file dialogs and default-application launching.
pub mod shell;

/// System theme detection and change monitoring.
pub mod theme;

/// Borderless-window adaptation.
pub mod window;

pub use cornice_core::{CompatResult, ControlKind, FrameKind, PickerFilter, WindowHandle};
pub use window::{
    BorderlessWindowBackend, init, set_window_borderless, set_window_control_position,
    set_window_frame_size,
};

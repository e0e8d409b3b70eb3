//! Win32 backend: borderless-window adaptation by wndproc subclassing.
//!
//! Each window in a borderless hierarchy gets its message procedure
//! replaced with [`proc::delegate_window_procedure`], which answers
//! hit-test queries from the shared context and forwards everything it
//! does not recognize to the procedure that was there before.

#![cfg(windows)]

/// Recursive subclass installation over a window hierarchy.
pub mod attach;

/// Backend entry points (borderless application, setters).
pub mod backend;

/// Native file-open dialog.
pub mod dialog;

/// Frame metrics: DPI awareness, DWM extension, caption padding.
pub mod frame;

/// The subclass window procedure.
pub mod proc;

pub use backend::Win32Backend;

use cornice_core::ControlKind;

/// Control kinds this backend recognizes; the rest are ignored.
pub const SUPPORTED_CONTROLS: [ControlKind; 3] = [
    ControlKind::Minimize,
    ControlKind::Maximize,
    ControlKind::Close,
];

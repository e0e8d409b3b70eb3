//! X11 backend: borderless-window adaptation over an x11rb connection.
//!
//! The host toolkit owns its windows; this crate owns a process-wide
//! [`pump::EventPump`] the toolkit drains X events through. Chrome
//! events (caption drags, the window menu, destroy cleanup) are consumed
//! or rewritten there; everything else flows back to the toolkit
//! untouched.

#![cfg(target_os = "linux")]

/// Interned atoms used by the interceptor.
pub mod atoms;

/// Backend entry points (borderless application, setters).
pub mod backend;

/// XDG portal file-open dialog.
pub mod dialog;

/// Recursive child-hierarchy registration.
pub mod hierarchy;

/// The intercepting event pump.
pub mod pump;

pub use backend::X11Backend;
pub use pump::EventPump;

use cornice_core::ControlKind;

/// Control kinds this backend recognizes; the rest are ignored.
pub const SUPPORTED_CONTROLS: [ControlKind; 2] = [ControlKind::Close, ControlKind::Back];

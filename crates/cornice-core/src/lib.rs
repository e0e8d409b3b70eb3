/// Configuration file loading.
pub mod config;

/// Shared window context for a borderless hierarchy.
pub mod context;

/// Error alias used across the workspace.
pub mod error;

/// Hit-testing of points against a window context.
pub mod hittest;

/// Frame, control, and hit-region enumerations.
pub mod kinds;

/// File-based logger with rotation.
pub mod log;

/// File-dialog filter type shared by all backends.
pub mod picker;

/// Rectangle type shared by all backends.
pub mod rect;

/// Handle-to-context registry.
pub mod registry;

pub use context::{ContextState, WindowContext};
pub use error::CompatResult;
pub use hittest::classify;
pub use kinds::{ControlKind, FrameKind, HitRegion, ResizeEdge};
pub use picker::PickerFilter;
pub use rect::Rect;
pub use registry::{WindowHandle, WindowRegistry};

use std::sync::Mutex;

use crate::hittest;
use crate::kinds::{ControlKind, FrameKind, HitRegion};
use crate::rect::Rect;
use crate::registry::WindowHandle;

/// Mutable layout state shared by a borderless window hierarchy.
///
/// All fields start at zero. Frame sizes and control rectangles are only
/// ever written through the public adaptation API; bounds are written by
/// the event interceptor as the root window moves and resizes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextState {
    bounds: Rect,
    frame_sizes: [i32; FrameKind::COUNT],
    controls: [Rect; ControlKind::COUNT],
}

impl ContextState {
    /// Last known screen-space rectangle of the root window.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Current value of a named frame parameter.
    pub fn frame_size(&self, frame: FrameKind) -> i32 {
        self.frame_sizes[frame.index()]
    }

    /// Current rectangle of a named control region.
    pub fn control(&self, control: ControlKind) -> Rect {
        self.controls[control.index()]
    }
}

/// Per-root-window state shared by every member of its hierarchy.
///
/// One context exists per root window made borderless. Descendant windows
/// hold the same `Arc<WindowContext>` through the registry, so a layout
/// update made through any handle is visible to the whole hierarchy.
///
/// The inner mutex guards only field reads and writes. It is never held
/// across an OS call, and callers must release the registry lock before
/// taking it.
#[derive(Debug)]
pub struct WindowContext {
    root: WindowHandle,
    state: Mutex<ContextState>,
}

impl WindowContext {
    pub fn new(root: WindowHandle) -> Self {
        Self {
            root,
            state: Mutex::new(ContextState::default()),
        }
    }

    /// The window that owns system-level chrome semantics.
    pub fn root(&self) -> WindowHandle {
        self.root
    }

    /// Returns whether `handle` is the hierarchy root.
    pub fn is_root(&self, handle: WindowHandle) -> bool {
        self.root == handle
    }

    /// Records the root window's new screen-space bounds.
    pub fn update_bounds(&self, bounds: Rect) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        state.bounds = bounds;
    }

    /// Updates one named frame parameter.
    pub fn set_frame_size(&self, frame: FrameKind, size: i32) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        state.frame_sizes[frame.index()] = size;
    }

    /// Updates one named control rectangle from client-space edges.
    ///
    /// Coordinates are trusted as-is; callers own their ordering.
    pub fn set_control_position(
        &self,
        control: ControlKind,
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
    ) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        state.controls[control.index()] = Rect::from_edges(left, top, right, bottom);
    }

    /// Copies out the current state for lock-free inspection.
    pub fn snapshot(&self) -> ContextState {
        match self.state.lock() {
            Ok(state) => *state,
            Err(_) => ContextState::default(),
        }
    }

    /// Hit-tests a window-relative point against the current state.
    pub fn classify(&self, x: i32, y: i32) -> HitRegion {
        let Ok(state) = self.state.lock() else {
            return HitRegion::Client;
        };
        hittest::classify(&state, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_has_zeroed_state() {
        let ctx = WindowContext::new(0x1000);
        let state = ctx.snapshot();

        assert_eq!(ctx.root(), 0x1000);
        assert_eq!(state.bounds(), Rect::default());
        assert_eq!(state.frame_size(FrameKind::EdgeInset), 0);
        assert_eq!(state.control(ControlKind::Close), Rect::default());
    }

    #[test]
    fn updates_are_visible_in_snapshot() {
        let ctx = WindowContext::new(0x1000);

        ctx.update_bounds(Rect::new(100, 50, 800, 600));
        ctx.set_frame_size(FrameKind::TitleBar, 32);
        ctx.set_control_position(ControlKind::Close, 770, 0, 800, 32);

        let state = ctx.snapshot();
        assert_eq!(state.bounds(), Rect::new(100, 50, 800, 600));
        assert_eq!(state.frame_size(FrameKind::TitleBar), 32);
        assert_eq!(state.control(ControlKind::Close), Rect::from_edges(770, 0, 800, 32));
    }

    #[test]
    fn is_root_distinguishes_descendants() {
        let ctx = WindowContext::new(0x1000);

        assert!(ctx.is_root(0x1000));
        assert!(!ctx.is_root(0x2000));
    }
}

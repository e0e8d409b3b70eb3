use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::context::WindowContext;

/// An opaque platform window handle (pointer-sized integer).
///
/// `HWND` on the Win32 backend, an X window id on the X11 backend.
pub type WindowHandle = usize;

/// Process-wide mapping from window handle to shared window context.
///
/// Every member of a borderless hierarchy maps to the *same*
/// `Arc<WindowContext>`, so layout updates made through any handle are
/// visible to the whole hierarchy. Entries drain one by one as windows
/// are destroyed; the context itself is reclaimed when the last entry
/// referencing it is removed.
///
/// The map lock is held only for the duration of a map operation, never
/// while touching context state or making an OS call.
#[derive(Debug, Default)]
pub struct WindowRegistry {
    windows: Mutex<HashMap<WindowHandle, Arc<WindowContext>>>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the context for `root`, creating one if absent.
    ///
    /// The boolean is `true` when the context was created by this call,
    /// which is what makes `set_window_borderless` idempotent: a second
    /// call finds the existing context and skips re-installation.
    pub fn register_root(&self, root: WindowHandle) -> (Arc<WindowContext>, bool) {
        let Ok(mut windows) = self.windows.lock() else {
            return (Arc::new(WindowContext::new(root)), false);
        };

        if let Some(existing) = windows.get(&root) {
            return (Arc::clone(existing), false);
        }

        let context = Arc::new(WindowContext::new(root));
        windows.insert(root, Arc::clone(&context));
        (context, true)
    }

    /// Binds `handle` to `context` if it is not already registered.
    ///
    /// Returns `true` when the handle was newly bound. A handle already
    /// claimed by another hierarchy is left untouched; a descendant is
    /// never re-parented to two roots.
    pub fn bind(&self, handle: WindowHandle, context: &Arc<WindowContext>) -> bool {
        let Ok(mut windows) = self.windows.lock() else {
            return false;
        };

        if windows.contains_key(&handle) {
            return false;
        }

        windows.insert(handle, Arc::clone(context));
        true
    }

    /// Registers `root` and its full descendant hierarchy in one pass.
    ///
    /// `children_of` enumerates the direct children of a handle; it is
    /// called once per discovered window, at registration time only.
    pub fn register_hierarchy(
        &self,
        root: WindowHandle,
        children_of: impl Fn(WindowHandle) -> Vec<WindowHandle>,
    ) -> Arc<WindowContext> {
        let (context, created) = self.register_root(root);
        if !created {
            return context;
        }

        let mut pending = children_of(root);
        while let Some(handle) = pending.pop() {
            if self.bind(handle, &context) {
                pending.extend(children_of(handle));
            }
        }

        context
    }

    /// Looks up the context bound to any hierarchy member's handle.
    pub fn lookup(&self, handle: WindowHandle) -> Option<Arc<WindowContext>> {
        let Ok(windows) = self.windows.lock() else {
            return None;
        };
        windows.get(&handle).map(Arc::clone)
    }

    /// Removes the single entry for `handle` on window destruction.
    ///
    /// Destroying a root does not cascade: each descendant is
    /// unregistered by its own destroy notification.
    pub fn unregister(&self, handle: WindowHandle) -> Option<Arc<WindowContext>> {
        let Ok(mut windows) = self.windows.lock() else {
            return None;
        };
        windows.remove(&handle)
    }

    /// Number of registered handles (not contexts).
    pub fn len(&self) -> usize {
        self.windows.lock().map(|w| w.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A fixed three-level hierarchy: root 1 with children 2 and 3,
    /// where 3 has child 4.
    fn children_of(handle: WindowHandle) -> Vec<WindowHandle> {
        match handle {
            1 => vec![2, 3],
            3 => vec![4],
            _ => vec![],
        }
    }

    #[test]
    fn hierarchy_members_share_one_context() {
        let registry = WindowRegistry::new();
        let context = registry.register_hierarchy(1, children_of);

        assert_eq!(registry.len(), 4);
        for handle in [1, 2, 3, 4] {
            let found = registry.lookup(handle).unwrap();
            assert!(Arc::ptr_eq(&found, &context));
        }
    }

    #[test]
    fn registering_twice_is_idempotent() {
        let registry = WindowRegistry::new();
        let first = registry.register_hierarchy(1, children_of);
        let second = registry.register_hierarchy(1, children_of);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn register_root_reports_creation() {
        let registry = WindowRegistry::new();

        let (_, created) = registry.register_root(1);
        assert!(created);

        let (_, created) = registry.register_root(1);
        assert!(!created);
    }

    #[test]
    fn descendant_of_one_root_is_not_reparented() {
        let registry = WindowRegistry::new();
        let first = registry.register_hierarchy(1, children_of);

        // Window 4 later shows up in another root's hierarchy.
        let _ = registry.register_hierarchy(10, |handle| match handle {
            10 => vec![4, 11],
            _ => vec![],
        });

        let found = registry.lookup(4).unwrap();
        assert!(Arc::ptr_eq(&found, &first));
        assert_eq!(registry.lookup(11).unwrap().root(), 10);
    }

    #[test]
    fn unregistering_descendant_keeps_root_context() {
        let registry = WindowRegistry::new();
        let context = registry.register_hierarchy(1, children_of);

        registry.unregister(4);

        assert!(registry.lookup(4).is_none());
        assert_eq!(registry.len(), 3);
        let found = registry.lookup(1).unwrap();
        assert!(Arc::ptr_eq(&found, &context));
        assert!(registry.lookup(3).is_some());
    }

    #[test]
    fn registry_drains_entry_by_entry() {
        let registry = WindowRegistry::new();
        let _ = registry.register_hierarchy(1, children_of);

        for handle in [4, 3, 2, 1] {
            assert!(registry.unregister(handle).is_some());
        }
        assert!(registry.is_empty());
        assert!(registry.unregister(1).is_none());
    }

    #[test]
    fn lookup_of_unknown_handle_is_none() {
        let registry = WindowRegistry::new();

        assert!(registry.lookup(0xdead).is_none());
    }
}

use std::cell::RefCell;
use std::collections::HashMap;

/// Opaque platform window handle (HWND, NSWindow pointer, X11 window id...).
/// The bridge never dereferences it; it only anchors the modal dialog's
/// parent relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeWindowHandle(pub u64);

/// Identifier the host hands to scripts in place of a raw window handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(u32);

impl WindowId {
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Host-owned lookup from opaque window ids to live native handles.
///
/// A window may be registered before its native handle exists (mirroring a
/// shell window that has not finished platform initialization); resolving
/// such an entry fails the same way an unknown id does.
#[derive(Debug, Default)]
pub struct WindowRegistry {
    inner: RefCell<Table>,
}

#[derive(Debug, Default)]
struct Table {
    next_id: u32,
    windows: HashMap<u32, Option<NativeWindowHandle>>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a window that already has a live native handle.
    pub fn register(&self, handle: NativeWindowHandle) -> WindowId {
        self.insert(Some(handle))
    }

    /// Register a window whose native handle is not yet available.
    pub fn register_uninitialized(&self) -> WindowId {
        self.insert(None)
    }

    fn insert(&self, handle: Option<NativeWindowHandle>) -> WindowId {
        let mut table = self.inner.borrow_mut();
        table.next_id += 1;
        let id = table.next_id;
        table.windows.insert(id, handle);
        WindowId(id)
    }

    /// Attach the native handle once platform initialization completes.
    /// Returns false if the id was never registered.
    pub fn attach_native(&self, id: WindowId, handle: NativeWindowHandle) -> bool {
        match self.inner.borrow_mut().windows.get_mut(&id.0) {
            Some(slot) => {
                *slot = Some(handle);
                true
            }
            None => false,
        }
    }

    pub fn unregister(&self, id: WindowId) -> bool {
        self.inner.borrow_mut().windows.remove(&id.0).is_some()
    }

    /// Yields the native handle only for a registered, initialized window.
    pub fn resolve(&self, id: WindowId) -> Option<NativeWindowHandle> {
        self.inner.borrow().windows.get(&id.0).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_registered_window() {
        let registry = WindowRegistry::new();
        let id = registry.register(NativeWindowHandle(0xbeef));
        assert_eq!(registry.resolve(id), Some(NativeWindowHandle(0xbeef)));
    }

    #[test]
    fn unknown_id_does_not_resolve() {
        let registry = WindowRegistry::new();
        assert_eq!(registry.resolve(WindowId::from_raw(99)), None);
    }

    #[test]
    fn uninitialized_window_does_not_resolve_until_attached() {
        let registry = WindowRegistry::new();
        let id = registry.register_uninitialized();
        assert_eq!(registry.resolve(id), None);

        assert!(registry.attach_native(id, NativeWindowHandle(1)));
        assert_eq!(registry.resolve(id), Some(NativeWindowHandle(1)));
    }

    #[test]
    fn unregistered_window_stops_resolving() {
        let registry = WindowRegistry::new();
        let id = registry.register(NativeWindowHandle(2));
        assert!(registry.unregister(id));
        assert_eq!(registry.resolve(id), None);
        assert!(!registry.unregister(id));
    }
}

//! Reverse lookup from raw native handles to wrapper identities
//!
//! Several SDL entry points hand back raw handles for resources this
//! library already wraps: `SDL_GetWindowFromID` returns a window pointer,
//! `SDL_GetRenderer` returns the renderer attached to a window. Resolving
//! such a handle back to the wrapper that owns it needs a process-side
//! table, because the native library knows nothing about the wrapper layer.
//!
//! [`HandleRegistry`] is that table: a map from the handle's numeric value
//! to a weak reference to the owner's heap-pinned identity anchor. Weak on
//! purpose: the registry must never keep a resource alive, and a dead
//! entry must never resolve. Owners insert their entry right after the
//! native create call succeeds and erase it *before* issuing the native
//! free, since SDL may recycle the handle value for an unrelated resource
//! immediately afterwards.
//!
//! # Thread Safety
//!
//! SDL requires video, event and most joystick calls to be driven from a
//! single thread, and the wrapper layer inherits that discipline. Each
//! wrapper module keeps its registry in a `thread_local`, and the anchors
//! are `Rc`-based, so sharing a registry or a resolved identity across
//! threads is a compile error rather than a data race.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// Numeric key for a native handle.
///
/// Pointers are keyed by address; integer ids by their value.
pub type HandleKey = usize;

/// Weak reverse-lookup table keyed by native handle value
pub struct HandleRegistry<T> {
    entries: RefCell<HashMap<HandleKey, Weak<T>>>,
}

impl<T> HandleRegistry<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
        }
    }

    /// Insert or replace the entry for `key`.
    ///
    /// Replacement covers the case where a handle value is reissued for a
    /// new owner after the previous owner fully tore down.
    pub fn register(&self, key: HandleKey, owner: &Rc<T>) {
        self.entries.borrow_mut().insert(key, Rc::downgrade(owner));
    }

    /// Remove the entry for `key`. No-op if absent.
    pub fn unregister(&self, key: HandleKey) {
        self.entries.borrow_mut().remove(&key);
    }

    /// Resolve `key` to the registered owner's identity.
    ///
    /// Absence is a valid, expected outcome (the handle may belong to a
    /// resource this process never wrapped) and is reported as `None`,
    /// never as an error. An entry whose owner is gone is pruned and also
    /// reported as `None`.
    pub fn resolve(&self, key: HandleKey) -> Option<Rc<T>> {
        let mut entries = self.entries.borrow_mut();
        match entries.get(&key) {
            Some(weak) => match weak.upgrade() {
                Some(owner) => Some(owner),
                None => {
                    entries.remove(&key);
                    None
                }
            },
            None => None,
        }
    }

    /// Number of live entries (dead entries may still be counted until
    /// their next resolve).
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the registry holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl<T> Default for HandleRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Anchor {
        id: u32,
    }

    // Stand-in for a wrapper type: owns its anchor, unregisters on drop.
    struct Owner<'r> {
        registry: &'r HandleRegistry<Anchor>,
        key: HandleKey,
        anchor: Rc<Anchor>,
    }

    impl<'r> Owner<'r> {
        fn new(registry: &'r HandleRegistry<Anchor>, key: HandleKey, id: u32) -> Self {
            let anchor = Rc::new(Anchor { id });
            registry.register(key, &anchor);
            Self {
                registry,
                key,
                anchor,
            }
        }
    }

    impl Drop for Owner<'_> {
        fn drop(&mut self) {
            self.registry.unregister(self.key);
        }
    }

    #[test]
    fn register_resolve_unregister_round_trip() {
        let registry = HandleRegistry::new();
        let anchor = Rc::new(Anchor { id: 7 });
        registry.register(0x42, &anchor);
        let resolved = registry.resolve(0x42).unwrap();
        assert!(Rc::ptr_eq(&resolved, &anchor));
        assert_eq!(resolved.id, 7);
        registry.unregister(0x42);
        assert!(registry.resolve(0x42).is_none());
    }

    #[test]
    fn unregister_absent_key_is_a_no_op() {
        let registry: HandleRegistry<Anchor> = HandleRegistry::new();
        registry.unregister(0x42);
        assert!(registry.is_empty());
    }

    #[test]
    fn register_is_an_upsert() {
        let registry = HandleRegistry::new();
        let first = Rc::new(Anchor { id: 1 });
        let second = Rc::new(Anchor { id: 2 });
        registry.register(0x42, &first);
        registry.register(0x42, &second);
        assert_eq!(registry.len(), 1);
        let resolved = registry.resolve(0x42).unwrap();
        assert!(Rc::ptr_eq(&resolved, &second));
    }

    #[test]
    fn dead_entries_never_resolve() {
        let registry = HandleRegistry::new();
        {
            let anchor = Rc::new(Anchor { id: 9 });
            registry.register(0x42, &anchor);
        }
        assert!(registry.resolve(0x42).is_none());
        // The dead entry was pruned by the failed resolve.
        assert!(registry.is_empty());
    }

    #[test]
    fn moving_the_owner_keeps_the_entry_resolvable() {
        let registry = HandleRegistry::new();
        let owner = Owner::new(&registry, 0x42, 3);
        let moved = owner;
        let resolved = registry.resolve(0x42).unwrap();
        assert!(Rc::ptr_eq(&resolved, &moved.anchor));
    }

    #[test]
    fn two_lookup_paths_agree_on_the_single_owner() {
        let registry = HandleRegistry::new();
        let owner = Owner::new(&registry, 0x42, 5);
        let via_first_path = registry.resolve(0x42).unwrap();
        let via_second_path = registry.resolve(0x42).unwrap();
        assert!(Rc::ptr_eq(&via_first_path, &via_second_path));
        assert!(Rc::ptr_eq(&via_first_path, &owner.anchor));
    }

    #[test]
    fn dropped_owner_leaves_no_stale_resolution() {
        let registry = HandleRegistry::new();
        {
            let _owner = Owner::new(&registry, 0x42, 5);
            assert!(registry.resolve(0x42).is_some());
        }
        assert!(registry.resolve(0x42).is_none());
    }
}

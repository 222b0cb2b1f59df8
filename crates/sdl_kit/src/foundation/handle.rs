//! Handle ownership state machine
//!
//! Every wrapper type in this library holds exactly one native handle, a
//! raw pointer or a nonzero integer id issued by SDL. The handle is opaque:
//! the wrapper never interprets its bits, it only passes the value back to
//! the matching native free function, exactly once, when the resource is
//! torn down.
//!
//! [`HandleCell`] centralizes the bookkeeping for that contract. A cell is
//! always in one of three states:
//!
//! - `Owned(h)`: this wrapper must free `h` on teardown
//! - `Borrowed(h)`: `h` is alive but owned elsewhere (a window's backing
//!   surface, a renderer resolved from a registry lookup) and must never be
//!   freed through this wrapper
//! - `Empty`: the wrapper currently references no resource
//!
//! Modelling ownership as a tagged state rather than a separate boolean
//! makes the illegal combination "owns a handle but holds none"
//! unrepresentable.
//!
//! The cell never calls into the native library itself. Concrete wrappers
//! own their teardown directly: their `Drop` impl calls [`HandleCell::take_owned`]
//! and invokes the correct native free function on the yielded handle. A
//! borrowed or already-empty cell yields nothing, which is what makes
//! repeated destruction and observer teardown free of double-free hazards.

use std::fmt;

/// Opaque native handle value.
///
/// Implemented for raw pointers (null = no resource) and for the integer
/// id newtypes used by subsystems that hand out ids instead of pointers.
pub trait RawHandle: Copy + Eq + fmt::Debug {
    /// The "no resource" value for this handle type.
    const EMPTY: Self;

    /// Whether this value is the "no resource" value.
    fn is_empty_value(self) -> bool {
        self == Self::EMPTY
    }
}

impl<T> RawHandle for *mut T {
    const EMPTY: Self = std::ptr::null_mut();
}

/// Ownership state of a [`HandleCell`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State<H: RawHandle> {
    Empty,
    Owned(H),
    Borrowed(H),
}

/// Move-only holder of one native handle plus its ownership state
///
/// See the module documentation for the state machine. The cell is the
/// single place a wrapper stores its handle; all lifecycle transitions go
/// through [`acquire`](Self::acquire), [`release`](Self::release) and
/// [`take_owned`](Self::take_owned).
#[derive(Debug)]
pub struct HandleCell<H: RawHandle> {
    state: State<H>,
}

impl<H: RawHandle> HandleCell<H> {
    /// Create an empty cell referencing no resource.
    pub const fn empty() -> Self {
        Self {
            state: State::Empty,
        }
    }

    /// Create a cell owning `handle`.
    pub fn adopt(handle: H) -> Self {
        let mut cell = Self::empty();
        cell.acquire(handle);
        cell
    }

    /// Create a cell observing `handle` without owning it.
    ///
    /// The handle is alive but freed elsewhere; [`take_owned`](Self::take_owned)
    /// will never yield it.
    pub fn adopt_borrowed(handle: H) -> Self {
        debug_assert!(!handle.is_empty_value());
        Self {
            state: State::Borrowed(handle),
        }
    }

    /// Adopt a new handle with full ownership.
    ///
    /// Any previous handle must already have been released or destroyed by
    /// the caller; adopting over a live handle would leak it.
    pub fn acquire(&mut self, handle: H) {
        debug_assert!(self.is_empty(), "acquire over a live handle leaks it");
        debug_assert!(!handle.is_empty_value());
        self.state = State::Owned(handle);
    }

    /// The current handle, if any, regardless of ownership.
    pub fn get(&self) -> Option<H> {
        match self.state {
            State::Empty => None,
            State::Owned(h) | State::Borrowed(h) => Some(h),
        }
    }

    /// Whether the cell currently references a resource.
    pub fn is_empty(&self) -> bool {
        matches!(self.state, State::Empty)
    }

    /// Whether the cell owns its handle (as opposed to observing it).
    pub fn owns(&self) -> bool {
        matches!(self.state, State::Owned(_))
    }

    /// Relinquish the handle without freeing it.
    ///
    /// Returns the previous handle and resets the cell to empty. After a
    /// release nobody owns the handle through this cell, so the caller is
    /// responsible for its eventual teardown. Idempotent: a second call
    /// returns `None`.
    pub fn release(&mut self) -> Option<H> {
        let previous = self.get();
        self.state = State::Empty;
        previous
    }

    /// Reset to empty, yielding the handle only if it was owned.
    ///
    /// This is the teardown primitive: the caller frees the yielded handle
    /// with the matching native function. Borrowed handles are dropped
    /// without being yielded, so observers can never free a resource owned
    /// elsewhere. Safe to call on an empty cell.
    pub fn take_owned(&mut self) -> Option<H> {
        match self.state {
            State::Owned(h) => {
                self.state = State::Empty;
                Some(h)
            }
            State::Borrowed(_) | State::Empty => {
                self.state = State::Empty;
                None
            }
        }
    }
}

impl<H: RawHandle> Default for HandleCell<H> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    thread_local! {
        static FREE_CALLS: Cell<usize> = const { Cell::new(0) };
    }

    fn fake_free(_handle: *mut u8) {
        FREE_CALLS.with(|c| c.set(c.get() + 1));
    }

    fn free_calls() -> usize {
        FREE_CALLS.with(Cell::get)
    }

    fn reset_free_calls() {
        FREE_CALLS.with(|c| c.set(0));
    }

    // Minimal wrapper standing in for Window/Renderer/etc.: Drop calls its
    // own destroy, destroy frees only what take_owned yields.
    struct Probe {
        cell: HandleCell<*mut u8>,
    }

    impl Probe {
        fn owned(handle: *mut u8) -> Self {
            Self {
                cell: HandleCell::adopt(handle),
            }
        }

        fn borrowed(handle: *mut u8) -> Self {
            Self {
                cell: HandleCell::adopt_borrowed(handle),
            }
        }

        fn is_valid(&self) -> bool {
            !self.cell.is_empty()
        }

        fn destroy(&mut self) {
            if let Some(handle) = self.cell.take_owned() {
                fake_free(handle);
            }
        }
    }

    impl Drop for Probe {
        fn drop(&mut self) {
            self.destroy();
        }
    }

    // Dangling but never dereferenced.
    fn dummy_handle() -> *mut u8 {
        0x1000 as *mut u8
    }

    #[test]
    fn destroy_twice_frees_exactly_once() {
        reset_free_calls();
        let mut probe = Probe::owned(dummy_handle());
        probe.destroy();
        assert_eq!(free_calls(), 1);
        probe.destroy();
        assert_eq!(free_calls(), 1);
        drop(probe);
        assert_eq!(free_calls(), 1);
    }

    #[test]
    fn borrowed_handle_is_valid_but_never_freed() {
        reset_free_calls();
        {
            let probe = Probe::borrowed(dummy_handle());
            assert!(probe.is_valid());
            assert!(!probe.cell.owns());
        }
        assert_eq!(free_calls(), 0);
    }

    #[test]
    fn release_transfers_ownership_out() {
        reset_free_calls();
        let handle = dummy_handle();
        let mut probe = Probe::owned(handle);
        assert_eq!(probe.cell.release(), Some(handle));
        assert_eq!(probe.cell.release(), None);
        drop(probe);
        assert_eq!(free_calls(), 0);
    }

    #[test]
    fn move_leaves_a_single_owner() {
        reset_free_calls();
        let handle = dummy_handle();
        let probe = Probe::owned(handle);
        let moved = probe;
        assert_eq!(moved.cell.get(), Some(handle));
        assert!(moved.cell.owns());
        drop(moved);
        assert_eq!(free_calls(), 1);
    }

    #[test]
    fn empty_cell_reports_empty() {
        let cell: HandleCell<*mut u8> = HandleCell::empty();
        assert!(cell.is_empty());
        assert!(!cell.owns());
        assert_eq!(cell.get(), None);
    }
}

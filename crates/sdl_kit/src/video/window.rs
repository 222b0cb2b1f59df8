//! Window creation and lifetime management
//!
//! [`Window`] owns one `SDL_Window` handle and destroys it exactly once.
//! Owning windows are entered into a thread-local reverse-lookup registry
//! so that handles SDL hands back by value, such as `SDL_GetWindowFromID`
//! after an event, resolve to the identity of the wrapper that
//! owns them rather than to a second, unrelated instance. Lookups produce
//! *borrowed* windows: fully usable views that share the owner's identity
//! anchor but never free the handle.
//!
//! Teardown ordering: the registry entry is erased first, then the native
//! destroy call is issued, because SDL may recycle the handle value for an
//! unrelated window immediately after the free.

use std::ffi::{c_int, CStr, CString};
use std::rc::Rc;

use bitflags::bitflags;
use sdl2_sys as sys;

use crate::error::{native_error, SdlError, SdlResult};
use crate::foundation::handle::HandleCell;
use crate::foundation::registry::HandleRegistry;
use crate::init::{InitFlags, Sdl};
use crate::video::surface::Surface;

// SDL_WINDOWPOS_UNDEFINED: let the window manager place the window.
const WINDOWPOS_UNDEFINED: c_int = 0x1FFF_0000;

bitflags! {
    /// Window state and capability mask
    ///
    /// Values mirror SDL's `SDL_WINDOW_*` bitmask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct WindowFlags: u32 {
        /// Fullscreen window
        const FULLSCREEN = 0x0000_0001;
        /// Window usable with an OpenGL context
        const OPENGL = 0x0000_0002;
        /// Window is visible
        const SHOWN = 0x0000_0004;
        /// Window is not visible
        const HIDDEN = 0x0000_0008;
        /// No window decoration
        const BORDERLESS = 0x0000_0010;
        /// Window can be resized
        const RESIZABLE = 0x0000_0020;
        /// Window is minimized
        const MINIMIZED = 0x0000_0040;
        /// Window is maximized
        const MAXIMIZED = 0x0000_0080;
        /// Window has grabbed input focus
        const INPUT_GRABBED = 0x0000_0100;
        /// Window has input focus
        const INPUT_FOCUS = 0x0000_0200;
        /// Window has mouse focus
        const MOUSE_FOCUS = 0x0000_0400;
        /// Fullscreen at the desktop resolution
        const FULLSCREEN_DESKTOP = 0x0000_1001;
        /// Window not created by SDL
        const FOREIGN = 0x0000_0800;
        /// Window should be created in high-DPI mode if supported
        const ALLOW_HIGHDPI = 0x0000_2000;
        /// Window usable with a Vulkan surface
        const VULKAN = 0x1000_0000;
    }
}

/// Heap-pinned identity of an owning window, shared with registry lookups.
pub(crate) struct WindowAnchor {
    raw: *mut sys::SDL_Window,
    id: u32,
}

thread_local! {
    static REGISTRY: HandleRegistry<WindowAnchor> = HandleRegistry::new();
}

/// RAII wrapper around one `SDL_Window`
///
/// Move-only. An owning window frees the native handle on drop; a
/// borrowed window (from [`Window::try_from_id`]) shares the owner's
/// identity and never frees anything.
pub struct Window {
    anchor: Rc<WindowAnchor>,
    cell: HandleCell<*mut sys::SDL_Window>,
}

impl Window {
    /// Create a window and register it for reverse lookup.
    ///
    /// # Errors
    ///
    /// [`SdlError::SubsystemMissing`] without the video subsystem,
    /// [`SdlError::InvalidArgument`] for a title with interior NUL,
    /// [`SdlError::Native`] if window creation fails.
    pub fn try_create(
        sdl: &Sdl,
        title: &str,
        width: u32,
        height: u32,
        flags: WindowFlags,
    ) -> SdlResult<Self> {
        if !sdl.has_subsystem(InitFlags::VIDEO) {
            return Err(SdlError::SubsystemMissing("video"));
        }
        let c_title = CString::new(title)
            .map_err(|_| SdlError::InvalidArgument("window title contains NUL".to_string()))?;
        let raw = unsafe {
            sys::SDL_CreateWindow(
                c_title.as_ptr(),
                WINDOWPOS_UNDEFINED,
                WINDOWPOS_UNDEFINED,
                c_int::try_from(width)
                    .map_err(|_| SdlError::InvalidArgument("window width".to_string()))?,
                c_int::try_from(height)
                    .map_err(|_| SdlError::InvalidArgument("window height".to_string()))?,
                flags.bits(),
            )
        };
        if raw.is_null() {
            return Err(native_error());
        }
        let id = unsafe { sys::SDL_GetWindowID(raw) };
        let anchor = Rc::new(WindowAnchor { raw, id });
        REGISTRY.with(|registry| registry.register(raw as usize, &anchor));
        log::debug!("created window {id} ({width}x{height}, {flags:?})");
        Ok(Self {
            anchor,
            cell: HandleCell::adopt(raw),
        })
    }

    /// Create a window and register it for reverse lookup.
    ///
    /// Convenience form of [`Window::try_create`].
    ///
    /// # Panics
    ///
    /// Panics if window creation fails.
    pub fn create(sdl: &Sdl, title: &str, width: u32, height: u32, flags: WindowFlags) -> Self {
        Self::try_create(sdl, title, width, height, flags)
            .unwrap_or_else(|err| panic!("window creation failed: {err}"))
    }

    /// Resolve a window id to a borrowed window.
    ///
    /// If the id belongs to a window this library created, the result
    /// shares that owner's identity (see [`Window::is_same`]); otherwise
    /// it is a detached view of a window owned elsewhere. Either way the
    /// result never frees the handle.
    ///
    /// # Errors
    ///
    /// [`SdlError::Native`] if the id does not name a live window.
    pub fn try_from_id(id: u32) -> SdlResult<Self> {
        let raw = unsafe { sys::SDL_GetWindowFromID(id) };
        if raw.is_null() {
            return Err(native_error());
        }
        Ok(Self::borrowed_from_raw(raw))
    }

    pub(crate) fn borrowed_from_raw(raw: *mut sys::SDL_Window) -> Self {
        let anchor = REGISTRY
            .with(|registry| registry.resolve(raw as usize))
            .unwrap_or_else(|| {
                Rc::new(WindowAnchor {
                    raw,
                    id: unsafe { sys::SDL_GetWindowID(raw) },
                })
            });
        Self {
            anchor,
            cell: HandleCell::adopt_borrowed(raw),
        }
    }

    /// The window id used by the event queue.
    pub fn id(&self) -> u32 {
        self.anchor.id
    }

    /// Whether `self` and `other` refer to the same underlying window.
    pub fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.anchor, &other.anchor)
    }

    /// Whether this wrapper frees the window on drop.
    pub fn owns(&self) -> bool {
        self.cell.owns()
    }

    /// Whether this wrapper currently holds a live handle.
    pub fn is_valid(&self) -> bool {
        !self.cell.is_empty()
    }

    /// The raw native handle.
    pub fn raw(&self) -> *mut sys::SDL_Window {
        self.anchor.raw
    }

    /// Current window size in screen coordinates.
    pub fn size(&self) -> (u32, u32) {
        let mut width: c_int = 0;
        let mut height: c_int = 0;
        unsafe { sys::SDL_GetWindowSize(self.raw(), &mut width, &mut height) };
        (width.max(0) as u32, height.max(0) as u32)
    }

    /// Current window title.
    pub fn title(&self) -> String {
        unsafe {
            CStr::from_ptr(sys::SDL_GetWindowTitle(self.raw()))
                .to_string_lossy()
                .into_owned()
        }
    }

    /// Replace the window title.
    ///
    /// # Errors
    ///
    /// [`SdlError::InvalidArgument`] for a title with interior NUL.
    pub fn set_title(&mut self, title: &str) -> SdlResult<()> {
        let c_title = CString::new(title)
            .map_err(|_| SdlError::InvalidArgument("window title contains NUL".to_string()))?;
        unsafe { sys::SDL_SetWindowTitle(self.raw(), c_title.as_ptr()) };
        Ok(())
    }

    /// Current window state flags.
    pub fn flags(&self) -> WindowFlags {
        WindowFlags::from_bits_truncate(unsafe { sys::SDL_GetWindowFlags(self.raw()) })
    }

    /// The window's backing surface as a borrowed view.
    ///
    /// The surface is owned by the window and freed by SDL when the window
    /// is destroyed; the returned wrapper never frees it.
    ///
    /// # Errors
    ///
    /// [`SdlError::Native`] if the window has no backing surface (e.g. it
    /// was created for a hardware renderer).
    pub fn try_surface(&self) -> SdlResult<Surface> {
        let raw = unsafe { sys::SDL_GetWindowSurface(self.raw()) };
        if raw.is_null() {
            return Err(native_error());
        }
        Ok(Surface::borrowed_from_raw(raw))
    }

    /// Copy the backing surface to the screen.
    ///
    /// # Errors
    ///
    /// [`SdlError::Native`] if the copy fails.
    pub fn update_surface(&mut self) -> SdlResult<()> {
        if unsafe { sys::SDL_UpdateWindowSurface(self.raw()) } != 0 {
            return Err(native_error());
        }
        Ok(())
    }

    /// Give up ownership and return the raw handle.
    ///
    /// The registry entry is erased and the wrapper is consumed; the
    /// caller is responsible for eventually destroying the window.
    pub fn release(mut self) -> *mut sys::SDL_Window {
        let raw = self.raw();
        if self.cell.owns() {
            REGISTRY.with(|registry| registry.unregister(raw as usize));
        }
        self.cell.release();
        raw
    }

    /// Destroy the window now instead of at end of scope.
    pub fn destroy(mut self) {
        self.destroy_in_place();
    }

    fn destroy_in_place(&mut self) {
        if let Some(raw) = self.cell.take_owned() {
            REGISTRY.with(|registry| registry.unregister(raw as usize));
            unsafe { sys::SDL_DestroyWindow(raw) };
            log::debug!("destroyed window {}", self.anchor.id);
        } else {
            self.cell.release();
        }
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        self.destroy_in_place();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // API shape checks: validated at compile time, no SDL runtime needed.
    #[test]
    fn factory_and_accessor_signatures() {
        let _try_create: fn(&Sdl, &str, u32, u32, WindowFlags) -> SdlResult<Window> =
            Window::try_create;
        let _from_id: fn(u32) -> SdlResult<Window> = Window::try_from_id;
        let _release: fn(Window) -> *mut sys::SDL_Window = Window::release;
        let _destroy: fn(Window) = Window::destroy;
        let _is_same: fn(&Window, &Window) -> bool = Window::is_same;
    }

    #[test]
    fn window_flag_values_match_the_native_masks() {
        assert_eq!(WindowFlags::FULLSCREEN.bits(), 0x1);
        assert_eq!(WindowFlags::RESIZABLE.bits(), 0x20);
        assert_eq!(WindowFlags::ALLOW_HIGHDPI.bits(), 0x2000);
        assert_eq!(
            WindowFlags::FULLSCREEN_DESKTOP.bits(),
            WindowFlags::FULLSCREEN.bits() | 0x1000
        );
    }
}

//! Software surface wrapper
//!
//! A [`Surface`] is either owned (created through this library or loaded
//! from a BMP file, and freed on drop) or a borrowed view of a surface
//! owned elsewhere, most importantly a window's backing surface, which SDL
//! frees together with the window and which must therefore never be freed
//! independently. The two cases share one type; the ownership state lives
//! in the handle cell, and teardown only ever frees what the cell yields
//! as owned.
//!
//! Deep copying is the one place copy semantics exist in the wrapper
//! layer: [`Surface::try_duplicate`] asks SDL for a brand-new surface with
//! the same contents, so both the original and the copy are independently
//! owned.

use std::ffi::{c_int, CString};
use std::path::Path;

use sdl2_sys as sys;

use crate::error::{native_error, SdlError, SdlResult};
use crate::foundation::handle::HandleCell;
use crate::pixels::{Color, PixelFormat};

/// RAII wrapper around one `SDL_Surface`
pub struct Surface {
    cell: HandleCell<*mut sys::SDL_Surface>,
}

impl Surface {
    /// Create a new surface with the given size and pixel format.
    ///
    /// # Errors
    ///
    /// [`SdlError::InvalidArgument`] for out-of-range dimensions,
    /// [`SdlError::Native`] if allocation fails.
    pub fn try_create(width: u32, height: u32, format: PixelFormat) -> SdlResult<Self> {
        let raw = unsafe {
            sys::SDL_CreateRGBSurfaceWithFormat(
                0,
                c_int::try_from(width)
                    .map_err(|_| SdlError::InvalidArgument("surface width".to_string()))?,
                c_int::try_from(height)
                    .map_err(|_| SdlError::InvalidArgument("surface height".to_string()))?,
                format.bits_per_pixel() as c_int,
                format.to_raw(),
            )
        };
        if raw.is_null() {
            return Err(native_error());
        }
        Ok(Self {
            cell: HandleCell::adopt(raw),
        })
    }

    /// Create a new surface with the given size and pixel format.
    ///
    /// Convenience form of [`Surface::try_create`].
    ///
    /// # Panics
    ///
    /// Panics if surface creation fails.
    pub fn create(width: u32, height: u32, format: PixelFormat) -> Self {
        Self::try_create(width, height, format)
            .unwrap_or_else(|err| panic!("surface creation failed: {err}"))
    }

    /// Load a BMP image into a new owned surface.
    ///
    /// Decoding is entirely the native library's responsibility; this
    /// call only moves the handle across the boundary.
    ///
    /// # Errors
    ///
    /// [`SdlError::InvalidArgument`] for a non-UTF-8 or NUL-containing
    /// path, [`SdlError::Native`] if the file cannot be opened or decoded.
    pub fn try_load_bmp(path: &Path) -> SdlResult<Self> {
        let c_path = path
            .to_str()
            .and_then(|p| CString::new(p).ok())
            .ok_or_else(|| SdlError::InvalidArgument(format!("bmp path {}", path.display())))?;
        let raw = unsafe {
            let stream =
                sys::SDL_RWFromFile(c_path.as_ptr(), b"rb\0".as_ptr().cast::<std::ffi::c_char>());
            if stream.is_null() {
                return Err(native_error());
            }
            // 1 = SDL closes the stream regardless of the outcome.
            sys::SDL_LoadBMP_RW(stream, 1)
        };
        if raw.is_null() {
            return Err(native_error());
        }
        log::debug!("loaded BMP surface from {}", path.display());
        Ok(Self {
            cell: HandleCell::adopt(raw),
        })
    }

    /// Wrap a surface owned elsewhere (a window's backing surface).
    pub(crate) fn borrowed_from_raw(raw: *mut sys::SDL_Surface) -> Self {
        Self {
            cell: HandleCell::adopt_borrowed(raw),
        }
    }

    /// Create an independently owned deep copy of this surface.
    ///
    /// # Errors
    ///
    /// [`SdlError::Native`] if the native duplication fails.
    pub fn try_duplicate(&self) -> SdlResult<Self> {
        let raw = unsafe { sys::SDL_DuplicateSurface(self.raw()) };
        if raw.is_null() {
            return Err(native_error());
        }
        Ok(Self {
            cell: HandleCell::adopt(raw),
        })
    }

    /// Fill the entire surface with a solid color.
    ///
    /// # Errors
    ///
    /// [`SdlError::Native`] if the fill fails.
    pub fn fill(&mut self, color: Color) -> SdlResult<()> {
        let rc = unsafe {
            let raw = self.raw();
            let mapped = sys::SDL_MapRGBA((*raw).format, color.r, color.g, color.b, color.a);
            sys::SDL_FillRect(raw, std::ptr::null(), mapped)
        };
        if rc != 0 {
            return Err(native_error());
        }
        Ok(())
    }

    /// Surface size in pixels.
    pub fn size(&self) -> (u32, u32) {
        let raw = self.raw();
        unsafe { ((*raw).w.max(0) as u32, (*raw).h.max(0) as u32) }
    }

    /// Pixel format of the surface.
    pub fn format(&self) -> PixelFormat {
        let raw = self.raw();
        PixelFormat::from_raw(unsafe { (*(*raw).format).format })
    }

    /// Whether this wrapper frees the surface on drop.
    pub fn owns(&self) -> bool {
        self.cell.owns()
    }

    /// Whether this wrapper currently holds a live handle.
    pub fn is_valid(&self) -> bool {
        !self.cell.is_empty()
    }

    /// The raw native handle. Null only after a logic error.
    pub fn raw(&self) -> *mut sys::SDL_Surface {
        self.cell.get().unwrap_or(std::ptr::null_mut())
    }

    /// Give up ownership and return the raw handle.
    ///
    /// The caller is responsible for eventually freeing the surface.
    pub fn release(mut self) -> *mut sys::SDL_Surface {
        let raw = self.raw();
        self.cell.release();
        raw
    }

    /// Free the surface now instead of at end of scope.
    ///
    /// A borrowed surface only drops its reference; the window keeps
    /// owning the native object.
    pub fn destroy(mut self) {
        self.destroy_in_place();
    }

    fn destroy_in_place(&mut self) {
        if let Some(raw) = self.cell.take_owned() {
            unsafe { sys::SDL_FreeSurface(raw) };
        } else {
            self.cell.release();
        }
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        self.destroy_in_place();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // API shape checks: validated at compile time, no SDL runtime needed.
    #[test]
    fn factory_and_copy_signatures() {
        let _try_create: fn(u32, u32, PixelFormat) -> SdlResult<Surface> = Surface::try_create;
        let _load: fn(&Path) -> SdlResult<Surface> = Surface::try_load_bmp;
        let _duplicate: fn(&Surface) -> SdlResult<Surface> = Surface::try_duplicate;
        let _release: fn(Surface) -> *mut sys::SDL_Surface = Surface::release;
    }
}

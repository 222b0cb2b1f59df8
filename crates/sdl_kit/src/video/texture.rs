//! GPU texture wrapper
//!
//! A [`Texture`] is created by a renderer and destroyed with
//! `SDL_DestroyTexture`. Each texture keeps the identity anchor of the
//! renderer that created it, so diagnostics and registry consumers can
//! relate the two, and owning textures are entered into their own
//! reverse-lookup registry keyed by the raw texture handle.

use std::ffi::c_int;
use std::rc::Rc;

use sdl2_sys as sys;

use crate::error::{native_error, SdlError, SdlResult};
use crate::foundation::handle::HandleCell;
use crate::foundation::registry::HandleRegistry;
use crate::pixels::{Color, PixelFormat};
use crate::video::renderer::{Renderer, RendererAnchor};
use crate::video::surface::Surface;

/// Texture access pattern
///
/// Values mirror SDL's `SDL_TextureAccess` enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum TextureAccess {
    /// Rarely changes, not lockable
    Static = 0,
    /// Frequently updated, lockable
    Streaming = 1,
    /// Can be used as a render target
    Target = 2,
}

impl TextureAccess {
    fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Static),
            1 => Some(Self::Streaming),
            2 => Some(Self::Target),
            _ => None,
        }
    }
}

/// Size and format information reported by [`Texture::query`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    /// Pixel format of the texture
    pub format: PixelFormat,
    /// Access pattern the texture was created with
    pub access: TextureAccess,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Heap-pinned identity of an owning texture, shared with registry lookups.
pub(crate) struct TextureAnchor {
    raw: *mut sys::SDL_Texture,
}

thread_local! {
    static REGISTRY: HandleRegistry<TextureAnchor> = HandleRegistry::new();
}

/// RAII wrapper around one `SDL_Texture`
///
/// Must not outlive the renderer that created it; destroying the renderer
/// frees every texture on the native side.
pub struct Texture {
    anchor: Rc<TextureAnchor>,
    renderer: Rc<RendererAnchor>,
    cell: HandleCell<*mut sys::SDL_Texture>,
}

impl Texture {
    /// Create a blank texture.
    ///
    /// # Errors
    ///
    /// [`SdlError::InvalidArgument`] for out-of-range dimensions,
    /// [`SdlError::Native`] if the driver rejects the combination.
    pub fn try_create(
        renderer: &Renderer,
        format: PixelFormat,
        access: TextureAccess,
        width: u32,
        height: u32,
    ) -> SdlResult<Self> {
        let raw = unsafe {
            sys::SDL_CreateTexture(
                renderer.raw(),
                format.to_raw(),
                access as c_int,
                c_int::try_from(width)
                    .map_err(|_| SdlError::InvalidArgument("texture width".to_string()))?,
                c_int::try_from(height)
                    .map_err(|_| SdlError::InvalidArgument("texture height".to_string()))?,
            )
        };
        if raw.is_null() {
            return Err(native_error());
        }
        log::debug!("created {access:?} texture ({width}x{height}, {format:?})");
        Ok(Self::adopt_raw(raw, renderer))
    }

    /// Create a blank texture.
    ///
    /// Convenience form of [`Texture::try_create`].
    ///
    /// # Panics
    ///
    /// Panics if texture creation fails.
    pub fn create(
        renderer: &Renderer,
        format: PixelFormat,
        access: TextureAccess,
        width: u32,
        height: u32,
    ) -> Self {
        Self::try_create(renderer, format, access, width, height)
            .unwrap_or_else(|err| panic!("texture creation failed: {err}"))
    }

    /// Upload a surface into a new static texture.
    ///
    /// # Errors
    ///
    /// [`SdlError::Native`] if the upload fails.
    pub fn try_from_surface(renderer: &Renderer, surface: &Surface) -> SdlResult<Self> {
        let raw = unsafe { sys::SDL_CreateTextureFromSurface(renderer.raw(), surface.raw()) };
        if raw.is_null() {
            return Err(native_error());
        }
        Ok(Self::adopt_raw(raw, renderer))
    }

    fn adopt_raw(raw: *mut sys::SDL_Texture, renderer: &Renderer) -> Self {
        let anchor = Rc::new(TextureAnchor { raw });
        REGISTRY.with(|registry| registry.register(raw as usize, &anchor));
        Self {
            anchor,
            renderer: Rc::clone(renderer.anchor()),
            cell: HandleCell::adopt(raw),
        }
    }

    /// Whether `self` and `other` refer to the same underlying texture.
    pub fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.anchor, &other.anchor)
    }

    /// Whether this texture was created by `renderer`.
    pub fn created_by(&self, renderer: &Renderer) -> bool {
        Rc::ptr_eq(&self.renderer, renderer.anchor())
    }

    /// Whether this wrapper frees the texture on drop.
    pub fn owns(&self) -> bool {
        self.cell.owns()
    }

    /// Whether this wrapper currently holds a live handle.
    pub fn is_valid(&self) -> bool {
        !self.cell.is_empty()
    }

    /// The raw native handle.
    pub fn raw(&self) -> *mut sys::SDL_Texture {
        self.anchor.raw
    }

    /// Query size, format and access of the texture.
    ///
    /// # Errors
    ///
    /// [`SdlError::Native`] if the query fails.
    pub fn query(&self) -> SdlResult<TextureInfo> {
        let mut format: u32 = 0;
        let mut access: c_int = 0;
        let mut width: c_int = 0;
        let mut height: c_int = 0;
        let rc = unsafe {
            sys::SDL_QueryTexture(self.raw(), &mut format, &mut access, &mut width, &mut height)
        };
        if rc != 0 {
            return Err(native_error());
        }
        Ok(TextureInfo {
            format: PixelFormat::from_raw(format),
            access: TextureAccess::from_raw(access).ok_or_else(|| {
                SdlError::InvalidArgument(format!("unknown texture access {access}"))
            })?,
            width: width.max(0) as u32,
            height: height.max(0) as u32,
        })
    }

    /// Set the color multiplier applied when the texture is copied.
    ///
    /// # Errors
    ///
    /// [`SdlError::Native`] if the modulation is unsupported.
    pub fn set_color_mod(&mut self, color: Color) -> SdlResult<()> {
        let rc =
            unsafe { sys::SDL_SetTextureColorMod(self.raw(), color.r, color.g, color.b) };
        if rc != 0 {
            return Err(native_error());
        }
        Ok(())
    }

    /// Give up ownership and return the raw handle.
    ///
    /// The registry entry is erased and the wrapper is consumed; the
    /// caller is responsible for eventually destroying the texture.
    pub fn release(mut self) -> *mut sys::SDL_Texture {
        let raw = self.raw();
        if self.cell.owns() {
            REGISTRY.with(|registry| registry.unregister(raw as usize));
        }
        self.cell.release();
        raw
    }

    /// Destroy the texture now instead of at end of scope.
    pub fn destroy(mut self) {
        self.destroy_in_place();
    }

    fn destroy_in_place(&mut self) {
        if let Some(raw) = self.cell.take_owned() {
            REGISTRY.with(|registry| registry.unregister(raw as usize));
            unsafe { sys::SDL_DestroyTexture(raw) };
        } else {
            self.cell.release();
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        self.destroy_in_place();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // API shape checks: validated at compile time, no SDL runtime needed.
    #[test]
    fn factory_and_query_signatures() {
        let _try_create: fn(
            &Renderer,
            PixelFormat,
            TextureAccess,
            u32,
            u32,
        ) -> SdlResult<Texture> = Texture::try_create;
        let _from_surface: fn(&Renderer, &Surface) -> SdlResult<Texture> = Texture::try_from_surface;
        let _query: fn(&Texture) -> SdlResult<TextureInfo> = Texture::query;
    }

    #[test]
    fn access_values_match_the_native_enumeration() {
        assert_eq!(TextureAccess::Static as i32, 0);
        assert_eq!(TextureAccess::Streaming as i32, 1);
        assert_eq!(TextureAccess::Target as i32, 2);
        assert_eq!(TextureAccess::from_raw(1), Some(TextureAccess::Streaming));
        assert_eq!(TextureAccess::from_raw(9), None);
    }
}

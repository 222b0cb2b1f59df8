//! Hardware renderer wrapper
//!
//! [`Renderer`] owns one `SDL_Renderer` attached to a window. SDL exposes
//! the same renderer through a second path, `SDL_GetRenderer(window)`,
//! so owning renderers are entered into a reverse-lookup registry and
//! [`Renderer::try_from_window`] resolves that raw handle back to the
//! owner's identity instead of minting an unrelated second owner. A
//! resolved renderer is a borrowed view: fully usable, never frees.

use std::ffi::c_int;
use std::rc::Rc;

use bitflags::bitflags;
use sdl2_sys as sys;

use crate::error::{native_error, SdlResult};
use crate::foundation::handle::HandleCell;
use crate::foundation::registry::HandleRegistry;
use crate::pixels::{Color, PixelFormat};
use crate::video::surface::Surface;
use crate::video::texture::{Texture, TextureAccess};
use crate::video::window::Window;
use crate::video::Rect;

bitflags! {
    /// Renderer capability request mask
    ///
    /// Values mirror SDL's `SDL_RENDERER_*` bitmask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RendererFlags: u32 {
        /// Software fallback renderer
        const SOFTWARE = 0x0000_0001;
        /// Hardware accelerated renderer
        const ACCELERATED = 0x0000_0002;
        /// Present is synchronized with the display refresh
        const PRESENT_VSYNC = 0x0000_0004;
        /// Renderer supports rendering to texture
        const TARGET_TEXTURE = 0x0000_0008;
    }
}

/// Heap-pinned identity of an owning renderer, shared with lookups and
/// with the textures it creates.
pub(crate) struct RendererAnchor {
    raw: *mut sys::SDL_Renderer,
}

thread_local! {
    static REGISTRY: HandleRegistry<RendererAnchor> = HandleRegistry::new();
}

/// RAII wrapper around one `SDL_Renderer`
///
/// Destroying a renderer invalidates every texture created from it, so
/// textures should be dropped first; SDL tolerates the reverse order but
/// the textures' native handles are already gone by then.
pub struct Renderer {
    anchor: Rc<RendererAnchor>,
    cell: HandleCell<*mut sys::SDL_Renderer>,
}

impl Renderer {
    /// Create a renderer for `window`, letting SDL pick the first driver
    /// that satisfies `flags`.
    ///
    /// # Errors
    ///
    /// [`SdlError::Native`](crate::SdlError::Native) if no driver matches.
    pub fn try_create(window: &Window, flags: RendererFlags) -> SdlResult<Self> {
        let raw = unsafe { sys::SDL_CreateRenderer(window.raw(), -1, flags.bits()) };
        if raw.is_null() {
            return Err(native_error());
        }
        let anchor = Rc::new(RendererAnchor { raw });
        REGISTRY.with(|registry| registry.register(raw as usize, &anchor));
        log::debug!("created renderer for window {} ({flags:?})", window.id());
        Ok(Self {
            anchor,
            cell: HandleCell::adopt(raw),
        })
    }

    /// Create a renderer for `window`.
    ///
    /// Convenience form of [`Renderer::try_create`].
    ///
    /// # Panics
    ///
    /// Panics if renderer creation fails.
    pub fn create(window: &Window, flags: RendererFlags) -> Self {
        Self::try_create(window, flags)
            .unwrap_or_else(|err| panic!("renderer creation failed: {err}"))
    }

    /// Resolve the renderer attached to `window` to a borrowed view.
    ///
    /// If this library owns that renderer, the result shares the owner's
    /// identity (see [`Renderer::is_same`]).
    ///
    /// # Errors
    ///
    /// [`SdlError::Native`](crate::SdlError::Native) if the window has no
    /// renderer.
    pub fn try_from_window(window: &Window) -> SdlResult<Self> {
        let raw = unsafe { sys::SDL_GetRenderer(window.raw()) };
        if raw.is_null() {
            return Err(native_error());
        }
        let anchor = REGISTRY
            .with(|registry| registry.resolve(raw as usize))
            .unwrap_or_else(|| Rc::new(RendererAnchor { raw }));
        Ok(Self {
            anchor,
            cell: HandleCell::adopt_borrowed(raw),
        })
    }

    /// Whether `self` and `other` refer to the same underlying renderer.
    pub fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.anchor, &other.anchor)
    }

    /// Whether this wrapper frees the renderer on drop.
    pub fn owns(&self) -> bool {
        self.cell.owns()
    }

    /// Whether this wrapper currently holds a live handle.
    pub fn is_valid(&self) -> bool {
        !self.cell.is_empty()
    }

    /// The raw native handle.
    pub fn raw(&self) -> *mut sys::SDL_Renderer {
        self.anchor.raw
    }

    pub(crate) fn anchor(&self) -> &Rc<RendererAnchor> {
        &self.anchor
    }

    /// Create a texture owned by this renderer.
    ///
    /// # Errors
    ///
    /// See [`Texture::try_create`].
    pub fn try_create_texture(
        &self,
        format: PixelFormat,
        access: TextureAccess,
        width: u32,
        height: u32,
    ) -> SdlResult<Texture> {
        Texture::try_create(self, format, access, width, height)
    }

    /// Upload a surface into a new static texture.
    ///
    /// # Errors
    ///
    /// See [`Texture::try_from_surface`].
    pub fn try_create_texture_from_surface(&self, surface: &Surface) -> SdlResult<Texture> {
        Texture::try_from_surface(self, surface)
    }

    /// Set the color used by [`clear`](Self::clear) and fill operations.
    ///
    /// # Errors
    ///
    /// [`SdlError::Native`](crate::SdlError::Native) if the renderer
    /// rejects the call.
    pub fn set_draw_color(&mut self, color: Color) -> SdlResult<()> {
        let rc = unsafe {
            sys::SDL_SetRenderDrawColor(self.raw(), color.r, color.g, color.b, color.a)
        };
        if rc != 0 {
            return Err(native_error());
        }
        Ok(())
    }

    /// The current draw color.
    ///
    /// # Errors
    ///
    /// [`SdlError::Native`](crate::SdlError::Native) if the query fails.
    pub fn draw_color(&self) -> SdlResult<Color> {
        let (mut r, mut g, mut b, mut a) = (0u8, 0u8, 0u8, 0u8);
        let rc = unsafe {
            sys::SDL_GetRenderDrawColor(self.raw(), &mut r, &mut g, &mut b, &mut a)
        };
        if rc != 0 {
            return Err(native_error());
        }
        Ok(Color::rgba(r, g, b, a))
    }

    /// Clear the whole render target with the draw color.
    ///
    /// # Errors
    ///
    /// [`SdlError::Native`](crate::SdlError::Native) if the clear fails.
    pub fn clear(&mut self) -> SdlResult<()> {
        if unsafe { sys::SDL_RenderClear(self.raw()) } != 0 {
            return Err(native_error());
        }
        Ok(())
    }

    /// Fill `rect` with the draw color.
    ///
    /// # Errors
    ///
    /// [`SdlError::Native`](crate::SdlError::Native) if the fill fails.
    pub fn fill_rect(&mut self, rect: Rect) -> SdlResult<()> {
        let native = rect.to_native();
        if unsafe { sys::SDL_RenderFillRect(self.raw(), &native) } != 0 {
            return Err(native_error());
        }
        Ok(())
    }

    /// Present the backbuffer to the screen.
    pub fn present(&mut self) {
        unsafe { sys::SDL_RenderPresent(self.raw()) };
    }

    /// Size of the render output in pixels (may differ from the window
    /// size on high-DPI displays).
    ///
    /// # Errors
    ///
    /// [`SdlError::Native`](crate::SdlError::Native) if the query fails.
    pub fn output_size(&self) -> SdlResult<(u32, u32)> {
        let mut width: c_int = 0;
        let mut height: c_int = 0;
        let rc = unsafe { sys::SDL_GetRendererOutputSize(self.raw(), &mut width, &mut height) };
        if rc != 0 {
            return Err(native_error());
        }
        Ok((width.max(0) as u32, height.max(0) as u32))
    }

    /// Give up ownership and return the raw handle.
    ///
    /// The registry entry is erased and the wrapper is consumed; the
    /// caller is responsible for eventually destroying the renderer.
    pub fn release(mut self) -> *mut sys::SDL_Renderer {
        let raw = self.raw();
        if self.cell.owns() {
            REGISTRY.with(|registry| registry.unregister(raw as usize));
        }
        self.cell.release();
        raw
    }

    /// Destroy the renderer now instead of at end of scope.
    pub fn destroy(mut self) {
        self.destroy_in_place();
    }

    fn destroy_in_place(&mut self) {
        if let Some(raw) = self.cell.take_owned() {
            REGISTRY.with(|registry| registry.unregister(raw as usize));
            unsafe { sys::SDL_DestroyRenderer(raw) };
            log::debug!("destroyed renderer");
        } else {
            self.cell.release();
        }
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        self.destroy_in_place();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // API shape checks: validated at compile time, no SDL runtime needed.
    #[test]
    fn factory_and_drawing_signatures() {
        let _try_create: fn(&Window, RendererFlags) -> SdlResult<Renderer> = Renderer::try_create;
        let _from_window: fn(&Window) -> SdlResult<Renderer> = Renderer::try_from_window;
        let _set_color: fn(&mut Renderer, Color) -> SdlResult<()> = Renderer::set_draw_color;
        let _clear: fn(&mut Renderer) -> SdlResult<()> = Renderer::clear;
        let _present: fn(&mut Renderer) = Renderer::present;
    }

    #[test]
    fn renderer_flag_values_match_the_native_masks() {
        assert_eq!(RendererFlags::SOFTWARE.bits(), 0x1);
        assert_eq!(RendererFlags::ACCELERATED.bits(), 0x2);
        assert_eq!(RendererFlags::PRESENT_VSYNC.bits(), 0x4);
        assert_eq!(RendererFlags::TARGET_TEXTURE.bits(), 0x8);
    }
}

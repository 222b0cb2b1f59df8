//! Video subsystem wrappers
//!
//! Windows, their backing surfaces, renderers and textures. Each type
//! owns one native handle through a
//! [`HandleCell`](crate::foundation::handle::HandleCell); windows,
//! renderers and textures additionally keep a reverse-lookup registry so
//! raw handles coming back out of SDL (`SDL_GetWindowFromID`,
//! `SDL_GetRenderer`) resolve to the wrapper that owns them.

pub mod renderer;
pub mod surface;
pub mod texture;
pub mod window;

pub use renderer::{Renderer, RendererFlags};
pub use surface::Surface;
pub use texture::{Texture, TextureAccess, TextureInfo};
pub use window::{Window, WindowFlags};

use sdl2_sys as sys;

/// Axis-aligned rectangle in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub w: i32,
    /// Height in pixels
    pub h: i32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub(crate) fn to_native(self) -> sys::SDL_Rect {
        sys::SDL_Rect {
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_translates_to_the_native_layout() {
        let native = Rect::new(1, 2, 3, 4).to_native();
        assert_eq!(native.x, 1);
        assert_eq!(native.y, 2);
        assert_eq!(native.w, 3);
        assert_eq!(native.h, 4);
    }
}

//! # sdl_kit
//!
//! A safe RAII wrapper library over SDL2.
//!
//! ## Features
//!
//! - **RAII Resource Management**: every native handle is owned by exactly
//!   one move-only wrapper and freed exactly once
//! - **Handle Registries**: raw handles coming back out of SDL resolve to
//!   the wrapper that owns them
//! - **Typed Flags and Enums**: `bitflags` masks and strongly-typed enums
//!   instead of raw integers
//! - **Dual Error Surface**: `try_`-prefixed factories return `Result`;
//!   the unprefixed forms treat failure as fatal
//! - **Normalized Input**: joystick axes and rumble intensities exposed in
//!   normalized floating-point ranges
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sdl_kit::prelude::*;
//!
//! fn main() -> SdlResult<()> {
//!     let sdl = Sdl::try_init(InitFlags::VIDEO | InitFlags::EVENTS)?;
//!     let window = Window::try_create(&sdl, "demo", 800, 600, WindowFlags::SHOWN)?;
//!     let mut renderer = Renderer::try_create(&window, RendererFlags::ACCELERATED)?;
//!     let mut events = sdl.try_event_pump()?;
//!
//!     'running: loop {
//!         while let Some(event) = events.poll() {
//!             if event == Event::Quit {
//!                 break 'running;
//!             }
//!         }
//!         renderer.set_draw_color(Color::rgb(32, 32, 64))?;
//!         renderer.clear()?;
//!         renderer.present();
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;

pub mod audio;
pub mod config;
pub mod events;
pub mod joystick;
pub mod pixels;
pub mod video;

mod error;
mod init;

pub use error::{SdlError, SdlResult};
pub use init::{delay, forward_native_log, InitFlags, Sdl};

/// Common imports for wrapper users
pub mod prelude {
    pub use crate::{
        audio::{AudioDevice, AudioFormat, AudioSpec},
        config::{AppConfig, RendererConfig, WindowConfig},
        delay,
        events::{Event, EventPump, WindowChange},
        forward_native_log,
        joystick::Joystick,
        pixels::{Color, Hsl, Hsv, PixelFormat},
        video::{Rect, Renderer, RendererFlags, Surface, Texture, TextureAccess, Window, WindowFlags},
        InitFlags, Sdl, SdlError, SdlResult,
    };
}

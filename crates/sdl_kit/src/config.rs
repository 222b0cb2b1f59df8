//! # Application Configuration
//!
//! Configuration structures for applications built on the wrapper layer:
//! window geometry, renderer behavior and the clear color, with TOML
//! loading and saving. Strong typing with defaults; the structures
//! translate directly into the typed flag masks the factories accept.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pixels::Color;
use crate::video::renderer::RendererFlags;
use crate::video::window::WindowFlags;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// # Window Configuration
///
/// Geometry and state the main window is created with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Client area width in pixels
    pub width: u32,
    /// Client area height in pixels
    pub height: u32,
    /// Whether the window can be resized by the user
    pub resizable: bool,
    /// Whether to start fullscreen at the desktop resolution
    pub fullscreen: bool,
}

impl WindowConfig {
    /// Create a window configuration with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the client area size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Allow the user to resize the window.
    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// The flag mask for [`Window::try_create`](crate::video::Window::try_create).
    pub fn window_flags(&self) -> WindowFlags {
        let mut flags = WindowFlags::SHOWN;
        if self.resizable {
            flags |= WindowFlags::RESIZABLE;
        }
        if self.fullscreen {
            flags |= WindowFlags::FULLSCREEN_DESKTOP;
        }
        flags
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "sdl_kit application".to_string(),
            width: 1280,
            height: 720,
            resizable: true,
            fullscreen: false,
        }
    }
}

/// # Renderer Configuration
///
/// Behavior of the renderer attached to the main window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Request hardware acceleration
    pub accelerated: bool,
    /// Synchronize presentation with the display refresh
    pub vsync: bool,
    /// Color used to clear the frame
    pub clear_color: Color,
}

impl RendererConfig {
    /// The flag mask for [`Renderer::try_create`](crate::video::Renderer::try_create).
    pub fn renderer_flags(&self) -> RendererFlags {
        let mut flags = if self.accelerated {
            RendererFlags::ACCELERATED
        } else {
            RendererFlags::SOFTWARE
        };
        if self.vsync {
            flags |= RendererFlags::PRESENT_VSYNC;
        }
        flags
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            accelerated: true,
            vsync: true,
            clear_color: Color::BLACK,
        }
    }
}

/// # Application Configuration
///
/// Top-level configuration combining all subsystem sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Main window settings
    #[serde(default)]
    pub window: WindowConfig,
    /// Renderer settings
    #[serde(default)]
    pub renderer: RendererConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Parse`] if it is not valid TOML.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Write configuration to a TOML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Serialize`] if serialization fails,
    /// [`ConfigError::Io`] if the file cannot be written.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_a_resizable_720p_window_with_vsync() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 720);
        assert!(config.window.resizable);
        assert!(config.renderer.vsync);
        assert!(config.renderer.accelerated);
    }

    #[test]
    fn window_flags_follow_the_configuration() {
        let config = WindowConfig::new("test").with_resizable(false);
        assert_eq!(config.window_flags(), WindowFlags::SHOWN);

        let config = WindowConfig::new("test").with_resizable(true);
        assert!(config.window_flags().contains(WindowFlags::RESIZABLE));
    }

    #[test]
    fn renderer_flags_follow_the_configuration() {
        let config = RendererConfig {
            accelerated: true,
            vsync: true,
            clear_color: Color::BLACK,
        };
        assert!(config.renderer_flags().contains(RendererFlags::ACCELERATED));
        assert!(config
            .renderer_flags()
            .contains(RendererFlags::PRESENT_VSYNC));

        let config = RendererConfig {
            accelerated: false,
            vsync: false,
            clear_color: Color::BLACK,
        };
        assert_eq!(config.renderer_flags(), RendererFlags::SOFTWARE);
    }

    #[test]
    fn toml_round_trip_preserves_the_configuration() {
        let toml_text = r#"
            [window]
            title = "probe"
            width = 640
            height = 480
            resizable = false
            fullscreen = false

            [renderer]
            accelerated = true
            vsync = false
            clear_color = { r = 16, g = 32, b = 64, a = 255 }
        "#;
        let config: AppConfig = toml::from_str(toml_text).unwrap();
        assert_eq!(config.window.title, "probe");
        assert_eq!(config.window.width, 640);
        assert!(!config.renderer.vsync);
        assert_eq!(config.renderer.clear_color, Color::rgb(16, 32, 64));

        let rendered = toml::to_string_pretty(&config).unwrap();
        let reparsed: AppConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(reparsed.window.title, config.window.title);
        assert_eq!(reparsed.renderer.clear_color, config.renderer.clear_color);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.window.width, 1280);
        assert!(config.renderer.accelerated);
    }
}

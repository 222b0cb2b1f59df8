//! Color and pixel format types
//!
//! Provides the strongly-typed pixel format enumeration used by surfaces
//! and textures, an RGBA color type, and conversions between RGB and the
//! HSL/HSV cylindrical color models. The conversions use the standard
//! max/min-channel chroma formulas with hue wrapped into `[0, 360)`.

use serde::{Deserialize, Serialize};

/// Pixel format enumeration mirroring SDL's packed-format values
///
/// The discriminants are SDL's `SDL_PIXELFORMAT_*` constants, which encode
/// type, channel order, layout and size into a single 32-bit value. Only
/// the formats the wrapper layer hands out are listed; everything else
/// reports as [`PixelFormat::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelFormat {
    /// Format not recognized by the wrapper layer
    Unknown = 0,
    /// Packed 24-bit RGB array order
    Rgb24 = 0x1710_1803,
    /// Packed 32-bit, high byte unused, RGB order
    Rgb888 = 0x1616_1804,
    /// Packed 32-bit, high byte unused, BGR order
    Bgr888 = 0x1656_1804,
    /// Packed 32-bit ARGB
    Argb8888 = 0x1636_2004,
    /// Packed 32-bit RGBA
    Rgba8888 = 0x1646_2004,
    /// Packed 32-bit ABGR
    Abgr8888 = 0x1676_2004,
    /// Packed 32-bit BGRA
    Bgra8888 = 0x1686_2004,
}

impl PixelFormat {
    /// Translate a native format value, mapping unrecognized values to
    /// [`PixelFormat::Unknown`].
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0x1710_1803 => Self::Rgb24,
            0x1616_1804 => Self::Rgb888,
            0x1656_1804 => Self::Bgr888,
            0x1636_2004 => Self::Argb8888,
            0x1646_2004 => Self::Rgba8888,
            0x1676_2004 => Self::Abgr8888,
            0x1686_2004 => Self::Bgra8888,
            _ => Self::Unknown,
        }
    }

    /// The native 32-bit format value.
    pub fn to_raw(self) -> u32 {
        self as u32
    }

    /// Bits per pixel for this format.
    pub fn bits_per_pixel(self) -> u32 {
        match self {
            Self::Unknown => 0,
            Self::Rgb24 => 24,
            Self::Rgb888
            | Self::Bgr888
            | Self::Argb8888
            | Self::Rgba8888
            | Self::Abgr8888
            | Self::Bgra8888 => 32,
        }
    }
}

/// RGBA color with 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (255 = opaque)
    pub a: u8,
}

impl Color {
    /// Opaque black
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque red
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Opaque green
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    /// Opaque blue
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    /// Create an opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color from RGBA channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to the HSL cylindrical model. Alpha is not represented.
    pub fn to_hsl(self) -> Hsl {
        let (hue, max, min, delta) = self.hue_and_extrema();
        let lightness = (max + min) / 2.0;
        let saturation = if delta == 0.0 {
            0.0
        } else {
            delta / (1.0 - (2.0 * lightness - 1.0).abs())
        };
        Hsl {
            hue,
            saturation,
            lightness,
        }
    }

    /// Convert to the HSV cylindrical model. Alpha is not represented.
    pub fn to_hsv(self) -> Hsv {
        let (hue, max, _min, delta) = self.hue_and_extrema();
        let saturation = if max == 0.0 { 0.0 } else { delta / max };
        Hsv {
            hue,
            saturation,
            value: max,
        }
    }

    /// Create an opaque color from HSL components.
    pub fn from_hsl(hsl: Hsl) -> Self {
        let chroma = (1.0 - (2.0 * hsl.lightness - 1.0).abs()) * hsl.saturation;
        let offset = hsl.lightness - chroma / 2.0;
        Self::from_hue_chroma(hsl.hue, chroma, offset)
    }

    /// Create an opaque color from HSV components.
    pub fn from_hsv(hsv: Hsv) -> Self {
        let chroma = hsv.value * hsv.saturation;
        let offset = hsv.value - chroma;
        Self::from_hue_chroma(hsv.hue, chroma, offset)
    }

    /// Hue in degrees plus the channel extrema, shared by both models.
    fn hue_and_extrema(self) -> (f64, f64, f64, f64) {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let hue = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        (hue.rem_euclid(360.0), max, min, delta)
    }

    fn from_hue_chroma(hue: f64, chroma: f64, offset: f64) -> Self {
        let sextant = hue.rem_euclid(360.0) / 60.0;
        let x = chroma * (1.0 - (sextant.rem_euclid(2.0) - 1.0).abs());
        let (r, g, b) = match sextant {
            s if s < 1.0 => (chroma, x, 0.0),
            s if s < 2.0 => (x, chroma, 0.0),
            s if s < 3.0 => (0.0, chroma, x),
            s if s < 4.0 => (0.0, x, chroma),
            s if s < 5.0 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        Self::rgb(
            channel_to_byte(r + offset),
            channel_to_byte(g + offset),
            channel_to_byte(b + offset),
        )
    }
}

fn channel_to_byte(channel: f64) -> u8 {
    let scaled = (channel * 255.0).round();
    if scaled <= 0.0 {
        0
    } else if scaled >= 255.0 {
        255
    } else {
        scaled as u8
    }
}

/// Hue/saturation/lightness color representation
///
/// Hue is in degrees `[0, 360)`; saturation and lightness are in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue angle in degrees
    pub hue: f64,
    /// Saturation
    pub saturation: f64,
    /// Lightness
    pub lightness: f64,
}

/// Hue/saturation/value color representation
///
/// Hue is in degrees `[0, 360)`; saturation and value are in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    /// Hue angle in degrees
    pub hue: f64,
    /// Saturation
    pub saturation: f64,
    /// Value (brightness)
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn pure_red_maps_to_hsl_and_back_exactly() {
        let hsl = Color::RED.to_hsl();
        assert_relative_eq!(hsl.hue, 0.0);
        assert_relative_eq!(hsl.saturation, 1.0);
        assert_relative_eq!(hsl.lightness, 0.5);
        assert_eq!(Color::from_hsl(hsl), Color::RED);
    }

    #[test]
    fn primaries_round_trip_through_hsl_exactly() {
        for color in [
            Color::RED,
            Color::GREEN,
            Color::BLUE,
            Color::WHITE,
            Color::BLACK,
        ] {
            assert_eq!(Color::from_hsl(color.to_hsl()), color);
        }
    }

    #[test]
    fn primaries_round_trip_through_hsv_exactly() {
        for color in [
            Color::RED,
            Color::GREEN,
            Color::BLUE,
            Color::WHITE,
            Color::BLACK,
        ] {
            assert_eq!(Color::from_hsv(color.to_hsv()), color);
        }
    }

    #[test]
    fn green_hue_is_120_degrees() {
        let hsv = Color::GREEN.to_hsv();
        assert_relative_eq!(hsv.hue, 120.0);
        assert_relative_eq!(hsv.saturation, 1.0);
        assert_relative_eq!(hsv.value, 1.0);
    }

    #[test]
    fn grays_have_zero_saturation() {
        let gray = Color::rgb(128, 128, 128);
        assert_relative_eq!(gray.to_hsl().saturation, 0.0);
        assert_relative_eq!(gray.to_hsv().saturation, 0.0);
        assert_eq!(Color::from_hsl(gray.to_hsl()), gray);
    }

    #[test]
    fn mixed_colors_round_trip_within_rounding() {
        for color in [
            Color::rgb(255, 128, 0),
            Color::rgb(12, 200, 87),
            Color::rgb(90, 33, 240),
            Color::rgb(1, 255, 254),
        ] {
            let back = Color::from_hsl(color.to_hsl());
            assert!(i16::from(back.r).abs_diff(i16::from(color.r)) <= 1);
            assert!(i16::from(back.g).abs_diff(i16::from(color.g)) <= 1);
            assert!(i16::from(back.b).abs_diff(i16::from(color.b)) <= 1);

            let back = Color::from_hsv(color.to_hsv());
            assert!(i16::from(back.r).abs_diff(i16::from(color.r)) <= 1);
            assert!(i16::from(back.g).abs_diff(i16::from(color.g)) <= 1);
            assert!(i16::from(back.b).abs_diff(i16::from(color.b)) <= 1);
        }
    }

    #[test]
    fn hue_wraps_into_the_circle() {
        let wrapped = Color::from_hsv(Hsv {
            hue: 480.0, // same as 120°
            saturation: 1.0,
            value: 1.0,
        });
        assert_eq!(wrapped, Color::GREEN);
    }

    #[test]
    fn pixel_format_raw_values_round_trip() {
        for format in [
            PixelFormat::Rgb24,
            PixelFormat::Rgb888,
            PixelFormat::Bgr888,
            PixelFormat::Argb8888,
            PixelFormat::Rgba8888,
            PixelFormat::Abgr8888,
            PixelFormat::Bgra8888,
        ] {
            assert_eq!(PixelFormat::from_raw(format.to_raw()), format);
        }
        assert_eq!(PixelFormat::from_raw(0xdead_beef), PixelFormat::Unknown);
    }

    #[test]
    fn pixel_format_sizes() {
        assert_eq!(PixelFormat::Rgb24.bits_per_pixel(), 24);
        assert_eq!(PixelFormat::Rgba8888.bits_per_pixel(), 32);
        assert_eq!(PixelFormat::Unknown.bits_per_pixel(), 0);
    }
}

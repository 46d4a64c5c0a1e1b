//! RGB color value shared by palettes, the lookup table, the legend raster
//! and per-vertex surface colors.
//!
//! Channels are `f32` in `[0, 1]`. Palettes are authored as `0xRRGGBB`
//! hex literals and decoded channel-wise without any gamma conversion, so
//! interpolation happens directly in the authored RGB space.

use bytemuck::{Pod, Zeroable};

/// An RGB color with `f32` channels in `[0, 1]`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Create a color from its three channels.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Decode a `0xRRGGBB` literal.
    #[must_use]
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Encode as `0xRRGGBB`, rounding each channel to 8 bits.
    #[must_use]
    pub fn to_hex(self) -> u32 {
        let [r, g, b, _] = self.to_rgba8();
        (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
    }

    /// Linear interpolation between `self` (t = 0) and `other` (t = 1).
    ///
    /// Written as a weighted sum so both endpoints are reproduced exactly.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let s = 1.0 - t;
        Self {
            r: self.r * s + other.r * t,
            g: self.g * s + other.g * t,
            b: self.b * s + other.b * t,
        }
    }

    /// Channels as an `[r, g, b]` array.
    #[must_use]
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Opaque 8-bit RGBA pixel.
    #[must_use]
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
            255,
        ]
    }
}

impl From<[f32; 3]> for Color {
    fn from([r, g, b]: [f32; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Color> for [f32; 3] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

fn channel_to_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

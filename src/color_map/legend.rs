/// One-pixel-tall RGBA8 raster for a color-bar legend.
///
/// Pixels are stored row-major as `[r, g, b, a]`, matching what a host
/// texture upload expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendStrip {
    width: usize,
    pixels: Vec<u8>,
}

impl LegendStrip {
    /// Channels per pixel.
    pub const CHANNELS: usize = 4;

    /// A transparent-black strip `width` pixels wide.
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            width,
            pixels: vec![0; width * Self::CHANNELS],
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels (always 1).
    #[must_use]
    pub fn height(&self) -> usize {
        1
    }

    /// Raw RGBA bytes.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The pixel at column `x`, if in bounds.
    #[must_use]
    pub fn pixel(&self, x: usize) -> Option<[u8; 4]> {
        let start = x.checked_mul(Self::CHANNELS)?;
        let end = start.checked_add(Self::CHANNELS)?;
        let px = self.pixels.get(start..end)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Overwrite the pixel at column `x`; out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: usize, rgba: [u8; 4]) {
        let Some(end) = x
            .checked_mul(Self::CHANNELS)
            .and_then(|start| start.checked_add(Self::CHANNELS))
        else {
            return;
        };
        if let Some(px) = self.pixels.get_mut(end - Self::CHANNELS..end) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Change the width, clearing every pixel.
    pub fn resize(&mut self, width: usize) {
        self.width = width;
        self.pixels.clear();
        self.pixels.resize(width * Self::CHANNELS, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_strip_is_zeroed() {
        let strip = LegendStrip::new(3);
        assert_eq!(strip.width(), 3);
        assert_eq!(strip.height(), 1);
        assert_eq!(strip.pixels(), &[0; 12]);
    }

    #[test]
    fn pixel_access_is_bounds_checked() {
        let mut strip = LegendStrip::new(2);
        strip.set_pixel(1, [1, 2, 3, 255]);
        strip.set_pixel(5, [9, 9, 9, 9]);
        assert_eq!(strip.pixel(1), Some([1, 2, 3, 255]));
        assert_eq!(strip.pixel(2), None);
    }

    #[test]
    fn huge_columns_are_out_of_bounds() {
        let mut strip = LegendStrip::new(2);
        assert_eq!(strip.pixel(usize::MAX / 4), None);
        assert_eq!(strip.pixel(usize::MAX), None);
        strip.set_pixel(usize::MAX / 4, [1; 4]);
        strip.set_pixel(usize::MAX, [1; 4]);
        assert!(strip.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn resize_clears() {
        let mut strip = LegendStrip::new(1);
        strip.set_pixel(0, [255; 4]);
        strip.resize(4);
        assert_eq!(strip.width(), 4);
        assert!(strip.pixels().iter().all(|&b| b == 0));
    }
}

//! Scalar-to-color mapping over named piecewise-linear palettes.
//!
//! A [`ColorMap`] samples its palette at `intervals + 1` evenly spaced
//! positions into a lookup table and answers [`ColorMap::get_color`] by
//! snapping the normalized value to the nearest table entry. The legend
//! raster instead re-walks the palette continuously, so a color bar stays
//! smooth even when the surface is colored in coarse bands.

/// One-pixel-tall RGBA legend raster.
pub mod legend;
/// Control points, palettes and the palette registry.
pub mod palette;

pub use legend::LegendStrip;
pub use palette::{ControlPoint, Palette, PaletteRegistry, DEFAULT_PALETTE};

use crate::color::Color;
use crate::error::MolEspError;
use crate::options::ColorMapOptions;

/// Discretized color lookup over a palette and a scalar range.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    palette: Palette,
    min_value: f64,
    max_value: f64,
    intervals: usize,
    lookup_table: Vec<Color>,
}

impl ColorMap {
    /// Build a color map from a built-in palette name.
    pub fn new(
        name: &str,
        min_value: f64,
        max_value: f64,
        intervals: usize,
    ) -> Result<Self, MolEspError> {
        let palette = Palette::builtin(name)
            .ok_or_else(|| MolEspError::UnknownPalette(name.to_owned()))?;
        Self::with_palette(palette, min_value, max_value, intervals)
    }

    /// Build a color map from an explicit palette.
    pub fn with_palette(
        palette: Palette,
        min_value: f64,
        max_value: f64,
        intervals: usize,
    ) -> Result<Self, MolEspError> {
        if intervals == 0 {
            return Err(MolEspError::InvalidIntervals(intervals));
        }
        let mut map = Self {
            palette,
            min_value,
            max_value,
            intervals,
            lookup_table: Vec::new(),
        };
        map.build_lookup();
        Ok(map)
    }

    /// Build a color map from configured options, resolving the palette
    /// name against `registry`.
    pub fn from_options(
        options: &ColorMapOptions,
        registry: &PaletteRegistry,
        min_value: f64,
        max_value: f64,
    ) -> Result<Self, MolEspError> {
        let palette = registry.resolve(&options.palette)?.clone();
        Self::with_palette(palette, min_value, max_value, options.intervals)
    }

    fn build_lookup(&mut self) {
        let n = self.intervals;
        let mut table = Vec::with_capacity(n + 1);
        table.push(self.palette.first_color());
        for i in 1..n {
            let alpha = i as f64 / n as f64;
            table.push(self.palette.sample_upper_closed(alpha));
        }
        table.push(self.palette.last_color());

        log::debug!(
            "rebuilt {:?} lookup: {} entries over [{}, {}]",
            self.palette.name(),
            table.len(),
            self.min_value,
            self.max_value
        );
        self.lookup_table = table;
    }

    /// Change the scalar domain and rebuild the lookup table.
    pub fn set_range(&mut self, min_value: f64, max_value: f64) {
        self.min_value = min_value;
        self.max_value = max_value;
        self.build_lookup();
    }

    /// Swap the palette and rebuild the lookup table.
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
        self.build_lookup();
    }

    /// Change the lookup resolution and rebuild the lookup table.
    pub fn set_intervals(&mut self, intervals: usize) -> Result<(), MolEspError> {
        if intervals == 0 {
            return Err(MolEspError::InvalidIntervals(intervals));
        }
        self.intervals = intervals;
        self.build_lookup();
        Ok(())
    }

    /// Map a scalar onto one of the lookup-table entries.
    ///
    /// Values outside `[min_value, max_value]` collapse onto the boundary
    /// colors. A degenerate range (`max <= min`) or a NaN value maps to the
    /// first entry.
    #[must_use]
    pub fn get_color(&self, value: f64) -> Color {
        let (lo, hi) = (self.min_value, self.max_value);
        let span = hi - lo;
        let alpha = if span > 0.0 && span.is_finite() && !value.is_nan() {
            (value.max(lo).min(hi) - lo) / span
        } else {
            0.0
        };

        let last = self.lookup_table.len().saturating_sub(1);
        let index = ((alpha * last as f64).round() as usize).min(last);
        self.lookup_table
            .get(index)
            .copied()
            .unwrap_or_else(|| self.palette.first_color())
    }

    /// Continuous palette color at normalized position `alpha`, as used by
    /// the legend gradient.
    #[must_use]
    pub fn gradient_color(&self, alpha: f64) -> Color {
        self.palette.sample_lower_closed(alpha)
    }

    /// A fresh legend strip, `intervals` wide, already rasterized.
    #[must_use]
    pub fn create_legend(&self) -> LegendStrip {
        let mut strip = LegendStrip::new(self.intervals);
        let _ = self.update_legend(&mut strip);
        strip
    }

    /// Rasterize the palette gradient into `strip`.
    ///
    /// Pixel `k` shows the palette at `k / intervals`. A strip of the wrong
    /// width is resized first.
    pub fn update_legend<'a>(
        &self,
        strip: &'a mut LegendStrip,
    ) -> &'a mut LegendStrip {
        if strip.width() != self.intervals {
            log::debug!(
                "resizing legend strip {} -> {}",
                strip.width(),
                self.intervals
            );
            strip.resize(self.intervals);
        }
        let n = self.intervals as f64;
        for k in 0..self.intervals {
            let color = self.gradient_color(k as f64 / n);
            strip.set_pixel(k, color.to_rgba8());
        }
        strip
    }

    /// The palette being sampled.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Lower bound of the scalar domain.
    #[must_use]
    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    /// Upper bound of the scalar domain.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// Lookup resolution.
    #[must_use]
    pub fn intervals(&self) -> usize {
        self.intervals
    }

    /// The discretized table (`intervals + 1` entries).
    #[must_use]
    pub fn lookup_table(&self) -> &[Color] {
        &self.lookup_table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cool_to_warm(intervals: usize) -> ColorMap {
        ColorMap::new(DEFAULT_PALETTE, 0.0, 1.0, intervals).unwrap()
    }

    #[test]
    fn table_length_is_intervals_plus_one() {
        for intervals in [1, 2, 3, 7, 11, 24, 100] {
            let mut map = cool_to_warm(intervals);
            assert_eq!(map.lookup_table().len(), intervals + 1);
            map.set_range(-3.0, 8.5);
            assert_eq!(map.lookup_table().len(), intervals + 1);
        }
    }

    #[test]
    fn table_ends_are_palette_ends() {
        let map = cool_to_warm(24);
        let table = map.lookup_table();
        assert_eq!(table[0].to_hex(), 0x3c4ec2);
        assert_eq!(table[24].to_hex(), 0xb40426);
    }

    #[test]
    fn midpoint_hits_middle_control_point() {
        let map = cool_to_warm(24);
        assert_eq!(map.get_color(0.5), map.lookup_table()[12]);
        assert_eq!(map.get_color(0.5), Color::from_hex(0xf0f0f0));
    }

    #[test]
    fn get_color_returns_only_table_entries() {
        let map = ColorMap::new(DEFAULT_PALETTE, -0.05, 0.07, 11).unwrap();
        for i in 0..=200 {
            let value = -0.05 + 0.12 * f64::from(i) / 200.0;
            let color = map.get_color(value);
            assert!(map.lookup_table().contains(&color), "value {value}");
        }
        assert_eq!(map.get_color(-0.05), map.lookup_table()[0]);
        assert_eq!(map.get_color(0.07), map.lookup_table()[11]);
    }

    #[test]
    fn out_of_range_values_clamp_to_boundaries() {
        let map = ColorMap::new(DEFAULT_PALETTE, 2.0, 4.0, 11).unwrap();
        assert_eq!(map.get_color(2.0 - 10.0), map.get_color(2.0));
        assert_eq!(map.get_color(4.0 + 10.0), map.get_color(4.0));
        assert_eq!(map.get_color(f64::NEG_INFINITY), map.get_color(2.0));
    }

    #[test]
    fn degenerate_range_and_nan_do_not_panic() {
        let mut map = cool_to_warm(11);
        map.set_range(1.0, 1.0);
        assert_eq!(map.get_color(1.0), map.lookup_table()[0]);
        map.set_range(5.0, -5.0);
        assert_eq!(map.get_color(0.0), map.lookup_table()[0]);
        map.set_range(0.0, 1.0);
        assert_eq!(map.get_color(f64::NAN), map.lookup_table()[0]);
    }

    #[test]
    fn rebuild_is_deterministic() {
        let mut map = cool_to_warm(24);
        map.set_range(-0.1, 0.1);
        let first = map.lookup_table().to_vec();
        map.set_range(-0.1, 0.1);
        assert_eq!(map.lookup_table(), first.as_slice());
        assert_eq!(cool_to_warm(24).lookup_table(), map.lookup_table());
    }

    #[test]
    fn zero_intervals_rejected() {
        assert!(matches!(
            ColorMap::new(DEFAULT_PALETTE, 0.0, 1.0, 0),
            Err(MolEspError::InvalidIntervals(0))
        ));
        let mut map = cool_to_warm(4);
        assert!(map.set_intervals(0).is_err());
        assert_eq!(map.intervals(), 4);
        map.set_intervals(6).unwrap();
        assert_eq!(map.lookup_table().len(), 7);
    }

    #[test]
    fn unknown_palette_rejected() {
        assert!(matches!(
            ColorMap::new("viridis", 0.0, 1.0, 11),
            Err(MolEspError::UnknownPalette(_))
        ));
    }

    #[test]
    fn legend_is_continuous_gradient() {
        let map = cool_to_warm(10);
        let strip = map.create_legend();
        assert_eq!(strip.width(), 10);
        assert_eq!(strip.pixel(0), Some(Color::from_hex(0x3c4ec2).to_rgba8()));
        assert_eq!(strip.pixel(2), Some(Color::from_hex(0x9bbcff).to_rgba8()));
        assert_eq!(strip.pixel(5), Some(Color::from_hex(0xf0f0f0).to_rgba8()));
        assert_eq!(strip.pixel(8), Some(Color::from_hex(0xf6a385).to_rgba8()));
        assert!(strip.pixels().chunks(4).all(|px| px[3] == 255));
    }

    #[test]
    fn legend_resizes_mismatched_strip() {
        let map = cool_to_warm(24);
        let mut strip = LegendStrip::new(3);
        let width = map.update_legend(&mut strip).width();
        assert_eq!(width, 24);
        assert_eq!(strip, map.create_legend());
    }

    #[test]
    fn legend_matches_lookup_off_control_points() {
        // 3/11 lies inside the 0.2..0.5 segment, where both sampling rules
        // pick the same segment.
        let map = cool_to_warm(11);
        let strip = map.create_legend();
        assert_eq!(strip.pixel(3), Some(map.lookup_table()[3].to_rgba8()));
    }
}

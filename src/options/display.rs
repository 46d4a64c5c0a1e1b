use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::color::Color;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Display toggles and surface appearance.
pub struct DisplayOptions {
    /// Draw the atoms of the molecule.
    #[schemars(title = "Show Molecule")]
    pub show_molecule: bool,
    /// Draw the ESP surface.
    #[schemars(title = "Show Surface")]
    pub show_surface: bool,
    /// Surface opacity.
    #[schemars(title = "Surface Opacity", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub surface_opacity: f32,
    /// Clear color (linear RGB).
    #[schemars(skip)]
    pub background_color: [f32; 3],
    /// Upper bound on the device pixel ratio used for the backbuffer.
    #[schemars(skip)]
    pub max_pixel_ratio: f32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_molecule: true,
            show_surface: true,
            surface_opacity: 0.7,
            background_color: [0.96, 0.96, 0.96],
            max_pixel_ratio: 2.0,
        }
    }
}

impl DisplayOptions {
    /// Clear color for the viewport.
    #[must_use]
    pub fn clear_color(&self) -> Color {
        Color::from(self.background_color)
    }

    /// Device pixel ratio capped at `max_pixel_ratio`.
    ///
    /// A non-positive or non-finite device ratio counts as 1; a
    /// non-positive or NaN cap disables capping.
    #[must_use]
    pub fn pixel_ratio(&self, device_ratio: f64) -> f64 {
        let device_ratio = if device_ratio.is_finite() && device_ratio > 0.0 {
            device_ratio
        } else {
            1.0
        };
        let max = f64::from(self.max_pixel_ratio);
        if max > 0.0 {
            device_ratio.min(max)
        } else {
            device_ratio
        }
    }

    /// Backbuffer size for a window of `width` x `height` physical pixels
    /// at `scale_factor` physical pixels per logical pixel.
    #[must_use]
    pub fn backbuffer_size(
        &self,
        width: u32,
        height: u32,
        scale_factor: f64,
    ) -> (u32, u32) {
        let scale_factor = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor
        } else {
            1.0
        };
        let ratio = self.pixel_ratio(scale_factor) / scale_factor;
        let scale = |px: u32| ((f64::from(px) * ratio).round() as u32).max(1);
        (scale(width), scale(height))
    }
}

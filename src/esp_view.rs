//! ESP display state for a loaded molecule.
//!
//! [`EspView`] holds what the viewer's options panel edits: which ESP
//! series is shown, the value range mapped onto the palette, and the
//! molecule/surface visibility toggles. It keeps the per-vertex surface
//! colors and the legend raster in sync with those settings so the host
//! only has to upload them.
//!
//! Every mutating call returns whether anything visible changed, i.e.
//! whether the host should request a redraw. With no molecule loaded all
//! of them are no-ops returning `false`.

use crate::color_map::{ColorMap, LegendStrip, PaletteRegistry};
use crate::error::MolEspError;
use crate::molecule::EspMolecule;
use crate::options::{DisplayOptions, Options};

/// Values edited through the options panel.
#[derive(Debug, Clone, PartialEq)]
pub struct EspControlsState {
    /// Index into the sorted ESP series names.
    pub series_index: usize,
    /// Lower end of the mapped ESP range.
    pub min_esp: f64,
    /// Upper end of the mapped ESP range.
    pub max_esp: f64,
    /// Whether atoms are drawn.
    pub show_molecule: bool,
    /// Whether the ESP surface is drawn.
    pub show_surface: bool,
    /// Surface opacity in `[0, 1]`.
    pub surface_opacity: f32,
}

impl Default for EspControlsState {
    fn default() -> Self {
        Self::from_display(&DisplayOptions::default())
    }
}

impl EspControlsState {
    /// Initial state for the given display options.
    #[must_use]
    pub fn from_display(display: &DisplayOptions) -> Self {
        Self {
            series_index: 0,
            min_esp: 0.0,
            max_esp: 1.0,
            show_molecule: display.show_molecule,
            show_surface: display.show_surface,
            surface_opacity: display.surface_opacity.clamp(0.0, 1.0),
        }
    }
}

/// ESP series selection, range, colors and legend for one molecule.
#[derive(Debug, Clone)]
pub struct EspView {
    molecule: Option<EspMolecule>,
    color_map: ColorMap,
    legend: LegendStrip,
    defaults: EspControlsState,
    state: EspControlsState,
    surface_colors: Vec<f32>,
}

impl EspView {
    /// Empty view using `color_map`, resetting to `defaults` on every new
    /// molecule.
    #[must_use]
    pub fn new(color_map: ColorMap, defaults: EspControlsState) -> Self {
        let legend = color_map.create_legend();
        Self {
            molecule: None,
            color_map,
            legend,
            state: defaults.clone(),
            defaults,
            surface_colors: Vec::new(),
        }
    }

    /// Empty view configured from options, resolving the palette against
    /// the built-in registry.
    pub fn from_options(options: &Options) -> Result<Self, MolEspError> {
        let registry = PaletteRegistry::with_builtins();
        Self::from_options_with_registry(options, &registry)
    }

    /// Empty view configured from options, resolving the palette against
    /// `registry`.
    pub fn from_options_with_registry(
        options: &Options,
        registry: &PaletteRegistry,
    ) -> Result<Self, MolEspError> {
        let color_map =
            ColorMap::from_options(&options.color_map, registry, 0.0, 1.0)?;
        Ok(Self::new(
            color_map,
            EspControlsState::from_display(&options.display),
        ))
    }

    // ── Accessors ──

    /// The loaded molecule, if any.
    #[must_use]
    pub fn molecule(&self) -> Option<&EspMolecule> {
        self.molecule.as_ref()
    }

    /// Current panel state.
    #[must_use]
    pub fn state(&self) -> &EspControlsState {
        &self.state
    }

    /// The color map (range tracks the panel state).
    #[must_use]
    pub fn color_map(&self) -> &ColorMap {
        &self.color_map
    }

    /// Color-bar raster for the current palette.
    #[must_use]
    pub fn legend(&self) -> &LegendStrip {
        &self.legend
    }

    /// Flattened per-vertex `r, g, b` colors for the selected series.
    #[must_use]
    pub fn surface_colors(&self) -> &[f32] {
        &self.surface_colors
    }

    /// Name of the selected ESP series.
    #[must_use]
    pub fn selected_series(&self) -> Option<&str> {
        self.molecule
            .as_ref()?
            .series_names()
            .get(self.state.series_index)
            .copied()
    }

    /// Min/max legend labels, four decimals each.
    #[must_use]
    pub fn range_labels(&self) -> (String, String) {
        (
            format!("{:.4}", self.state.min_esp),
            format!("{:.4}", self.state.max_esp),
        )
    }

    // ── Molecule ──

    /// Replace the molecule, resetting panel state to its defaults and the
    /// range to the span of every series. `None` just clears.
    pub fn set_molecule(&mut self, molecule: Option<EspMolecule>) -> bool {
        let had_molecule = self.molecule.take().is_some();
        self.state = self.defaults.clone();
        self.surface_colors.clear();

        let Some(molecule) = molecule else {
            return had_molecule;
        };
        log::debug!(
            "showing molecule with series {:?}",
            molecule.series_names()
        );
        self.molecule = Some(molecule);

        let _ = self.reset_range_to_all();
        true
    }

    /// Take the molecule out, leaving the view empty.
    pub fn clear(&mut self) -> bool {
        self.set_molecule(None)
    }

    // ── Panel edits ──

    /// Show the series at `index` in sorted-name order.
    pub fn select_series(&mut self, index: usize) -> bool {
        let Some(molecule) = &self.molecule else {
            return false;
        };
        if index >= molecule.esp.len() {
            log::warn!(
                "ESP series index {index} out of range ({} series)",
                molecule.esp.len()
            );
            return false;
        }
        self.state.series_index = index;
        self.recolor_surface();
        true
    }

    /// Map `[min, max]` onto the palette.
    pub fn set_esp_range(&mut self, min: f64, max: f64) -> bool {
        if self.molecule.is_none() {
            return false;
        }
        self.state.min_esp = min;
        self.state.max_esp = max;
        self.color_map.set_range(min, max);
        let _ = self.color_map.update_legend(&mut self.legend);
        log::debug!("ESP range set to [{min}, {max}]");
        self.recolor_surface();
        true
    }

    /// Reset the range to the span of every series.
    pub fn reset_range_to_all(&mut self) -> bool {
        let Some(molecule) = &self.molecule else {
            return false;
        };
        let (min, max) = molecule.esp_range(None);
        self.set_esp_range(min, max)
    }

    /// Reset the range to the span of the selected series.
    pub fn reset_range_to_current(&mut self) -> bool {
        let Some(name) = self.selected_series() else {
            return false;
        };
        let (min, max) = self
            .molecule
            .as_ref()
            .map_or(crate::molecule::EMPTY_RANGE, |m| m.esp_range(Some(name)));
        self.set_esp_range(min, max)
    }

    /// Toggle atom drawing.
    pub fn set_show_molecule(&mut self, show: bool) -> bool {
        if self.molecule.is_none() || self.state.show_molecule == show {
            return false;
        }
        self.state.show_molecule = show;
        true
    }

    /// Toggle surface drawing.
    pub fn set_show_surface(&mut self, show: bool) -> bool {
        if self.molecule.is_none() || self.state.show_surface == show {
            return false;
        }
        self.state.show_surface = show;
        true
    }

    /// Set surface opacity, clamped to `[0, 1]`.
    pub fn set_surface_opacity(&mut self, opacity: f32) -> bool {
        if self.molecule.is_none() || opacity.is_nan() {
            return false;
        }
        let opacity = opacity.clamp(0.0, 1.0);
        if self.state.surface_opacity == opacity {
            return false;
        }
        self.state.surface_opacity = opacity;
        true
    }

    fn recolor_surface(&mut self) {
        self.surface_colors.clear();
        let Some(molecule) = &self.molecule else {
            return;
        };
        let Some(values) = molecule
            .series_names()
            .get(self.state.series_index)
            .and_then(|name| molecule.series(name))
        else {
            return;
        };
        self.surface_colors.reserve(values.len() * 3);
        for &value in values {
            self.surface_colors
                .extend_from_slice(&self.color_map.get_color(value).to_array());
        }
    }
}

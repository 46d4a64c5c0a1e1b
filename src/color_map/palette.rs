//! Named piecewise-linear palettes and the registry that validates them.

use rustc_hash::FxHashMap;

use crate::color::Color;
use crate::error::MolEspError;

/// Name of the palette used for ESP surfaces unless configured otherwise.
pub const DEFAULT_PALETTE: &str = "cool-to-warm";

/// Built-in palettes as `(position, 0xRRGGBB)` stops.
const BUILTIN_PALETTES: &[(&str, &[(f64, u32)])] = &[
    (
        "cool-to-warm",
        &[
            (0.0, 0x3c4ec2),
            (0.2, 0x9bbcff),
            (0.5, 0xf0f0f0),
            (0.8, 0xf6a385),
            (1.0, 0xb40426),
        ],
    ),
    (
        "rainbow",
        &[
            (0.0, 0x0000ff),
            (0.2, 0x00ffff),
            (0.5, 0x00ff00),
            (0.8, 0xffff00),
            (1.0, 0xff0000),
        ],
    ),
    (
        "blackbody",
        &[
            (0.0, 0x000000),
            (0.2, 0x780000),
            (0.5, 0xe63200),
            (0.8, 0xffff00),
            (1.0, 0xffffff),
        ],
    ),
    (
        "grayscale",
        &[
            (0.0, 0x000000),
            (0.2, 0x404040),
            (0.5, 0x7f7f80),
            (0.8, 0xbfbfbf),
            (1.0, 0xffffff),
        ],
    ),
];

/// A `(position, color)` stop of a palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    /// Normalized position in `[0, 1]`.
    pub position: f64,
    /// Color at this position.
    pub color: Color,
}

impl ControlPoint {
    /// Create a control point from a position and a `0xRRGGBB` literal.
    #[must_use]
    pub fn from_hex(position: f64, hex: u32) -> Self {
        Self {
            position,
            color: Color::from_hex(hex),
        }
    }
}

/// A validated palette.
///
/// Positions are finite and strictly increasing, the first is exactly 0
/// and the last exactly 1, so every `alpha` in `[0, 1]` falls into a
/// segment of non-zero width.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    name: String,
    points: Vec<ControlPoint>,
}

impl Palette {
    /// Validate control points and build a palette.
    pub fn new(
        name: impl Into<String>,
        points: Vec<ControlPoint>,
    ) -> Result<Self, MolEspError> {
        let name = name.into();
        validate(&name, &points)?;
        Ok(Self { name, points })
    }

    /// Build a palette from `(position, 0xRRGGBB)` stops.
    pub fn from_hex_stops(
        name: impl Into<String>,
        stops: &[(f64, u32)],
    ) -> Result<Self, MolEspError> {
        let points = stops
            .iter()
            .map(|&(position, hex)| ControlPoint::from_hex(position, hex))
            .collect();
        Self::new(name, points)
    }

    /// Look up one of the built-in palettes by name.
    #[must_use]
    pub fn builtin(name: &str) -> Option<Self> {
        BUILTIN_PALETTES
            .iter()
            .find(|(builtin, _)| *builtin == name)
            .and_then(|(builtin, stops)| {
                Self::from_hex_stops(*builtin, stops).ok()
            })
    }

    /// Palette name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Control points in increasing position order.
    #[must_use]
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Color of the first control point (position 0).
    #[must_use]
    pub fn first_color(&self) -> Color {
        self.points.first().map_or(Color::BLACK, |p| p.color)
    }

    /// Color of the last control point (position 1).
    #[must_use]
    pub fn last_color(&self) -> Color {
        self.points.last().map_or(Color::BLACK, |p| p.color)
    }

    /// Sample the segment with `p_j < alpha <= p_{j+1}`.
    ///
    /// This is the rule the lookup table is built with; `alpha = 0` has no
    /// such segment and yields the first color.
    #[must_use]
    pub fn sample_upper_closed(&self, alpha: f64) -> Color {
        self.points
            .windows(2)
            .find(|seg| alpha > seg[0].position && alpha <= seg[1].position)
            .map_or_else(
                || self.boundary_color(alpha),
                |seg| interpolate(seg[0], seg[1], alpha),
            )
    }

    /// Sample the segment with `p_j <= alpha < p_{j+1}`.
    ///
    /// This is the rule the legend gradient is rasterized with; `alpha = 1`
    /// has no such segment and yields the last color.
    #[must_use]
    pub fn sample_lower_closed(&self, alpha: f64) -> Color {
        self.points
            .windows(2)
            .find(|seg| alpha >= seg[0].position && alpha < seg[1].position)
            .map_or_else(
                || self.boundary_color(alpha),
                |seg| interpolate(seg[0], seg[1], alpha),
            )
    }

    fn boundary_color(&self, alpha: f64) -> Color {
        if alpha > 0.5 {
            self.last_color()
        } else {
            self.first_color()
        }
    }
}

fn interpolate(lo: ControlPoint, hi: ControlPoint, alpha: f64) -> Color {
    let t = (alpha - lo.position) / (hi.position - lo.position);
    lo.color.lerp(hi.color, t as f32)
}

fn validate(name: &str, points: &[ControlPoint]) -> Result<(), MolEspError> {
    let invalid =
        |reason: String| MolEspError::InvalidPalette(format!("{name}: {reason}"));

    if points.len() < 2 {
        return Err(invalid(format!(
            "needs at least 2 control points, got {}",
            points.len()
        )));
    }
    if let Some(bad) = points.iter().position(|p| {
        !p.position.is_finite()
            || !p.color.r.is_finite()
            || !p.color.g.is_finite()
            || !p.color.b.is_finite()
    }) {
        return Err(invalid(format!("control point {bad} is not finite")));
    }

    let first = points[0].position;
    let last = points[points.len() - 1].position;
    if first != 0.0 {
        return Err(invalid(format!("first position must be 0, got {first}")));
    }
    if last != 1.0 {
        return Err(invalid(format!("last position must be 1, got {last}")));
    }

    for (j, seg) in points.windows(2).enumerate() {
        if seg[1].position <= seg[0].position {
            return Err(invalid(format!(
                "positions must strictly increase (segment {j}: {} -> {})",
                seg[0].position, seg[1].position
            )));
        }
    }
    Ok(())
}

/// Palettes addressable by name.
///
/// Registration validates eagerly so a malformed palette is rejected
/// before any color map can be built from it.
#[derive(Debug, Clone, Default)]
pub struct PaletteRegistry {
    palettes: FxHashMap<String, Palette>,
}

impl PaletteRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with every built-in palette.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, _) in BUILTIN_PALETTES {
            if let Some(palette) = Palette::builtin(name) {
                registry.insert(palette);
            }
        }
        registry
    }

    /// Validate and register control points under `name`, replacing any
    /// palette previously registered with that name.
    pub fn register(
        &mut self,
        name: &str,
        points: Vec<ControlPoint>,
    ) -> Result<&Palette, MolEspError> {
        let palette = Palette::new(name, points)?;
        log::debug!(
            "registered palette {name:?} ({} control points)",
            palette.points().len()
        );
        let _ = self.palettes.insert(name.to_owned(), palette);
        self.get(name)
            .ok_or_else(|| MolEspError::UnknownPalette(name.to_owned()))
    }

    /// Register an already-validated palette under its own name.
    pub fn insert(&mut self, palette: Palette) {
        let _ = self.palettes.insert(palette.name().to_owned(), palette);
    }

    /// Look up a palette by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Palette> {
        self.palettes.get(name)
    }

    /// Look up a palette by name, failing with [`MolEspError::UnknownPalette`].
    pub fn resolve(&self, name: &str) -> Result<&Palette, MolEspError> {
        self.get(name)
            .ok_or_else(|| MolEspError::UnknownPalette(name.to_owned()))
    }

    /// Registered palette names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> =
            self.palettes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

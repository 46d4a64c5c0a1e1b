//! ESP molecule payload: atoms, a triangulated surface and one or more
//! named series of per-vertex electrostatic-potential values.
//!
//! The JSON layout is
//!
//! ```json
//! {
//!   "atomic_numbers": [8, 1, 1],
//!   "conformer": [0.0, 0.0, 0.0, 0.96, 0.0, 0.0, -0.24, 0.93, 0.0],
//!   "surface": { "vertices": [..], "indices": [..] },
//!   "esp": { "QC ESP": [..] }
//! }
//! ```
//!
//! with coordinates flattened as `x, y, z` triples in Ångström and the
//! surface indices flattened as triangles. Unknown fields are rejected.

use std::collections::BTreeMap;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::MolEspError;

/// Range reported when there are no ESP values to measure.
pub const EMPTY_RANGE: (f64, f64) = (0.0, 1.0);

/// Atom spheres are drawn at this fraction of the covalent radius.
pub const ATOM_RADIUS_SCALE: f32 = 0.5;

/// Covalent radius (Å) and display color per atomic number. Entry 0 is
/// the style for elements without their own entry.
const ELEMENT_STYLES: &[(u32, f32, u32)] = &[
    (0, 0.31, 0x000000),
    (1, 0.31, 0xffffff),
    (6, 0.76, 0x909090),
    (7, 0.71, 0x3050f8),
    (8, 0.66, 0xff0d0d),
    (9, 0.57, 0x90e050),
    (15, 1.07, 0xff8000),
    (16, 1.05, 0xffff30),
    (17, 1.02, 0x1ff01f),
    (35, 1.2, 0xa62929),
];

/// Covalent radius and display color for an element.
///
/// Elements outside the table share the entry for atomic number 0.
#[must_use]
pub fn element_style(atomic_number: u32) -> (f32, Color) {
    let &(_, radius, hex) = ELEMENT_STYLES
        .iter()
        .find(|(z, _, _)| *z == atomic_number)
        .unwrap_or(&ELEMENT_STYLES[0]);
    (radius, Color::from_hex(hex))
}

/// One atom ready to be drawn as a sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomSphere {
    /// Center in Ångström.
    pub position: Vec3,
    /// Sphere radius (scaled covalent radius).
    pub radius: f32,
    /// Element color.
    pub color: Color,
}

/// Triangulated molecular surface.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Surface {
    /// Flattened `x, y, z` vertex positions.
    pub vertices: Vec<f32>,
    /// Flattened triangle vertex indices.
    pub indices: Vec<u32>,
}

impl Surface {
    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex positions as vectors.
    #[must_use]
    pub fn vertex_positions(&self) -> Vec<Vec3> {
        self.vertices
            .chunks_exact(3)
            .map(|c| Vec3::new(c[0], c[1], c[2]))
            .collect()
    }
}

/// A molecule with its ESP surface.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EspMolecule {
    /// Atomic number per atom.
    pub atomic_numbers: Vec<u32>,
    /// Flattened `x, y, z` atom positions.
    pub conformer: Vec<f32>,
    /// Surface the ESP is sampled on.
    pub surface: Surface,
    /// Per-vertex ESP values keyed by series name.
    pub esp: BTreeMap<String, Vec<f64>>,
}

impl EspMolecule {
    /// Decode and validate a JSON payload.
    pub fn from_json_str(json: &str) -> Result<Self, MolEspError> {
        let molecule: Self = serde_json::from_str(json)
            .map_err(|e| MolEspError::MoleculeParse(e.to_string()))?;
        molecule.validate()?;
        Ok(molecule)
    }

    /// Read, decode and validate a JSON file.
    pub fn load(path: &Path) -> Result<Self, MolEspError> {
        let content = std::fs::read_to_string(path)?;
        let molecule = Self::from_json_str(&content)?;
        log::info!(
            "loaded {}: {} atoms, {} surface vertices, {} ESP series",
            path.display(),
            molecule.atom_count(),
            molecule.vertex_count(),
            molecule.esp.len()
        );
        Ok(molecule)
    }

    /// Check that coordinates, triangles and ESP series agree in size.
    pub fn validate(&self) -> Result<(), MolEspError> {
        let invalid = |msg: String| Err(MolEspError::InvalidMolecule(msg));

        if self.conformer.len() != self.atomic_numbers.len() * 3 {
            return invalid(format!(
                "conformer has {} coordinates for {} atoms",
                self.conformer.len(),
                self.atomic_numbers.len()
            ));
        }
        if self.surface.vertices.len() % 3 != 0 {
            return invalid(format!(
                "surface vertex array length {} is not a multiple of 3",
                self.surface.vertices.len()
            ));
        }
        if self.surface.indices.len() % 3 != 0 {
            return invalid(format!(
                "surface index array length {} is not a multiple of 3",
                self.surface.indices.len()
            ));
        }
        let vertex_count = self.vertex_count();
        if let Some(&bad) = self
            .surface
            .indices
            .iter()
            .find(|&&i| i as usize >= vertex_count)
        {
            return invalid(format!(
                "triangle index {bad} out of range for {vertex_count} vertices"
            ));
        }
        for (name, values) in &self.esp {
            if values.len() != vertex_count {
                return invalid(format!(
                    "ESP series {name:?} has {} values for {vertex_count} vertices",
                    values.len()
                ));
            }
        }
        Ok(())
    }

    /// Number of atoms.
    #[must_use]
    pub fn atom_count(&self) -> usize {
        self.atomic_numbers.len()
    }

    /// Number of surface vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.surface.vertex_count()
    }

    /// Atom positions as vectors.
    #[must_use]
    pub fn atom_positions(&self) -> Vec<Vec3> {
        self.conformer
            .chunks_exact(3)
            .map(|c| Vec3::new(c[0], c[1], c[2]))
            .collect()
    }

    /// Per-atom spheres styled by element.
    #[must_use]
    pub fn atom_spheres(&self) -> Vec<AtomSphere> {
        self.atomic_numbers
            .iter()
            .zip(self.atom_positions())
            .map(|(&z, position)| {
                let (radius, color) = element_style(z);
                AtomSphere {
                    position,
                    radius: radius * ATOM_RADIUS_SCALE,
                    color,
                }
            })
            .collect()
    }

    /// Mean atom position, or the origin for an empty molecule.
    #[must_use]
    pub fn centroid(&self) -> Vec3 {
        let positions = self.atom_positions();
        if positions.is_empty() {
            return Vec3::ZERO;
        }
        positions.iter().copied().sum::<Vec3>() / positions.len() as f32
    }

    /// Largest atom distance from the centroid.
    #[must_use]
    pub fn bounding_radius(&self) -> f32 {
        let centroid = self.centroid();
        self.atom_positions()
            .iter()
            .map(|p| (*p - centroid).length())
            .fold(0.0f32, f32::max)
    }

    /// ESP series names in sorted order.
    #[must_use]
    pub fn series_names(&self) -> Vec<&str> {
        self.esp.keys().map(String::as_str).collect()
    }

    /// Values of one ESP series.
    #[must_use]
    pub fn series(&self, name: &str) -> Option<&[f64]> {
        self.esp.get(name).map(Vec::as_slice)
    }

    /// Finite min/max of one series, or of every series when `name` is
    /// `None`. Falls back to [`EMPTY_RANGE`] when there is nothing to
    /// measure.
    #[must_use]
    pub fn esp_range(&self, name: Option<&str>) -> (f64, f64) {
        let values: Box<dyn Iterator<Item = &f64>> = match name {
            Some(name) => match self.esp.get(name) {
                Some(values) => Box::new(values.iter()),
                None => {
                    log::warn!("no ESP series named {name:?}");
                    return EMPTY_RANGE;
                }
            },
            None => Box::new(self.esp.values().flatten()),
        };

        let (min, max) = values
            .copied()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if min > max {
            EMPTY_RANGE
        } else {
            (min, max)
        }
    }
}

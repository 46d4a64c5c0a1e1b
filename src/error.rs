//! Crate-level error types.

use std::fmt;

/// Errors produced by the molesp crate.
#[derive(Debug)]
pub enum MolEspError {
    /// Palette control points fail validation.
    InvalidPalette(String),
    /// No palette is registered under the requested name.
    UnknownPalette(String),
    /// A color map needs at least one lookup interval.
    InvalidIntervals(usize),
    /// Molecule payload is internally inconsistent.
    InvalidMolecule(String),
    /// Molecule JSON could not be decoded.
    MoleculeParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for MolEspError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPalette(msg) => write!(f, "invalid palette: {msg}"),
            Self::UnknownPalette(name) => {
                write!(f, "unknown palette: {name:?}")
            }
            Self::InvalidIntervals(n) => {
                write!(f, "color map needs at least 1 interval, got {n}")
            }
            Self::InvalidMolecule(msg) => {
                write!(f, "invalid molecule: {msg}")
            }
            Self::MoleculeParse(msg) => {
                write!(f, "molecule parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for MolEspError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MolEspError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

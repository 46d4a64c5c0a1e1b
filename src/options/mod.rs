//! Centralized viewer options with TOML preset support.
//!
//! Camera tunables, color map choice and display toggles are consolidated
//! here. Options serialize to/from TOML so a view setup can be saved as a
//! preset and reloaded.

mod camera;
mod color_map;
mod display;

use std::path::Path;

pub use camera::CameraOptions;
pub use color_map::ColorMapOptions;
pub use display::DisplayOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::MolEspError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection and control parameters.
    pub camera: CameraOptions,
    /// ESP color map parameters.
    pub color_map: ColorMapOptions,
    /// Display toggles and surface appearance.
    pub display: DisplayOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, MolEspError> {
        toml::from_str(content)
            .map_err(|e| MolEspError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, MolEspError> {
        let content = std::fs::read_to_string(path).map_err(MolEspError::Io)?;
        let options = Self::from_toml_str(&content)?;
        log::debug!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), MolEspError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MolEspError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(MolEspError::Io)?;
        }
        std::fs::write(path, content).map_err(MolEspError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

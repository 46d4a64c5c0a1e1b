use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::color_map::DEFAULT_PALETTE;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Color Map", inline)]
#[serde(default)]
/// ESP color map parameters.
pub struct ColorMapOptions {
    /// Registered palette name.
    #[schemars(title = "Palette")]
    pub palette: String,
    /// Number of discrete color bands on the surface.
    #[schemars(title = "Bands", range(min = 1, max = 256))]
    pub intervals: usize,
}

impl Default for ColorMapOptions {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.to_owned(),
            intervals: 24,
        }
    }
}

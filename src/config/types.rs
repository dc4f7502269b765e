use serde::{Deserialize, Serialize};

use crate::grid::DEFAULT_MAX_WIDTH;
use crate::tile::DEFAULT_EXTENSION;

/// PNG compression level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompressConfig {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression ("max")
    Max(String),
}

/// Tile sheet configuration file structure.
///
/// All paths in the config are relative to the config file location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TilesheetConfig {
    /// Config file version (currently 1)
    pub version: u32,
    /// Directory scanned for tiles
    pub input_dir: String,
    /// Tile sheet image to write
    pub output_file: String,
    /// Tile file extension, matched case-sensitively
    pub extension: String,
    /// Padding around each tile in pixels
    pub padding: u32,
    /// Maximum atlas width in pixels
    pub max_width: u32,
    /// Canvas fill: transparent, white, black, #RRGGBB or #RRGGBBAA
    pub background: String,
    /// JSON file receiving the tile placement mapping (optional)
    pub metadata: Option<String>,
    /// PNG compression configuration (optional)
    pub compress: Option<CompressConfig>,
}

impl Default for TilesheetConfig {
    fn default() -> Self {
        Self {
            version: 1,
            input_dir: "tiles".to_string(),
            output_file: "tilesheet.png".to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            padding: 0,
            max_width: DEFAULT_MAX_WIDTH,
            background: "transparent".to_string(),
            metadata: None,
            compress: None,
        }
    }
}

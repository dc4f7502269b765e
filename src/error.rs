use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TilesheetError {
    #[error("Failed to load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to save image '{path}': {source}")]
    ImageSave {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("No tiles to pack")]
    NoTiles,

    #[error(
        "Tile '{path}' is {actual_width}x{actual_height}, expected {expected_width}x{expected_height} like the first tile"
    )]
    SizeMismatch {
        path: PathBuf,
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("Cell width {cell_width} (tile plus padding) exceeds maximum atlas width {max_width}")]
    TileTooWide { cell_width: u32, max_width: u32 },

    #[error("Atlas of {columns}x{rows} cells of {cell_width}x{cell_height} does not fit in memory")]
    CanvasTooLarge {
        columns: u32,
        rows: u32,
        cell_width: u32,
        cell_height: u32,
    },

    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to remove existing output file '{path}': {source}")]
    OutputRemove {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to compress PNG '{path}': {message}")]
    PngCompress { path: PathBuf, message: String },

    #[error("Input path does not exist: {0}")]
    InputNotFound(PathBuf),

    #[error("Invalid shape manifest '{path}': {message}")]
    InvalidManifest { path: PathBuf, message: String },

    #[error(
        "Invalid background '{0}'. Valid values: transparent, white, black, #RRGGBB, #RRGGBBAA"
    )]
    InvalidBackground(String),
}

use image::RgbaImage;
use std::path::PathBuf;

/// A decoded source tile
#[derive(Debug, Clone)]
pub struct Tile {
    /// Original file path
    pub path: PathBuf,
    /// Display name, relative to the discovery root when known
    pub name: String,
    /// Decoded pixels
    pub image: RgbaImage,
}

impl Tile {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

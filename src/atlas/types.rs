use image::RgbaImage;
use serde::Serialize;

use super::Background;
use crate::grid::{GridGeometry, Rect};

/// A completed tile sheet
#[derive(Debug)]
pub struct Atlas {
    /// Atlas width
    pub width: u32,
    /// Atlas height
    pub height: u32,
    /// Grid the tiles were laid out on
    pub geometry: GridGeometry,
    /// Rendered atlas image
    pub image: RgbaImage,
    /// Tiles in input order
    pub tiles: Vec<PlacedTile>,
}

impl Atlas {
    pub fn new(geometry: GridGeometry, width: u32, height: u32, background: Background) -> Self {
        Self {
            width,
            height,
            geometry,
            image: RgbaImage::from_pixel(width, height, background.rgba()),
            tiles: Vec::new(),
        }
    }
}

/// Where one input tile ended up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedTile {
    /// Position in the input sequence
    pub index: usize,
    /// Tile name
    pub name: String,
    pub column: u32,
    pub row: u32,
    /// Tile pixels inside the atlas, padding excluded
    pub frame: Rect,
}

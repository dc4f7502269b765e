use anyhow::Result;
use image::imageops;

use super::{Atlas, Background, PlacedTile};
use crate::error::TilesheetError;
use crate::grid::{DEFAULT_MAX_WIDTH, GridGeometry, Rect};
use crate::observer::PackObserver;
use crate::tile::Tile;

/// Configuration for tile sheet building
#[derive(Debug, Clone)]
pub struct AtlasBuilder {
    pub max_width: u32,
    pub padding: u32,
    pub background: Background,
}

impl Default for AtlasBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WIDTH)
    }
}

impl AtlasBuilder {
    pub fn new(max_width: u32) -> Self {
        Self {
            max_width,
            padding: 0,
            background: Background::default(),
        }
    }

    pub fn padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    pub fn background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    /// Lay the tiles out on a grid in input order.
    ///
    /// The first tile's size is authoritative; every other tile must match it.
    pub fn build(&self, tiles: &[Tile], observer: &dyn PackObserver) -> Result<Atlas> {
        let first = tiles.first().ok_or(TilesheetError::NoTiles)?;
        let (tile_width, tile_height) = (first.width(), first.height());

        for tile in tiles {
            if tile.width() != tile_width || tile.height() != tile_height {
                return Err(TilesheetError::SizeMismatch {
                    path: tile.path.clone(),
                    expected_width: tile_width,
                    expected_height: tile_height,
                    actual_width: tile.width(),
                    actual_height: tile.height(),
                }
                .into());
            }
        }

        let geometry = GridGeometry::compute(
            tiles.len(),
            tile_width,
            tile_height,
            self.padding,
            self.max_width,
        )?;
        observer.grid_computed(&geometry);
        debug_assert!(geometry.capacity() >= tiles.len() as u64);

        let (width, height) = geometry.canvas_size()?;
        let mut atlas = Atlas::new(geometry, width, height, self.background);
        let canvas = Rect::new(0, 0, width, height);

        let mut column = 0;
        let mut row = 0;
        for (index, tile) in tiles.iter().enumerate() {
            let frame = geometry.cell_rect(column, row).inset(self.padding);
            debug_assert!(canvas.contains(&frame));
            debug_assert!(
                atlas
                    .tiles
                    .last()
                    .is_none_or(|prev| !prev.frame.intersects(&frame))
            );

            imageops::replace(
                &mut atlas.image,
                &tile.image,
                i64::from(frame.x),
                i64::from(frame.y),
            );

            let placed = PlacedTile {
                index,
                name: tile.name.clone(),
                column,
                row,
                frame,
            };
            observer.tile_placed(&placed, &tile.path);
            atlas.tiles.push(placed);

            column += 1;
            if column == geometry.columns {
                column = 0;
                row += 1;
            }
        }

        Ok(atlas)
    }
}

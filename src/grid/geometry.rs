use anyhow::Result;
use serde::Serialize;

use super::Rect;
use crate::error::TilesheetError;

/// Default width budget for a tile sheet
pub const DEFAULT_MAX_WIDTH: u32 = 2048;

/// Grid layout for a run of equally sized tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridGeometry {
    pub columns: u32,
    pub rows: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub padding: u32,
}

impl GridGeometry {
    /// Compute the grid for `tile_count` tiles of `tile_width`x`tile_height`.
    ///
    /// Columns are however many cells fit in `max_width`. When every tile fits
    /// in one row, the row is shrunk to exactly `tile_count` cells. Otherwise
    /// rows are rounded up so the last, partially filled row is kept.
    pub fn compute(
        tile_count: usize,
        tile_width: u32,
        tile_height: u32,
        padding: u32,
        max_width: u32,
    ) -> Result<Self> {
        if tile_count == 0 {
            return Err(TilesheetError::NoTiles.into());
        }

        let cell_width = padded(tile_width, padding)?;
        let cell_height = padded(tile_height, padding)?;

        let max_columns = max_width / cell_width;
        if max_columns == 0 {
            return Err(TilesheetError::TileTooWide {
                cell_width,
                max_width,
            }
            .into());
        }

        let (columns, rows) = if tile_count < max_columns as usize {
            // tile_count < max_columns <= u32::MAX
            (u32::try_from(tile_count)?, 1)
        } else {
            let rows = tile_count.div_ceil(max_columns as usize);
            let rows = u32::try_from(rows).map_err(|_e| TilesheetError::CanvasTooLarge {
                columns: max_columns,
                rows: u32::MAX,
                cell_width,
                cell_height,
            })?;
            (max_columns, rows)
        };

        let geometry = Self {
            columns,
            rows,
            cell_width,
            cell_height,
            padding,
        };
        geometry.canvas_size()?;

        Ok(geometry)
    }

    /// Atlas dimensions in pixels
    pub fn canvas_size(&self) -> Result<(u32, u32)> {
        let too_large = || TilesheetError::CanvasTooLarge {
            columns: self.columns,
            rows: self.rows,
            cell_width: self.cell_width,
            cell_height: self.cell_height,
        };

        let width = self
            .cell_width
            .checked_mul(self.columns)
            .ok_or_else(too_large)?;
        let height = self
            .cell_height
            .checked_mul(self.rows)
            .ok_or_else(too_large)?;

        Ok((width, height))
    }

    /// Number of cells in the grid, including empty trailing ones
    pub fn capacity(&self) -> u64 {
        u64::from(self.columns) * u64::from(self.rows)
    }

    /// Cell rectangle at the given column and row, padding included
    pub fn cell_rect(&self, column: u32, row: u32) -> Rect {
        Rect::new(
            column * self.cell_width,
            row * self.cell_height,
            self.cell_width,
            self.cell_height,
        )
    }

    /// Column and row of the tile at `index` in input order
    pub fn cell_of(&self, index: u32) -> (u32, u32) {
        (index % self.columns, index / self.columns)
    }
}

fn padded(size: u32, padding: u32) -> Result<u32> {
    padding
        .checked_mul(2)
        .and_then(|p| size.checked_add(p))
        .filter(|&s| s > 0)
        .ok_or_else(|| anyhow::anyhow!("invalid cell size: {size}px tile with {padding}px padding"))
}

use std::path::Path;

use log::{debug, info, warn};

use crate::atlas::{Atlas, PlacedTile};
use crate::grid::GridGeometry;

/// Progress hooks for a packing run.
///
/// The packer reports through whatever observer it is handed instead of a
/// process-wide logger. Every hook defaults to doing nothing.
pub trait PackObserver {
    fn grid_computed(&self, _geometry: &GridGeometry) {}

    fn tile_placed(&self, _tile: &PlacedTile, _path: &Path) {}

    /// An existing file at the output path is about to be replaced
    fn output_replaced(&self, _path: &Path) {}

    fn atlas_saved(&self, _path: &Path, _atlas: &Atlas) {}
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PackObserver for NoopObserver {}

/// Forwards events to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl PackObserver for LogObserver {
    fn grid_computed(&self, geometry: &GridGeometry) {
        debug!(
            "Grid {}x{} of {}x{} cells (padding {})",
            geometry.columns,
            geometry.rows,
            geometry.cell_width,
            geometry.cell_height,
            geometry.padding
        );
    }

    fn tile_placed(&self, tile: &PlacedTile, path: &Path) {
        info!(
            "Processing {} -> ({}, {})",
            path.display(),
            tile.frame.x,
            tile.frame.y
        );
    }

    fn output_replaced(&self, path: &Path) {
        warn!("Deleting existing file {}", path.display());
    }

    fn atlas_saved(&self, path: &Path, atlas: &Atlas) {
        info!(
            "Saved {} ({}x{}, {} tiles)",
            path.display(),
            atlas.width,
            atlas.height,
            atlas.tiles.len()
        );
    }
}

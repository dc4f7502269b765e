use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::atlas::{Atlas, AtlasBuilder, Background};
use crate::cli::CompressionLevel;
use crate::error::TilesheetError;
use crate::grid::DEFAULT_MAX_WIDTH;
use crate::observer::PackObserver;
use crate::output::{ensure_parent_dir, metadata_json, save_atlas_image, write_json};
use crate::tile::load_tiles;

/// Options for one packing run
#[derive(Debug, Clone)]
pub struct PackOptions {
    pub max_width: u32,
    pub padding: u32,
    pub background: Background,
    pub compress: Option<CompressionLevel>,
    /// Optional JSON file receiving the placement mapping
    pub metadata: Option<PathBuf>,
    /// Root that tile names are made relative to
    pub name_base: Option<PathBuf>,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            padding: 0,
            background: Background::default(),
            compress: None,
            metadata: None,
            name_base: None,
        }
    }
}

/// Outcome of a successful run
#[derive(Debug)]
pub struct PackReport {
    pub output: PathBuf,
    pub atlas: Atlas,
}

impl PackReport {
    pub fn tile_count(&self) -> usize {
        self.atlas.tiles.len()
    }
}

/// Pack `tile_paths`, in the given order, into one tile sheet at `output`.
///
/// Everything that can fail on the inputs (decoding, size checks, grid
/// limits, encoding, metadata rendering, output directories) is settled
/// before an existing file at `output` is removed.
pub fn pack(
    tile_paths: &[PathBuf],
    output: &Path,
    options: &PackOptions,
    observer: &dyn PackObserver,
) -> Result<PackReport> {
    if tile_paths.is_empty() {
        return Err(TilesheetError::NoTiles.into());
    }

    let tiles = load_tiles(tile_paths, options.name_base.as_deref())?;

    let atlas = AtlasBuilder::new(options.max_width)
        .padding(options.padding)
        .background(options.background)
        .build(&tiles, observer)?;
    drop(tiles);

    let metadata = match &options.metadata {
        Some(json_path) => {
            let content = metadata_json(&atlas, output)?;
            ensure_parent_dir(json_path)?;
            Some((json_path, content))
        }
        None => None,
    };

    save_atlas_image(&atlas, output, options.compress, observer)?;

    if let Some((json_path, content)) = metadata {
        write_json(json_path, &content)?;
    }

    Ok(PackReport {
        output: output.to_path_buf(),
        atlas,
    })
}

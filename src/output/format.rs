use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::Result;
use image::ImageFormat;

use crate::atlas::Atlas;
use crate::cli::CompressionLevel;
use crate::error::TilesheetError;
use crate::observer::PackObserver;

/// Encode the atlas as PNG, optionally recompressed
pub fn encode_atlas_png(
    atlas: &Atlas,
    path: &Path,
    compress: Option<CompressionLevel>,
) -> Result<Vec<u8>> {
    let mut png_data = Cursor::new(Vec::new());
    atlas
        .image
        .write_to(&mut png_data, ImageFormat::Png)
        .map_err(|e| TilesheetError::ImageSave {
            path: path.to_path_buf(),
            source: e,
        })?;

    let Some(level) = compress else {
        return Ok(png_data.into_inner());
    };

    let opts = match level {
        CompressionLevel::Level(n) => oxipng::Options::from_preset(n),
        CompressionLevel::Max => oxipng::Options::max_compression(),
    };
    let compressed = oxipng::optimize_from_memory(&png_data.into_inner(), &opts).map_err(|e| {
        TilesheetError::PngCompress {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    Ok(compressed)
}

/// Save atlas image as PNG, replacing any file already at `path`.
///
/// Encoding finishes before the old file is touched, so an encode failure
/// leaves the previous output in place.
pub fn save_atlas_image(
    atlas: &Atlas,
    path: &Path,
    compress: Option<CompressionLevel>,
    observer: &dyn PackObserver,
) -> Result<()> {
    let data = encode_atlas_png(atlas, path, compress)?;
    ensure_parent_dir(path)?;

    if path.is_file() {
        observer.output_replaced(path);
        fs::remove_file(path).map_err(|e| TilesheetError::OutputRemove {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(path, data).map_err(|e| TilesheetError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    observer.atlas_saved(path, atlas);
    Ok(())
}

/// Create the directory `path` will be written into
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| TilesheetError::OutputWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    Ok(())
}

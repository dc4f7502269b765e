use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::ImageReader;
use rayon::prelude::*;

use super::Tile;
use crate::error::TilesheetError;

/// Default tile file extension
pub const DEFAULT_EXTENSION: &str = "png";

/// Collect tile files under `root` whose extension is exactly `extension`.
///
/// The walk is recursive. Paths come back sorted so that repeated runs over
/// an unchanged directory produce the same placement order.
pub fn collect_tile_paths(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(TilesheetError::InputNotFound(root.to_path_buf()).into());
    }

    let mut paths = Vec::new();
    if root.is_file() {
        if has_extension(root, extension) {
            paths.push(root.to_path_buf());
        }
    } else {
        collect_from_directory(root, extension, &mut paths)?;
    }

    paths.sort();
    Ok(paths)
}

fn collect_from_directory(dir: &Path, extension: &str, paths: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    for entry in entries {
        let path = entry?.path();

        if path.is_file() && has_extension(&path, extension) {
            paths.push(path);
        } else if path.is_dir() {
            collect_from_directory(&path, extension, paths)?;
        }
    }

    Ok(())
}

/// Case-sensitive extension match, with or without a leading dot
fn has_extension(path: &Path, extension: &str) -> bool {
    let wanted = extension.strip_prefix('.').unwrap_or(extension);
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == wanted)
}

/// Decode tiles in parallel, keeping input order.
///
/// When several tiles fail, the error reported is the first in input order.
/// Names are computed relative to `base` when the path lives under it,
/// otherwise the file name is used.
pub fn load_tiles(paths: &[impl AsRef<Path> + Sync], base: Option<&Path>) -> Result<Vec<Tile>> {
    let results: Vec<Result<Tile>> = paths
        .par_iter()
        .map(|path| load_single_tile(path.as_ref(), base))
        .collect();

    results.into_iter().collect()
}

fn load_single_tile(path: &Path, base: Option<&Path>) -> Result<Tile> {
    let image = ImageReader::open(path)
        .map_err(|e| TilesheetError::ImageLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .decode()
        .map_err(|e| TilesheetError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?
        .into_rgba8();

    Ok(Tile {
        path: path.to_path_buf(),
        name: tile_name(path, base),
        image,
    })
}

fn tile_name(path: &Path, base: Option<&Path>) -> String {
    match base
        .and_then(|b| path.strip_prefix(b).ok())
        .filter(|relative| !relative.as_os_str().is_empty())
    {
        Some(relative) => relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        None => path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string(),
    }
}

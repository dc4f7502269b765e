use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::atlas::{Atlas, PlacedTile};
use crate::error::TilesheetError;
use crate::grid::GridGeometry;

#[derive(Serialize)]
struct JsonOutput<'a> {
    meta: Meta,
    grid: &'a GridGeometry,
    tiles: &'a [PlacedTile],
}

#[derive(Serialize)]
struct Meta {
    app: &'static str,
    version: &'static str,
    image: String,
    size: Size,
}

#[derive(Serialize)]
struct Size {
    w: u32,
    h: u32,
}

/// Render the placement mapping of an atlas saved at `image_path`
pub fn metadata_json(atlas: &Atlas, image_path: &Path) -> Result<String> {
    let image = image_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let output = JsonOutput {
        meta: Meta {
            app: "tilesheet",
            version: env!("CARGO_PKG_VERSION"),
            image,
            size: Size {
                w: atlas.width,
                h: atlas.height,
            },
        },
        grid: &atlas.geometry,
        tiles: &atlas.tiles,
    };

    Ok(serde_json::to_string_pretty(&output)?)
}

/// Write rendered JSON metadata
pub fn write_json(json_path: &Path, content: &str) -> Result<()> {
    fs::write(json_path, content).map_err(|e| TilesheetError::OutputWrite {
        path: json_path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

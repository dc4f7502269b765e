use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use serde_json::Value;

use crate::error::TilesheetError;

/// Default manifest read by the `shapes` command
pub const DEFAULT_SHAPES_INPUT: &str = "shapes/physics_project.json";
/// Default manifest written by the `shapes` command
pub const DEFAULT_SHAPES_OUTPUT: &str = "shapes/shapes.json";

/// Set `width` and `height` on every rigid body, returning how many were updated.
///
/// Each body names the image it was traced from; its dimensions are read from
/// the image header so shapes can be scaled without loading the image.
/// `imagePath` values are resolved against `base_dir`. Unknown fields and key
/// order pass through unchanged, new keys go last.
pub fn annotate_manifest(manifest: &mut Value, base_dir: &Path, source: &Path) -> Result<usize> {
    let invalid = |message: &str| TilesheetError::InvalidManifest {
        path: source.to_path_buf(),
        message: message.to_string(),
    };

    let bodies = manifest
        .get_mut("rigidBodies")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| invalid("missing \"rigidBodies\" array"))?;

    for body in bodies.iter_mut() {
        let name = body
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("<unnamed>")
            .to_string();
        let image_path = body
            .get("imagePath")
            .and_then(Value::as_str)
            .ok_or_else(|| invalid(&format!("body '{name}' has no \"imagePath\"")))?;

        let resolved = resolve_image_path(base_dir, image_path);
        let (width, height) =
            image::image_dimensions(&resolved).map_err(|e| TilesheetError::ImageLoad {
                path: resolved.clone(),
                source: e,
            })?;
        info!("Body {}: {} is {}x{}", name, resolved.display(), width, height);

        let fields = body
            .as_object_mut()
            .ok_or_else(|| invalid(&format!("body '{name}' is not an object")))?;
        fields.insert("width".to_string(), Value::from(width));
        fields.insert("height".to_string(), Value::from(height));
    }

    Ok(bodies.len())
}

/// Read `input`, annotate it, and write the compact result to `output`
pub fn annotate_shapes(input: &Path, output: &Path) -> Result<usize> {
    info!("Reading {}", input.display());
    let content = fs::read_to_string(input)
        .with_context(|| format!("failed to read shape manifest: {}", input.display()))?;
    let mut manifest: Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse shape manifest: {}", input.display()))?;

    let base_dir = input.parent().unwrap_or_else(|| Path::new("."));
    let count = annotate_manifest(&mut manifest, base_dir, input)?;

    info!("Writing {}", output.display());
    let serialized = serde_json::to_string(&manifest)?;
    fs::write(output, serialized).map_err(|e| TilesheetError::OutputWrite {
        path: output.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

fn resolve_image_path(base_dir: &Path, image_path: &str) -> PathBuf {
    image_path
        .split(['/', '\\'])
        .filter(|part| !part.is_empty())
        .fold(base_dir.to_path_buf(), |path, part| path.join(part))
}

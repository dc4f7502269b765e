mod format;
mod json;

pub use format::{encode_atlas_png, ensure_parent_dir, save_atlas_image};
pub use json::{metadata_json, write_json};

mod loader;
mod tile;

pub use loader::{DEFAULT_EXTENSION, collect_tile_paths, load_tiles};
pub use tile::Tile;

pub mod atlas;
pub mod cli;
pub mod config;
pub mod error;
pub mod grid;
pub mod observer;
pub mod output;
pub mod pack;
pub mod shapes;
pub mod tile;

pub use atlas::{Atlas, AtlasBuilder, Background, PlacedTile};
pub use cli::{CliArgs, Command, CompressionLevel, PackArgs, ShapesArgs};
pub use error::TilesheetError;
pub use grid::{GridGeometry, Rect};
pub use observer::{LogObserver, NoopObserver, PackObserver};
pub use pack::{PackOptions, PackReport, pack};
pub use tile::{Tile, collect_tile_paths, load_tiles};

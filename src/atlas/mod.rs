mod background;
mod builder;
mod types;

pub use background::Background;
pub use builder::AtlasBuilder;
pub use types::{Atlas, PlacedTile};

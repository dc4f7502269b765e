mod geometry;
mod rect;

pub use geometry::{DEFAULT_MAX_WIDTH, GridGeometry};
pub use rect::Rect;

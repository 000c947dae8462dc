pub mod base;
pub mod grid;
pub mod tile;

pub use base::{GridLayer, RedrawSummary};
pub use grid::TileGrid;
pub use tile::{Jpeg12Layer, Tile, TileOutcome, TileRegistry};

//! 12-bit tile layer
//!
//! This module provides the tile layer and the values it hands to a grid host:
//! - Tile placeholders that carry raw bytes and an RGBA surface
//! - Fetch, decode and render of a single tile
//! - Redraw of every live tile when the contrast window moves

pub mod layer;
pub mod registry;
pub mod trait_impl;
pub mod types;

pub use layer::Jpeg12Layer;
pub use registry::TileRegistry;
pub use types::{Tile, TileOutcome};

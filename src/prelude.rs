//! Prelude module for common jpeg12-tiles types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use jpeg12_tiles::prelude::*;`

pub use crate::core::{config::LayerOptions, geo::TileCoord};

pub use crate::codec::{probe::JpegInfo, DecodeRequest, ImageCodec, SampleBuffer, SampleCodec};

pub use crate::layers::{
    base::{GridLayer, RedrawSummary},
    grid::TileGrid,
    tile::{Jpeg12Layer, Tile, TileOutcome, TileRegistry},
};

pub use crate::rendering::{
    contrast::ContrastRange,
    palette::Palette,
    pipeline::{render_into, render_samples},
};

pub use crate::tiles::{HttpFetcher, TileFetcher, TileSource, UrlTemplateSource};

pub use crate::ui::controls::{ContrastHandle, ContrastSource};

pub use crate::{Error as MapError, Result};

pub use std::sync::Arc;

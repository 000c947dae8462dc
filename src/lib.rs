//! # jpeg12-tiles
//!
//! A tile layer for 12-bit single-channel imagery services, in the spirit of a
//! Leaflet grid layer.
//!
//! Tiles are fetched from a `{z}/{y}/{x}` endpoint, decoded into widened
//! intensity samples by a pluggable codec, and rendered into false-color RGBA
//! surfaces using a contrast range that is read at draw time.

pub mod codec;
pub mod core;
pub mod layers;
pub mod rendering;
pub mod tiles;
pub mod ui;

#[cfg(feature = "wasm")]
pub mod canvas;
#[cfg(feature = "debug")]
pub mod logging;
pub mod prelude;

pub use crate::core::constants;

// Re-export public API
pub use crate::core::{config::LayerOptions, geo::TileCoord};

pub use codec::{DecodeRequest, ImageCodec, SampleBuffer, SampleCodec};

pub use layers::{
    base::{GridLayer, RedrawSummary},
    grid::TileGrid,
    tile::{Jpeg12Layer, Tile, TileOutcome, TileRegistry},
};

pub use rendering::{contrast::ContrastRange, palette::Palette, pipeline::render_samples};

pub use tiles::{HttpFetcher, TileFetcher, TileSource, UrlTemplateSource};

pub use ui::controls::{ContrastHandle, ContrastSource};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unrecognized data")]
    UnrecognizedData,

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Layer error: {0}")]
    Layer(String),
}

/// Error type alias for convenience
pub type Error = MapError;

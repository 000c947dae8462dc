//! Constants shared by the layer, the codec and the renderer.
//! Keeping them in a single place makes the service defaults easy to find.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Raw HiRISE imagery endpoint, templated on zoom, row and column.
pub const HIRISE_RAW_TILE_URL: &str =
    "https://astro.arcgis.com/arcgis/rest/services/OnMars/HiRISE/raw/tile/{z}/{y}/{x}";

/// Largest accepted tile edge; larger surfaces are refused at validation.
pub const MAX_TILE_SIZE: u32 = 4096;

/// Largest intensity a 12-bit sample can hold.
pub const SAMPLE_MAX: u16 = 4095;

/// Width of the display range a contrast window is stretched onto.
pub const DISPLAY_LEVELS: f64 = 256.0;

/// Default zoom bounds, matching the usual web-map grid.
pub const DEFAULT_MIN_ZOOM: u8 = 0;
pub const DEFAULT_MAX_ZOOM: u8 = 18;

/// User agent sent with every tile request.
pub const USER_AGENT: &str = concat!("jpeg12-tiles/", env!("CARGO_PKG_VERSION"));

//! Layer configuration
//!
//! Options are plain serde structs so hosts can keep them in JSON next to the
//! rest of their map configuration. Every field has a default, so a partial
//! document such as `{"tile_size": 512}` is valid.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{
    core::constants::{
        DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, HIRISE_RAW_TILE_URL, MAX_TILE_SIZE, TILE_SIZE,
        USER_AGENT,
    },
    rendering::palette::Palette,
    MapError, Result,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerOptions {
    /// Edge length of the square tile surface, in pixels
    pub tile_size: u32,
    /// Tile endpoint with `{z}`, `{y}` and `{x}` placeholders
    pub url_template: String,
    pub palette: Palette,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub user_agent: String,
}

impl Default for LayerOptions {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            url_template: HIRISE_RAW_TILE_URL.to_string(),
            palette: Palette::default(),
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl LayerOptions {
    /// Parse options from a JSON document and validate them
    pub fn from_json(json: &str) -> Result<Self> {
        let options: LayerOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Read options from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    pub fn with_url_template(mut self, url_template: impl Into<String>) -> Self {
        self.url_template = url_template.into();
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_zoom_range(mut self, min_zoom: u8, max_zoom: u8) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    /// Whether tiles at `zoom` belong to this layer
    pub fn covers_zoom(&self, zoom: u8) -> bool {
        zoom >= self.min_zoom && zoom <= self.max_zoom
    }

    pub fn validate(&self) -> Result<()> {
        if self.tile_size == 0 {
            return Err(MapError::Layer("tile_size must be positive".to_string()));
        }
        if self.tile_size > MAX_TILE_SIZE {
            return Err(MapError::Layer(format!(
                "tile_size {} exceeds the maximum of {}",
                self.tile_size, MAX_TILE_SIZE
            )));
        }
        if self.min_zoom > self.max_zoom {
            return Err(MapError::Layer(format!(
                "min_zoom {} exceeds max_zoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        if !self.url_template.contains("{z}")
            || !self.url_template.contains("{y}")
            || !self.url_template.contains("{x}")
        {
            return Err(MapError::Layer(format!(
                "url_template must contain {{z}}, {{y}} and {{x}}: {}",
                self.url_template
            )));
        }
        Ok(())
    }
}

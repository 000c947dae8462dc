use crate::core::{constants::HIRISE_RAW_TILE_URL, geo::TileCoord};

/// Trait representing anything that can produce tile URLs for a given coordinate.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `coord`.
    fn url(&self, coord: TileCoord) -> String;
}

/// Source built from a template with `{z}`, `{y}` (row) and `{x}` (column)
/// placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplateSource {
    template: String,
}

impl UrlTemplateSource {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Raw 12-bit HiRISE mosaic tiles
    pub fn hirise_raw() -> Self {
        Self::new(HIRISE_RAW_TILE_URL)
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

impl Default for UrlTemplateSource {
    fn default() -> Self {
        Self::hirise_raw()
    }
}

impl TileSource for UrlTemplateSource {
    fn url(&self, coord: TileCoord) -> String {
        self.template
            .replace("{z}", &coord.z.to_string())
            .replace("{y}", &coord.y.to_string())
            .replace("{x}", &coord.x.to_string())
    }
}

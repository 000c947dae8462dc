//! Core Jpeg12Layer implementation

use std::{fmt, sync::Arc};

use crate::{
    codec::{DecodeRequest, ImageCodec, SampleCodec},
    core::{config::LayerOptions, geo::TileCoord},
    layers::tile::Tile,
    rendering::palette::Palette,
    tiles::{HttpFetcher, TileFetcher, TileSource, UrlTemplateSource},
    Result,
};

/// Tile layer for 12-bit single-channel imagery.
///
/// Fetching, decoding and the contrast window are all collaborators: the
/// layer wires them together and owns only its options.
pub struct Jpeg12Layer {
    pub(crate) id: String,
    pub(crate) options: LayerOptions,
    pub(crate) tile_source: Box<dyn TileSource>,
    pub(crate) fetcher: Arc<dyn TileFetcher>,
    pub(crate) codec: Arc<dyn SampleCodec>,
}

impl Jpeg12Layer {
    /// Create a layer that fetches over HTTP from `options.url_template` and
    /// decodes with [`ImageCodec`].
    pub fn new(id: impl Into<String>, options: LayerOptions) -> Result<Self> {
        options.validate()?;
        let fetcher = HttpFetcher::with_user_agent(&options.user_agent)?;

        Ok(Self {
            id: id.into(),
            tile_source: Box::new(UrlTemplateSource::new(options.url_template.clone())),
            fetcher: Arc::new(fetcher),
            codec: Arc::new(ImageCodec::new()),
            options,
        })
    }

    /// Layer over the raw HiRISE mosaic with default options
    pub fn hirise(id: impl Into<String>) -> Result<Self> {
        Self::new(id, LayerOptions::default())
    }

    pub fn with_fetcher(mut self, fetcher: impl TileFetcher + 'static) -> Self {
        self.fetcher = Arc::new(fetcher);
        self
    }

    pub fn with_codec(mut self, codec: impl SampleCodec + 'static) -> Self {
        self.codec = Arc::new(codec);
        self
    }

    pub fn with_source(mut self, source: impl TileSource + 'static) -> Self {
        self.tile_source = Box::new(source);
        self
    }

    pub fn options(&self) -> &LayerOptions {
        &self.options
    }

    pub fn palette(&self) -> Palette {
        self.options.palette
    }

    /// Takes effect on the next draw or redraw
    pub fn set_palette(&mut self, palette: Palette) {
        self.options.palette = palette;
    }

    pub fn tile_url(&self, coord: TileCoord) -> String {
        self.tile_source.url(coord)
    }

    pub(crate) fn decode_request(&self, tile: &Tile) -> DecodeRequest {
        let (width, height) = tile.size();
        DecodeRequest::single_channel(width, height)
    }
}

impl fmt::Debug for Jpeg12Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Jpeg12Layer")
            .field("id", &self.id)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

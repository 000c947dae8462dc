//! GridLayer implementation for Jpeg12Layer

use async_trait::async_trait;

use super::{Jpeg12Layer, Tile, TileOutcome};
use crate::{
    core::geo::TileCoord,
    layers::base::GridLayer,
    rendering::pipeline::render_into,
    ui::controls::ContrastSource,
    MapError, Result,
};

#[async_trait]
impl GridLayer for Jpeg12Layer {
    fn id(&self) -> &str {
        &self.id
    }

    fn tile_size(&self) -> u32 {
        self.options.tile_size
    }

    fn covers_zoom(&self, zoom: u8) -> bool {
        self.options.covers_zoom(zoom)
    }

    async fn create_tile(&self, coord: TileCoord, contrast: &dyn ContrastSource) -> TileOutcome {
        let mut tile = Tile::placeholder(coord, self.options.tile_size);

        if !coord.is_valid() {
            return TileOutcome::Failed {
                tile,
                reason: MapError::InvalidCoordinates(format!(
                    "tile {} is outside the zoom {} grid",
                    coord, coord.z
                )),
            };
        }

        let url = self.tile_source.url(coord);
        log::debug!("requesting tile {} from {}", coord, url);

        let bytes = match self.fetcher.fetch(&url).await {
            Ok(bytes) => bytes,
            Err(reason) => {
                log::warn!("fetch of tile {} failed: {}", coord, reason);
                return TileOutcome::Failed { tile, reason };
            }
        };

        if bytes.is_empty() {
            return TileOutcome::Failed {
                tile,
                reason: MapError::UnrecognizedData,
            };
        }

        // kept even if the draw fails, so a later redraw can retry the decode
        tile.set_raw(bytes);
        match self.draw(&mut tile, contrast) {
            Ok(_) => TileOutcome::Ready(tile),
            Err(reason) => TileOutcome::Failed { tile, reason },
        }
    }

    fn draw(&self, tile: &mut Tile, contrast: &dyn ContrastSource) -> Result<bool> {
        let Some(raw) = tile.raw_handle() else {
            return Ok(false);
        };

        let samples = self.codec.decode(&raw, &self.decode_request(tile))?;
        let range = contrast.range();
        render_into(&samples, range, self.options.palette, tile.surface_mut())?;
        tile.mark_drawn(range);
        Ok(true)
    }
}

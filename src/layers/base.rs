use async_trait::async_trait;

use crate::{
    core::geo::TileCoord,
    layers::tile::{Tile, TileOutcome, TileRegistry},
    ui::controls::ContrastSource,
    Result,
};

/// Capability a layer provides to a tile grid host.
///
/// The host decides which tiles exist and when they go away; the layer only
/// knows how to fill one tile and how to draw it again.
#[async_trait]
pub trait GridLayer: Send + Sync {
    fn id(&self) -> &str;

    /// Edge length of the square tiles this layer produces
    fn tile_size(&self) -> u32;

    /// Whether the layer has tiles at `zoom`
    fn covers_zoom(&self, _zoom: u8) -> bool {
        true
    }

    /// Build the tile at `coord`. Always yields a tile, even on failure, so
    /// the host never waits on a tile that will not arrive.
    async fn create_tile(&self, coord: TileCoord, contrast: &dyn ContrastSource) -> TileOutcome;

    /// Render `tile` from its raw bytes with the current contrast window.
    /// Returns `Ok(false)` when the tile has nothing to draw yet.
    fn draw(&self, tile: &mut Tile, contrast: &dyn ContrastSource) -> Result<bool>;

    /// Draw every tile in `tiles` again. The window is read once so that all
    /// tiles of one pass agree.
    fn redraw(&self, tiles: &mut TileRegistry, contrast: &dyn ContrastSource) -> RedrawSummary {
        let range = contrast.range();
        let mut summary = RedrawSummary::default();

        for tile in tiles.iter_mut() {
            match self.draw(tile, &range) {
                Ok(true) => summary.redrawn += 1,
                Ok(false) => summary.skipped += 1,
                Err(err) => {
                    log::warn!("redraw of tile {} failed: {}", tile.coord(), err);
                    summary.failed += 1;
                }
            }
        }

        log::debug!(
            "layer {} redrawn with [{}, {}]: {:?}",
            self.id(),
            range.min,
            range.max,
            summary
        );
        summary
    }
}

/// Tally of one redraw pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedrawSummary {
    pub redrawn: usize,
    /// Tiles without raw bytes
    pub skipped: usize,
    pub failed: usize,
}

impl RedrawSummary {
    pub fn total(&self) -> usize {
        self.redrawn + self.skipped + self.failed
    }
}

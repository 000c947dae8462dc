//! Tile grid host
//!
//! `TileGrid` plays the part of the mapping framework around a
//! [`GridLayer`]: it asks the layer for tiles, keeps the live-tile registry,
//! evicts tiles the view no longer needs, and triggers redraws.
//!
//! Requests are never cancelled. A tile evicted while its request is still in
//! flight keeps downloading; its result is dropped on arrival.

use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use futures::stream::{FuturesUnordered, StreamExt};
use fxhash::FxHashSet;

use crate::{
    core::geo::TileCoord,
    layers::{
        base::{GridLayer, RedrawSummary},
        tile::{Tile, TileOutcome, TileRegistry},
    },
    ui::controls::ContrastSource,
    MapError,
};

pub struct TileGrid<L: GridLayer + 'static> {
    layer: Arc<L>,
    tiles: TileRegistry,
    pending: FxHashSet<TileCoord>,
    results_tx: Sender<TileOutcome>,
    results_rx: Receiver<TileOutcome>,
}

impl<L: GridLayer + 'static> TileGrid<L> {
    pub fn new(layer: L) -> Self {
        Self::from_shared(Arc::new(layer))
    }

    pub fn from_shared(layer: Arc<L>) -> Self {
        let (results_tx, results_rx) = unbounded();
        Self {
            layer,
            tiles: TileRegistry::new(),
            pending: FxHashSet::default(),
            results_tx,
            results_rx,
        }
    }

    pub fn layer(&self) -> &L {
        &self.layer
    }

    pub fn tiles(&self) -> &TileRegistry {
        &self.tiles
    }

    pub fn tile(&self, coord: &TileCoord) -> Option<&Tile> {
        self.tiles.get(coord)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, coord: &TileCoord) -> bool {
        self.pending.contains(coord)
    }

    /// Load one tile and add it to the registry. The returned error is
    /// advisory: unless the coordinate is outside the layer or its grid, a
    /// (possibly blank) tile is registered either way. A spawned load still
    /// pending for the same tile is superseded.
    pub async fn load(&mut self, coord: TileCoord, contrast: &dyn ContrastSource) -> Option<MapError> {
        if !self.layer.covers_zoom(coord.z) {
            return Some(MapError::InvalidCoordinates(format!(
                "zoom {} is outside layer {}",
                coord.z,
                self.layer.id()
            )));
        }
        let outcome = self.layer.create_tile(coord, contrast).await;
        self.accept(outcome)
    }

    /// Load several tiles concurrently on the current task. Tiles are
    /// registered in completion order, which is arbitrary.
    pub async fn load_many<I>(
        &mut self,
        coords: I,
        contrast: &dyn ContrastSource,
    ) -> Vec<(TileCoord, MapError)>
    where
        I: IntoIterator<Item = TileCoord>,
    {
        let layer = Arc::clone(&self.layer);
        let layer: &L = &layer;
        let mut in_flight: FuturesUnordered<_> = coords
            .into_iter()
            .filter(|coord| layer.covers_zoom(coord.z))
            .map(move |coord| layer.create_tile(coord, contrast))
            .collect();

        let mut failures = Vec::new();
        while let Some(outcome) = in_flight.next().await {
            let coord = outcome.tile().coord();
            if let Some(err) = self.accept(outcome) {
                failures.push((coord, err));
            }
        }
        failures
    }

    /// Start loading a tile on the tokio runtime without waiting for it.
    ///
    /// Returns `Ok(false)` when the tile is already in flight or outside the
    /// layer's zoom range. Completed tiles are picked up by
    /// [`TileGrid::process_results`].
    #[cfg(feature = "tokio-runtime")]
    pub fn spawn_load(
        &mut self,
        coord: TileCoord,
        contrast: Arc<dyn ContrastSource>,
    ) -> crate::Result<bool> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|err| MapError::Layer(format!("no tokio runtime: {}", err)))?;

        if !self.layer.covers_zoom(coord.z) || !self.pending.insert(coord) {
            return Ok(false);
        }

        let layer = Arc::clone(&self.layer);
        let results = self.results_tx.clone();
        runtime.spawn(async move {
            let outcome = layer.create_tile(coord, contrast.as_ref()).await;
            // the grid may have been dropped meanwhile
            let _ = results.send(outcome);
        });
        Ok(true)
    }

    /// Register every tile whose spawned load has finished. Returns the
    /// advisory errors of the tiles registered in this call.
    pub fn process_results(&mut self) -> Vec<(TileCoord, MapError)> {
        let mut failures = Vec::new();
        while let Ok(outcome) = self.results_rx.try_recv() {
            let coord = outcome.tile().coord();
            if !self.pending.remove(&coord) {
                log::debug!("dropping late result for evicted tile {}", coord);
                continue;
            }
            if let Some(err) = self.accept(outcome) {
                failures.push((coord, err));
            }
        }
        failures
    }

    /// Remove a tile, forgetting any load still in flight for it
    pub fn evict(&mut self, coord: &TileCoord) -> Option<Tile> {
        self.pending.remove(coord);
        self.tiles.remove(coord)
    }

    /// Keep only the tiles (and pending loads) whose coordinate passes `keep`.
    /// Returns how many registered tiles were dropped.
    pub fn prune(&mut self, mut keep: impl FnMut(&TileCoord) -> bool) -> usize {
        let before = self.tiles.len();
        self.pending.retain(|coord| keep(coord));
        self.tiles.retain(|tile| keep(&tile.coord()));
        before - self.tiles.len()
    }

    /// Redraw every live tile with the current contrast window
    pub fn redraw(&mut self, contrast: &dyn ContrastSource) -> RedrawSummary {
        self.layer.redraw(&mut self.tiles, contrast)
    }

    /// Register a finished tile. A spawned load still in flight for the same
    /// coordinate is superseded, so its late result is dropped on arrival.
    /// Tiles outside the grid are never registered.
    fn accept(&mut self, outcome: TileOutcome) -> Option<MapError> {
        let (tile, error) = outcome.into_parts();
        let coord = tile.coord();
        if self.pending.remove(&coord) {
            log::debug!("tile {} loaded directly, superseding its spawned load", coord);
        }
        match &error {
            Some(err) => log::warn!("tile {} of layer {}: {}", coord, self.layer.id(), err),
            None => log::info!("tile {} of layer {} ready", coord, self.layer.id()),
        }
        if !matches!(error, Some(MapError::InvalidCoordinates(_))) {
            self.tiles.insert(tile);
        }
        error
    }
}

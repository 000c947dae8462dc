use crate::{core::geo::TileCoord, layers::tile::Tile};
use fxhash::FxHashMap;

/// Live tiles of one layer, keyed by coordinate.
///
/// This is the host's view of which tiles exist. It holds no eviction policy:
/// tiles stay until the host removes them.
#[derive(Debug, Default)]
pub struct TileRegistry {
    tiles: FxHashMap<TileCoord, Tile>,
}

impl TileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tile, returning the one it replaces
    pub fn insert(&mut self, tile: Tile) -> Option<Tile> {
        self.tiles.insert(tile.coord(), tile)
    }

    pub fn get(&self, coord: &TileCoord) -> Option<&Tile> {
        self.tiles.get(coord)
    }

    pub fn get_mut(&mut self, coord: &TileCoord) -> Option<&mut Tile> {
        self.tiles.get_mut(coord)
    }

    pub fn remove(&mut self, coord: &TileCoord) -> Option<Tile> {
        self.tiles.remove(coord)
    }

    pub fn contains(&self, coord: &TileCoord) -> bool {
        self.tiles.contains_key(coord)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.values_mut()
    }

    /// Coordinates of every live tile, sorted
    pub fn coords(&self) -> Vec<TileCoord> {
        let mut coords: Vec<_> = self.tiles.keys().copied().collect();
        coords.sort();
        coords
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&Tile) -> bool) {
        self.tiles.retain(|_, tile| keep(tile));
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }
}

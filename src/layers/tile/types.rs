//! Core data types for tile layer functionality

use image::RgbaImage;

use std::sync::Arc;

use crate::{core::geo::TileCoord, rendering::contrast::ContrastRange, MapError};

/// One grid cell: its raw encoded bytes once fetched, and the surface they
/// are rendered into.
#[derive(Debug, Clone)]
pub struct Tile {
    coord: TileCoord,
    raw: Option<Arc<Vec<u8>>>,
    surface: RgbaImage,
    drawn_with: Option<ContrastRange>,
}

impl Tile {
    /// Fully transparent tile of `tile_size` x `tile_size` with no data.
    pub fn placeholder(coord: TileCoord, tile_size: u32) -> Self {
        Self {
            coord,
            raw: None,
            surface: RgbaImage::new(tile_size, tile_size),
            drawn_with: None,
        }
    }

    pub fn coord(&self) -> TileCoord {
        self.coord
    }

    pub fn zoom(&self) -> u8 {
        self.coord.z
    }

    pub fn size(&self) -> (u32, u32) {
        self.surface.dimensions()
    }

    pub fn raw(&self) -> Option<&[u8]> {
        self.raw.as_deref().map(Vec::as_slice)
    }

    /// Shared handle to the raw bytes, detached from the tile borrow
    pub fn raw_handle(&self) -> Option<Arc<Vec<u8>>> {
        self.raw.clone()
    }

    pub fn has_raw(&self) -> bool {
        self.raw.is_some()
    }

    pub fn set_raw(&mut self, bytes: Vec<u8>) {
        self.raw = Some(Arc::new(bytes));
    }

    pub fn surface(&self) -> &RgbaImage {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut RgbaImage {
        &mut self.surface
    }

    pub fn into_surface(self) -> RgbaImage {
        self.surface
    }

    /// Window of the last successful draw, `None` while the tile is blank
    pub fn drawn_with(&self) -> Option<ContrastRange> {
        self.drawn_with
    }

    pub fn is_blank(&self) -> bool {
        self.drawn_with.is_none()
    }

    pub(crate) fn mark_drawn(&mut self, range: ContrastRange) {
        self.drawn_with = Some(range);
    }
}

/// Completion of a tile request.
///
/// Both arms carry a tile: a failed request still hands the host its blank
/// placeholder, and the reason is advisory.
#[derive(Debug)]
pub enum TileOutcome {
    Ready(Tile),
    Failed { tile: Tile, reason: MapError },
}

impl TileOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, TileOutcome::Ready(_))
    }

    pub fn tile(&self) -> &Tile {
        match self {
            TileOutcome::Ready(tile) | TileOutcome::Failed { tile, .. } => tile,
        }
    }

    pub fn error(&self) -> Option<&MapError> {
        match self {
            TileOutcome::Ready(_) => None,
            TileOutcome::Failed { reason, .. } => Some(reason),
        }
    }

    pub fn into_tile(self) -> Tile {
        self.into_parts().0
    }

    pub fn into_parts(self) -> (Tile, Option<MapError>) {
        match self {
            TileOutcome::Ready(tile) => (tile, None),
            TileOutcome::Failed { tile, reason } => (tile, Some(reason)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_transparent_and_empty() {
        let tile = Tile::placeholder(TileCoord::new(1, 2, 3), 8);
        assert_eq!(tile.size(), (8, 8));
        assert_eq!(tile.zoom(), 3);
        assert!(!tile.has_raw());
        assert!(tile.is_blank());
        assert!(tile.surface().pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn test_raw_bytes_are_shared() {
        let mut tile = Tile::placeholder(TileCoord::new(0, 0, 0), 4);
        tile.set_raw(vec![1, 2, 3]);
        let handle = tile.raw_handle().unwrap();
        assert_eq!(tile.raw(), Some(&[1u8, 2, 3][..]));
        assert_eq!(Arc::strong_count(&handle), 2);
    }

    #[test]
    fn test_failed_outcome_still_has_tile() {
        let tile = Tile::placeholder(TileCoord::new(0, 0, 1), 4);
        let outcome = TileOutcome::Failed {
            tile,
            reason: MapError::UnrecognizedData,
        };
        assert!(!outcome.is_ready());
        assert_eq!(outcome.tile().coord(), TileCoord::new(0, 0, 1));
        assert_eq!(outcome.error().unwrap().to_string(), "Unrecognized data");

        let (tile, error) = outcome.into_parts();
        assert!(tile.is_blank());
        assert!(matches!(error, Some(MapError::UnrecognizedData)));
    }
}

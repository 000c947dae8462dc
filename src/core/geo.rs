use serde::{Deserialize, Serialize};
use std::fmt;

/// Address of one tile in the grid: zoom level, row (`y`) and column (`x`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Number of tiles along one axis at this zoom level
    pub fn grid_extent(&self) -> u64 {
        1u64 << self.z.min(32)
    }

    /// Gets the parent tile at a lower zoom level
    pub fn parent(&self) -> Option<TileCoord> {
        if self.z == 0 {
            None
        } else {
            Some(TileCoord::new(self.x / 2, self.y / 2, self.z - 1))
        }
    }

    /// Checks if the tile lies inside the grid for its zoom level
    pub fn is_valid(&self) -> bool {
        let extent = self.grid_extent();
        u64::from(self.x) < extent && u64::from(self.y) < extent
    }

    /// Registry key in the `z:x:y` form grid hosts use
    pub fn key(&self) -> String {
        format!("{}:{}:{}", self.z, self.x, self.y)
    }
}

impl fmt::Display for TileCoord {
    /// Path order used by the imagery service: zoom, row, column.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.y, self.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_coord_validity() {
        assert!(TileCoord::new(0, 0, 0).is_valid());
        assert!(!TileCoord::new(1, 0, 0).is_valid());
        assert!(TileCoord::new(3, 3, 2).is_valid());
        assert!(!TileCoord::new(4, 0, 2).is_valid());
        assert!(!TileCoord::new(0, 4, 2).is_valid());
    }

    #[test]
    fn test_tile_coord_parent() {
        let coord = TileCoord::new(5, 7, 3);
        assert_eq!(coord.parent(), Some(TileCoord::new(2, 3, 2)));
        assert_eq!(TileCoord::new(0, 0, 0).parent(), None);
    }

    #[test]
    fn test_tile_coord_display_uses_row_before_column() {
        let coord = TileCoord::new(12, 34, 5);
        assert_eq!(coord.to_string(), "5/34/12");
        assert_eq!(coord.key(), "5:12:34");
    }
}

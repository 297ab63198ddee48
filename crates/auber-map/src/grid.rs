//! TileGrid: the station's static collision layer.

use glam::Vec2;

use auber_core::constants::TILE_SIZE;
use auber_core::types::Rect;

/// Static collision geometry consumed by the simulation.
///
/// Implemented by [`TileGrid`]; a renderer-backed tile map can implement it
/// directly instead.
pub trait CollisionMap {
    /// Tile coordinates containing a world-space point.
    fn world_to_tile(&self, point: Vec2) -> (i32, i32);

    /// Whether the collision layer has a tile at the given coordinates.
    /// Coordinates outside the map are empty.
    fn is_occupied(&self, tile_x: i32, tile_y: i32) -> bool;

    /// Whether the tile under a world-space point is occupied.
    fn blocks(&self, point: Vec2) -> bool {
        let (tx, ty) = self.world_to_tile(point);
        self.is_occupied(tx, ty)
    }
}

/// Rectangular grid of collision cells. Row 0 is the bottom of the map (y up).
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tile_size: Vec2,
    /// Row-major occupancy, bottom row first.
    cells: Vec<bool>,
}

impl TileGrid {
    /// Empty grid with square tiles of [`TILE_SIZE`].
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_tile_size(width, height, Vec2::splat(TILE_SIZE))
    }

    pub fn with_tile_size(width: u32, height: u32, tile_size: Vec2) -> Self {
        Self {
            width,
            height,
            tile_size,
            cells: vec![false; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_size(&self) -> Vec2 {
        self.tile_size
    }

    /// Mark a cell as occupied or clear. Out-of-range coordinates are ignored.
    pub fn set_occupied(&mut self, tile_x: u32, tile_y: u32, occupied: bool) {
        if let Some(idx) = self.index(tile_x as i32, tile_y as i32) {
            self.cells[idx] = occupied;
        }
    }

    /// World-space origin (bottom-left corner) of a tile.
    pub fn tile_origin(&self, tile_x: u32, tile_y: u32) -> Vec2 {
        Vec2::new(tile_x as f32, tile_y as f32) * self.tile_size
    }

    /// World-space extent of the whole grid.
    pub fn world_bounds(&self) -> Rect {
        Rect::new(
            Vec2::ZERO,
            Vec2::new(self.width as f32, self.height as f32) * self.tile_size,
        )
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    fn index(&self, tile_x: i32, tile_y: i32) -> Option<usize> {
        if tile_x < 0 || tile_y < 0 || tile_x >= self.width as i32 || tile_y >= self.height as i32 {
            return None;
        }
        Some(tile_y as usize * self.width as usize + tile_x as usize)
    }
}

impl CollisionMap for TileGrid {
    fn world_to_tile(&self, point: Vec2) -> (i32, i32) {
        let tile = (point / self.tile_size).floor();
        (tile.x as i32, tile.y as i32)
    }

    fn is_occupied(&self, tile_x: i32, tile_y: i32) -> bool {
        self.index(tile_x, tile_y).is_some_and(|idx| self.cells[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_walled_grid() -> TileGrid {
        // 4x3 grid with a wall on the right column.
        let mut grid = TileGrid::new(4, 3);
        for y in 0..3 {
            grid.set_occupied(3, y, true);
        }
        grid
    }

    #[test]
    fn test_world_to_tile() {
        let grid = make_walled_grid();
        assert_eq!(grid.world_to_tile(Vec2::new(0.0, 0.0)), (0, 0));
        assert_eq!(grid.world_to_tile(Vec2::new(31.9, 32.0)), (0, 1));
        assert_eq!(grid.world_to_tile(Vec2::new(100.0, 70.0)), (3, 2));
        assert_eq!(grid.world_to_tile(Vec2::new(-1.0, -0.5)), (-1, -1));
    }

    #[test]
    fn test_occupancy_and_bounds() {
        let grid = make_walled_grid();
        assert!(grid.is_occupied(3, 0));
        assert!(grid.is_occupied(3, 2));
        assert!(!grid.is_occupied(0, 0));
        assert!(!grid.is_occupied(-1, 0), "Outside the map is empty");
        assert!(!grid.is_occupied(4, 1), "Outside the map is empty");
        assert_eq!(grid.occupied_count(), 3);
    }

    #[test]
    fn test_blocks_world_point() {
        let grid = make_walled_grid();
        assert!(grid.blocks(Vec2::new(96.0, 10.0)));
        assert!(!grid.blocks(Vec2::new(95.9, 10.0)));
        assert!(!grid.blocks(Vec2::new(500.0, 500.0)));
    }

    #[test]
    fn test_set_occupied_out_of_range_is_ignored() {
        let mut grid = TileGrid::new(2, 2);
        grid.set_occupied(5, 5, true);
        assert_eq!(grid.occupied_count(), 0);
        assert_eq!(grid.tile_origin(1, 1), Vec2::new(32.0, 32.0));
        assert_eq!(grid.world_bounds().max(), Vec2::new(64.0, 64.0));
    }
}

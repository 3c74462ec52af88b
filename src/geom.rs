//! Mapping between board tiles and the continuous presentation space.
//!
//! The board lies in the XZ plane centered on the origin: `col` runs along +X,
//! `row` along +Z (toward the viewer), Y is up.

use glam::Vec3;

use crate::core::map::{Grid, Tile};

/// Center of a tile in presentation space.
pub fn tile_to_world(grid: Grid, size: f32, tile: Tile) -> Vec3 {
    let x = (tile.col as f32 - (grid.cols - 1) as f32 / 2.0) * size;
    let z = (tile.row as f32 - (grid.rows - 1) as f32 / 2.0) * size;
    Vec3::new(x, 0.0, z)
}

/// The tile under a presentation-space point, if it is on the board.
pub fn board_from_point(grid: Grid, size: f32, point: Vec3) -> Option<Tile> {
    let half_width = grid.cols as f32 * size / 2.0;
    let half_height = grid.rows as f32 * size / 2.0;
    let col = ((point.x + half_width) / size).floor();
    let row = ((point.z + half_height) / size).floor();
    if !col.is_finite() || !row.is_finite() {
        return None;
    }
    let tile = Tile::new(row as i32, col as i32);
    if grid.is_inboard(tile) {
        Some(tile)
    } else {
        None
    }
}

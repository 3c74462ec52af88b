use std::{fmt, iter::repeat};

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Distance(pub i32);

/// A discrete cell of the board.
///
/// Identity is structural: two tiles with the same coordinates are the same tile.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    pub row: i32,
    pub col: i32,
}

impl Tile {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

/// Canonical `"row:col"` key of a tile.
pub fn tile_key(tile: Tile) -> String {
    tile.to_string()
}

/// Manhattan distance.
pub fn distance(a: Tile, b: Tile) -> Distance {
    Distance((a.row - b.row).abs() + (a.col - b.col).abs())
}

/// Are the tiles 4-adjacent?
pub fn is_adjacent(a: Tile, b: Tile) -> bool {
    distance(a, b) == Distance(1)
}

/// The largest board a search map is allocated for.
pub const MAX_TILES: usize = 256 * 256;

/// Board dimensions.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    pub rows: i32,
    pub cols: i32,
}

impl Grid {
    pub const fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }

    pub fn within_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && row < self.rows && col >= 0 && col < self.cols
    }

    pub fn is_inboard(&self, tile: Tile) -> bool {
        self.within_bounds(tile.row, tile.col)
    }

    pub fn tiles_count(&self) -> usize {
        (self.rows.max(0) as usize).saturating_mul(self.cols.max(0) as usize)
    }

    pub fn iter(&self) -> TileIter {
        TileIter {
            cursor: Tile::new(0, 0),
            grid: *self,
        }
    }
}

/// Row-major walk over every tile of a grid.
#[derive(Clone, Debug)]
pub struct TileIter {
    cursor: Tile,
    grid: Grid,
}

impl Iterator for TileIter {
    type Item = Tile;

    fn next(&mut self) -> Option<Tile> {
        if self.grid.cols <= 0 || self.cursor.row >= self.grid.rows {
            return None;
        }
        let current = self.cursor;
        self.cursor.col += 1;
        if self.cursor.col >= self.grid.cols {
            self.cursor.col = 0;
            self.cursor.row += 1;
        }
        Some(current)
    }
}

/// Dense per-tile storage.
#[derive(Debug, Clone)]
pub struct TileMap<T: Copy + fmt::Debug> {
    tiles: Vec<T>,
    grid: Grid,
}

impl<T: Copy + Default + fmt::Debug> TileMap<T> {
    pub fn new(grid: Grid) -> Self {
        let tiles = repeat(Default::default()).take(grid.tiles_count()).collect();
        Self { tiles, grid }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn iter(&self) -> TileIter {
        self.grid.iter()
    }

    pub fn is_inboard(&self, tile: Tile) -> bool {
        self.grid.is_inboard(tile)
    }

    fn tile_to_index(&self, tile: Tile) -> usize {
        tile.row as usize * self.grid.cols as usize + tile.col as usize
    }

    pub fn tile(&self, tile: Tile) -> T {
        assert!(self.is_inboard(tile));
        self.tiles[self.tile_to_index(tile)]
    }

    pub fn set_tile(&mut self, tile: Tile, value: T) {
        assert!(self.is_inboard(tile));
        let index = self.tile_to_index(tile);
        self.tiles[index] = value;
    }
}

/// The four grid directions, in the fixed exploration order used by every search.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dir {
    /// +row, toward the viewer
    South,

    /// -row
    North,

    /// +col
    East,

    /// -col
    West,
}

const DIR_TO_POS_DIFF: [[i32; 2]; 4] = [[1, 0], [-1, 0], [0, 1], [0, -1]];

impl Dir {
    pub fn from_int(n: i32) -> Self {
        assert!((0..4).contains(&n));
        let dirs = [Dir::South, Dir::North, Dir::East, Dir::West];
        dirs[n as usize]
    }

    pub fn to_int(self) -> i32 {
        match self {
            Dir::South => 0,
            Dir::North => 1,
            Dir::East => 2,
            Dir::West => 3,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Dir::South => Dir::North,
            Dir::North => Dir::South,
            Dir::East => Dir::West,
            Dir::West => Dir::East,
        }
    }

    pub fn get_neighbor_pos(pos: Tile, dir: Dir) -> Tile {
        let diff = DIR_TO_POS_DIFF[dir.to_int() as usize];
        Tile {
            row: pos.row + diff[0],
            col: pos.col + diff[1],
        }
    }
}

#[derive(Clone, Debug)]
pub struct DirIter {
    index: i32,
}

pub fn dirs() -> DirIter {
    DirIter { index: 0 }
}

impl Iterator for DirIter {
    type Item = Dir;

    fn next(&mut self) -> Option<Dir> {
        let max = DIR_TO_POS_DIFF.len() as i32;
        let next_dir = if self.index >= max {
            None
        } else {
            Some(Dir::from_int(self.index))
        };
        self.index += 1;
        next_dir
    }
}

/// In-bounds 4-neighbors of a tile in exploration order.
pub fn neighbors(grid: Grid, tile: Tile) -> impl Iterator<Item = Tile> {
    dirs()
        .map(move |dir| Dir::get_neighbor_pos(tile, dir))
        .filter(move |&pos| grid.is_inboard(pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRID: Grid = Grid::new(10, 10);

    #[test]
    fn within_bounds_edges() {
        assert!(GRID.within_bounds(0, 0));
        assert!(GRID.within_bounds(9, 9));
        assert!(!GRID.within_bounds(10, 0));
        assert!(!GRID.within_bounds(0, 10));
        assert!(!GRID.within_bounds(-1, 3));
        assert!(!GRID.within_bounds(3, -1));
    }

    #[test]
    fn tiles_count_does_not_overflow() {
        assert_eq!(Grid::new(10, 10).tiles_count(), 100);
        assert_eq!(Grid::new(0, 10).tiles_count(), 0);
        assert_eq!(Grid::new(-3, 10).tiles_count(), 0);
        assert!(Grid::new(50_000, 50_000).tiles_count() > MAX_TILES);
        assert_eq!(
            Grid::new(i32::MAX, i32::MAX).tiles_count(),
            (i32::MAX as usize).saturating_mul(i32::MAX as usize)
        );
    }

    #[test]
    fn tile_key_format() {
        assert_eq!(tile_key(Tile::new(8, 5)), "8:5");
        assert_eq!(tile_key(Tile::new(0, 12)), "0:12");
    }

    #[test]
    fn tile_iter_is_row_major() {
        let grid = Grid::new(2, 3);
        let tiles: Vec<_> = grid.iter().collect();
        assert_eq!(tiles.len(), 6);
        assert_eq!(tiles[0], Tile::new(0, 0));
        assert_eq!(tiles[2], Tile::new(0, 2));
        assert_eq!(tiles[3], Tile::new(1, 0));
        assert_eq!(tiles[5], Tile::new(1, 2));
    }

    #[test]
    fn neighbors_order_and_bounds() {
        let inner: Vec<_> = neighbors(GRID, Tile::new(4, 4)).collect();
        assert_eq!(
            inner,
            vec![
                Tile::new(5, 4),
                Tile::new(3, 4),
                Tile::new(4, 5),
                Tile::new(4, 3),
            ]
        );
        let corner: Vec<_> = neighbors(GRID, Tile::new(0, 0)).collect();
        assert_eq!(corner, vec![Tile::new(1, 0), Tile::new(0, 1)]);
    }

    #[test]
    fn dir_round_trip() {
        let origin = Tile::new(3, 3);
        for dir in dirs() {
            let neighbor = Dir::get_neighbor_pos(origin, dir);
            assert!(is_adjacent(origin, neighbor));
            assert_eq!(Dir::get_neighbor_pos(neighbor, dir.opposite()), origin);
        }
    }

    #[test]
    fn adjacency_excludes_diagonals() {
        let a = Tile::new(2, 2);
        assert!(is_adjacent(a, Tile::new(2, 3)));
        assert!(!is_adjacent(a, Tile::new(3, 3)));
        assert!(!is_adjacent(a, a));
    }

    #[test]
    fn tile_map_set_get() {
        let mut map: TileMap<i32> = TileMap::new(Grid::new(3, 4));
        map.set_tile(Tile::new(2, 3), 7);
        assert_eq!(map.tile(Tile::new(2, 3)), 7);
        assert_eq!(map.tile(Tile::new(0, 0)), 0);
    }
}

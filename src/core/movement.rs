use std::collections::{HashSet, VecDeque};

use log::trace;
use serde::{Deserialize, Serialize};

use crate::core::map::{self, dirs, Dir, Distance, Grid, Tile, TileMap};

/// Tiles a single search treats as impassable.
pub type Blocked = HashSet<Tile>;

/// An ordered walk over 4-adjacent tiles without revisits.
///
/// The first tile is the start. An empty path means "act in place".
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct Path {
    tiles: Vec<Tile>,
}

impl Path {
    pub fn new(tiles: Vec<Tile>) -> Self {
        for window in tiles.windows(2) {
            assert!(map::is_adjacent(window[0], window[1]), "{:?}", tiles);
        }
        debug_assert_eq!(
            tiles.iter().collect::<HashSet<_>>().len(),
            tiles.len(),
            "path revisits a tile: {:?}",
            tiles,
        );
        Self { tiles }
    }

    /// Zero movement.
    pub fn in_place() -> Self {
        Self { tiles: Vec::new() }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn from(&self) -> Option<Tile> {
        self.tiles.first().copied()
    }

    pub fn to(&self) -> Option<Tile> {
        self.tiles.last().copied()
    }

    /// Number of moves, start excluded.
    pub fn cost(&self) -> Distance {
        Distance(self.tiles.len().saturating_sub(1) as i32)
    }

    /// The step slice: up to `range` tiles following the start.
    ///
    /// Whatever lies beyond is dropped; nothing carries over to the next turn.
    pub fn truncate(&self, range: Distance) -> Vec<Tile> {
        let range = range.0.max(0) as usize;
        self.tiles.iter().skip(1).take(range).copied().collect()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Node {
    cost: Distance,
    parent_dir: Option<Dir>,
}

impl Node {
    fn is_reached(self) -> bool {
        self.cost != unreached()
    }
}

impl Default for Node {
    fn default() -> Self {
        Self {
            cost: Distance(0),
            parent_dir: None,
        }
    }
}

const fn unreached() -> Distance {
    Distance(i32::MAX)
}

/// Breadth-first search over the 4-connected grid.
///
/// Neighbors are always explored in `map::dirs()` order through a FIFO queue
/// and a tile is claimed by the first parent that reaches it, so the same
/// inputs always produce the same path.
#[derive(Clone, Debug)]
pub struct Pathfinder {
    queue: VecDeque<Tile>,
    map: TileMap<Node>,
    start: Option<Tile>,
}

impl Pathfinder {
    pub fn new(grid: Grid) -> Self {
        Self {
            queue: VecDeque::new(),
            map: TileMap::new(grid),
            start: None,
        }
    }

    fn process_neighbor_pos(&mut self, original_pos: Tile, dir: Dir) {
        let neighbor_pos = Dir::get_neighbor_pos(original_pos, dir);
        let old_cost = self.map.tile(original_pos).cost;
        let new_cost = Distance(old_cost.0 + 1);
        let node = self.map.tile(neighbor_pos);
        if node.cost > new_cost {
            let updated = Node {
                cost: new_cost,
                parent_dir: Some(dir.opposite()),
            };
            self.map.set_tile(neighbor_pos, updated);
            self.queue.push_back(neighbor_pos);
        }
    }

    fn clean_map(&mut self) {
        for pos in self.map.iter() {
            let node = Node {
                cost: unreached(),
                parent_dir: None,
            };
            self.map.set_tile(pos, node);
        }
    }

    fn try_to_push_neighbors(&mut self, blocked: &Blocked, pos: Tile) {
        assert!(self.map.is_inboard(pos));
        for dir in dirs() {
            let neighbor_pos = Dir::get_neighbor_pos(pos, dir);
            if self.map.is_inboard(neighbor_pos) && !blocked.contains(&neighbor_pos) {
                self.process_neighbor_pos(pos, dir);
            }
        }
    }

    fn push_start_pos_to_queue(&mut self, start_pos: Tile) {
        self.map.set_tile(start_pos, Node::default());
        self.queue.push_back(start_pos);
    }

    /// Floods the whole grid from `start`.
    ///
    /// `start` itself is never checked against `blocked`.
    pub fn fill_map(&mut self, start: Tile, blocked: &Blocked) {
        assert!(self.queue.is_empty());
        self.clean_map();
        self.start = None;
        if !self.map.is_inboard(start) {
            return;
        }
        self.start = Some(start);
        self.push_start_pos_to_queue(start);
        while let Some(pos) = self.queue.pop_front() {
            self.try_to_push_neighbors(blocked, pos);
        }
    }

    /// Walks parent pointers back from `destination` to the filled start.
    pub fn path(&self, destination: Tile) -> Option<Path> {
        self.start?;
        if !self.map.is_inboard(destination) || !self.map.tile(destination).is_reached() {
            return None;
        }
        let mut path = vec![destination];
        let mut pos = destination;
        while self.map.tile(pos).cost != Distance(0) {
            let parent_dir = self.map.tile(pos).parent_dir?;
            pos = Dir::get_neighbor_pos(pos, parent_dir);
            assert!(self.map.is_inboard(pos));
            path.push(pos);
        }
        path.reverse();
        Some(Path::new(path))
    }
}

/// Shortest path by step count from `start` to `goal`, or `None` when the goal
/// is off the board or walled off.
pub fn find_path(grid: Grid, start: Tile, goal: Tile, blocked: &Blocked) -> Option<Path> {
    if !grid.is_inboard(goal) {
        return None;
    }
    let mut pathfinder = Pathfinder::new(grid);
    pathfinder.fill_map(start, blocked);
    let path = pathfinder.path(goal)?;
    debug_assert_eq!(path.from(), Some(start));
    Some(path)
}

/// Plans a move of the unit at `start` toward `target`, treating `foe` as
/// impassable.
///
/// Targeting the foe's own tile means "go and hit it": if `start` already
/// touches the foe the path is empty, otherwise it is the shortest path to the
/// nearest reachable tile adjacent to the foe (flanking search).
pub fn compute_movement_path(grid: Grid, start: Tile, target: Tile, foe: Tile) -> Option<Path> {
    let mut blocked = Blocked::new();
    blocked.insert(foe);
    if target != foe {
        return find_path(grid, start, target, &blocked);
    }
    if map::is_adjacent(start, foe) {
        return Some(Path::in_place());
    }
    let mut pathfinder = Pathfinder::new(grid);
    pathfinder.fill_map(start, &blocked);
    let mut best: Option<Path> = None;
    for dir in dirs() {
        let candidate = Dir::get_neighbor_pos(foe, dir);
        if !grid.is_inboard(candidate) || candidate == foe {
            continue;
        }
        // Only a start next to the foe could be a candidate, handled above.
        debug_assert_ne!(candidate, start);
        let path = match pathfinder.path(candidate) {
            Some(path) => path,
            None => continue,
        };
        let is_shorter = best
            .as_ref()
            .map_or(true, |best| path.cost() < best.cost());
        if is_shorter {
            best = Some(path);
        }
    }
    trace!(
        "compute_movement_path: {} -> flank of {}: ends at {:?}",
        start,
        foe,
        best.as_ref().and_then(Path::to)
    );
    best
}

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

pub use tile::Tile;
pub use tiletype::TileType;

pub mod tile;
pub mod tiletype;

/// The carved grid. Tiles are stored column-major and indexed `[x][y]`.
#[derive(Default, Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Map {
    pub tiles: Vec<Vec<Tile>>,
    pub width: i32,
    pub height: i32,
    pub depth: i32,
}

impl Map {
    /// A fully solid grid, the starting point of every carving algorithm.
    pub fn new(new_depth: i32, width: i32, height: i32) -> Map {
        Map {
            tiles: vec![vec![Tile::wall(); height as usize]; width as usize],
            width,
            height,
            depth: new_depth,
        }
    }

    /// A fully open grid; used by layouts that build walls instead of
    /// carving floors.
    pub fn new_open(new_depth: i32, width: i32, height: i32) -> Map {
        Map {
            tiles: vec![vec![Tile::ground(); height as usize]; width as usize],
            width,
            height,
            depth: new_depth,
        }
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    pub fn tile(&self, x: i32, y: i32) -> &Tile {
        &self.tiles[x as usize][y as usize]
    }

    pub fn tile_mut(&mut self, x: i32, y: i32) -> &mut Tile {
        &mut self.tiles[x as usize][y as usize]
    }

    /// Out-of-bounds coordinates count as blocked.
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        !self.in_bounds(x, y) || self.tile(x, y).blocked
    }

    pub fn carve(&mut self, x: i32, y: i32) {
        if self.in_bounds(x, y) {
            self.tile_mut(x, y).carve();
        }
    }

    pub fn block(&mut self, x: i32, y: i32) {
        if self.in_bounds(x, y) {
            self.tile_mut(x, y).block();
        }
    }

    pub fn get_total_cleared_tiles(&self) -> usize {
        self.tiles
            .iter()
            .map(|col| col.iter().filter(|t| !t.blocked).count())
            .sum()
    }

    pub fn cleared_tiles(&self) -> Vec<(i32, i32)> {
        self.positions_where(|t| !t.blocked)
    }

    /// Passable tiles that have not been excluded from spawning.
    pub fn spawn_locations(&self) -> Vec<(i32, i32)> {
        self.positions_where(Tile::is_spawnable)
    }

    fn positions_where<F: Fn(&Tile) -> bool>(&self, pred: F) -> Vec<(i32, i32)> {
        let mut result = Vec::new();
        for (x, col) in self.tiles.iter().enumerate() {
            for (y, tile) in col.iter().enumerate() {
                if pred(tile) {
                    result.push((x as i32, y as i32));
                }
            }
        }
        result
    }

    /// Number of passable orthogonal neighbours of `(x, y)`.
    pub fn open_neighbours(&self, x: i32, y: i32) -> usize {
        [(0, -1), (0, 1), (1, 0), (-1, 0)]
            .iter()
            .filter(|(dx, dy)| !self.is_blocked(x + dx, y + dy))
            .count()
    }

    /// Number of 4-connected groups of passable tiles.
    pub fn connected_areas(&self) -> usize {
        let mut seen = vec![vec![false; self.height as usize]; self.width as usize];
        let mut areas = 0;
        for (sx, sy) in self.cleared_tiles() {
            if seen[sx as usize][sy as usize] {
                continue;
            }
            areas += 1;
            seen[sx as usize][sy as usize] = true;
            let mut open_list = VecDeque::from([(sx, sy)]);
            while let Some((x, y)) = open_list.pop_front() {
                for (dx, dy) in [(0, -1), (0, 1), (1, 0), (-1, 0)] {
                    let (nx, ny) = (x + dx, y + dy);
                    if !self.is_blocked(nx, ny) && !seen[nx as usize][ny as usize] {
                        seen[nx as usize][ny as usize] = true;
                        open_list.push_back((nx, ny));
                    }
                }
            }
        }
        areas
    }

    /// Renders the grid as text, one row per line. Handy in test failure
    /// messages.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(((self.width + 1) * self.height) as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                let tile = self.tile(x, y);
                out.push(match (tile.tile_type, tile.blocked) {
                    (_, true) => '#',
                    (TileType::Water, false) => '~',
                    (_, false) if !tile.can_spawn => ',',
                    _ => '.',
                });
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_map_is_solid() {
        let map = Map::new(1, 10, 8);
        assert_eq!(map.tiles.len(), 10);
        assert_eq!(map.tiles[0].len(), 8);
        assert_eq!(map.get_total_cleared_tiles(), 0);
        assert!(map.spawn_locations().is_empty());
    }

    #[test]
    fn open_map_is_fully_cleared() {
        let map = Map::new_open(1, 6, 5);
        assert_eq!(map.get_total_cleared_tiles(), 30);
        assert_eq!(map.spawn_locations().len(), 30);
    }

    #[test]
    fn carve_ignores_out_of_bounds() {
        let mut map = Map::new(1, 4, 4);
        map.carve(-1, 2);
        map.carve(4, 0);
        map.carve(1, 1);
        assert_eq!(map.cleared_tiles(), vec![(1, 1)]);
        assert!(map.is_blocked(-1, 0));
    }

    #[test]
    fn open_neighbours_counts_cardinals_only() {
        let mut map = Map::new(1, 5, 5);
        map.carve(2, 2);
        map.carve(2, 1);
        map.carve(3, 3);
        assert_eq!(map.open_neighbours(2, 2), 1);
        assert_eq!(map.open_neighbours(2, 1), 1);
    }

    #[test]
    fn connected_areas_ignore_diagonals() {
        let mut map = Map::new(1, 6, 6);
        assert_eq!(map.connected_areas(), 0);
        map.carve(1, 1);
        map.carve(2, 2);
        assert_eq!(map.connected_areas(), 2);
        map.carve(2, 1);
        assert_eq!(map.connected_areas(), 1);
        map.carve(4, 4);
        assert_eq!(map.connected_areas(), 2);
    }
}

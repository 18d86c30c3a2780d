use serde::{Deserialize, Serialize};

use crate::map::tiletype::TileType;

/// A single cell of the grid. It may or may not be blocked, and may or may
/// not block sight.
#[derive(PartialEq, Eq, Debug, Copy, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub blocked: bool,
    pub block_sight: bool,
    pub can_spawn: bool,
    pub tile_type: TileType,
}

impl Tile {
    pub fn wall() -> Self {
        Self {
            blocked: true,
            block_sight: true,
            can_spawn: true,
            tile_type: TileType::Wall,
        }
    }

    pub fn ground() -> Self {
        Self {
            blocked: false,
            block_sight: false,
            can_spawn: true,
            tile_type: TileType::Ground,
        }
    }

    pub fn carve(&mut self) {
        self.blocked = false;
        self.block_sight = false;
        self.tile_type = TileType::Ground;
    }

    pub fn block(&mut self) {
        self.blocked = true;
        self.block_sight = true;
        self.tile_type = TileType::Wall;
    }

    pub fn is_spawnable(&self) -> bool {
        !self.blocked && self.can_spawn
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::wall()
    }
}

use serde::{Deserialize, Serialize};

/// Render hint owned by the tile; passability lives on the tile flags.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone, Serialize, Deserialize)]
pub enum TileType {
    Wall,
    Ground,
    Water,
}

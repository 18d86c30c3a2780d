#[macro_use]
extern crate lazy_static;

pub mod components;
pub mod error;
pub mod map;
pub mod map_builders;
pub mod random_tables;
pub mod raws;
pub mod rect;
pub mod settings;
pub mod spawner;

pub use bracket_random::prelude::RandomNumberGenerator;

pub use crate::error::{GenError, Result};
pub use crate::map::{Map, Tile, TileType};
pub use crate::map_builders::{level_builder, BuilderChain, BuilderMap, DungeonKind};
pub use crate::rect::Rect;
pub use crate::settings::GeneratorSettings;
pub use crate::spawner::SpawnList;

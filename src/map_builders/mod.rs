use bracket_random::prelude::RandomNumberGenerator;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use specs::World;
use strum_macros::{Display, EnumIter, EnumString};

use crate::components::Position;
use crate::error::{GenError, Result};
use crate::map::Map;
use crate::map_builders::bsp_tree::BspTreeBuilder;
use crate::map_builders::buildings::BuildingsBuilder;
use crate::map_builders::drunkards::DrunkardsWalkBuilder;
use crate::map_builders::maze::MazeBuilder;
use crate::map_builders::random_spawn_points::RandomSpawnPoints;
use crate::map_builders::room_based_spawner::RoomBasedSpawner;
use crate::map_builders::room_based_stairs::RoomBasedStairs;
use crate::map_builders::room_based_starting_position::RoomBasedStartingPosition;
use crate::map_builders::tunnel::TunnelBuilder;
use crate::map_builders::water_noise::WaterNoise;
use crate::map_builders::zone_spawner::ZoneSpawner;
use crate::raws;
use crate::rect::Rect;
use crate::settings::GeneratorSettings;
use crate::spawner::{spawn_entity, stairs, SpawnList};

pub mod bsp_tree;
pub mod buildings;
pub mod common;
pub mod drunkards;
pub mod maze;
pub mod random_spawn_points;
pub mod room_based_spawner;
pub mod room_based_stairs;
pub mod room_based_starting_position;
pub mod tunnel;
pub mod water_noise;
pub mod zone_spawner;

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DungeonKind {
    Tunnel,
    BspTree,
    Maze,
    DrunkardsWalk,
    Buildings,
}

impl DungeonKind {
    /// Uniform pick among the layouts used for the levels below the surface.
    pub fn random_underground(rng: &mut RandomNumberGenerator) -> DungeonKind {
        match rng.roll_dice(1, 4) {
            1 => DungeonKind::BspTree,
            2 => DungeonKind::DrunkardsWalk,
            3 => DungeonKind::Maze,
            _ => DungeonKind::Tunnel,
        }
    }

    /// Layouts that report rooms rather than zones.
    pub fn is_room_based(&self) -> bool {
        matches!(self, DungeonKind::Tunnel | DungeonKind::BspTree | DungeonKind::Maze)
    }
}

pub struct BuilderMap {
    pub spawn_list: SpawnList,
    pub map: Map,
    pub starting_position: Option<Position>,
    pub stairs_position: Option<Position>,
    pub rooms: Option<Vec<Rect>>,
    pub zones: Option<Vec<Rect>>,
    pub history: Vec<Map>,
    pub width: i32,
    pub height: i32,
    pub record_history: bool,
}

impl BuilderMap {
    fn take_snapshot(&mut self) {
        if self.record_history {
            self.history.push(self.map.clone());
        }
    }

    /// Tiles claimed by the player start and the stairs, which spawners
    /// must leave free.
    pub fn reserved_tiles(&self) -> Vec<(i32, i32)> {
        [self.starting_position, self.stairs_position]
            .iter()
            .flatten()
            .map(|pos| (pos.x, pos.y))
            .collect()
    }
}

pub struct BuilderChain {
    starter: Option<Box<dyn InitialMapBuilder>>,
    builders: Vec<Box<dyn MetaMapBuilder>>,
    pub build_data: BuilderMap,
}

impl BuilderChain {
    pub fn new(new_depth: i32, width: i32, height: i32) -> BuilderChain {
        BuilderChain {
            starter: None,
            builders: Vec::new(),
            build_data: BuilderMap {
                spawn_list: Vec::new(),
                map: Map::new(new_depth, width, height),
                starting_position: None,
                stairs_position: None,
                rooms: None,
                zones: None,
                history: Vec::new(),
                width,
                height,
                record_history: false,
            },
        }
    }

    /// Replaces any previously set starter.
    pub fn start_with(&mut self, starter: Box<dyn InitialMapBuilder>) {
        self.starter = Some(starter);
    }

    pub fn with(&mut self, metabuilder: Box<dyn MetaMapBuilder>) {
        self.builders.push(metabuilder);
    }

    pub fn record_history(&mut self, record: bool) {
        self.build_data.record_history = record;
    }

    pub fn build_map(&mut self, rng: &mut RandomNumberGenerator) -> Result<()> {
        match &mut self.starter {
            None => return Err(GenError::NoStarter),
            Some(starter) => starter.build_map(rng, &mut self.build_data)?,
        }
        for metabuilder in self.builders.iter_mut() {
            metabuilder.build_map(rng, &mut self.build_data)?;
        }
        info!(
            "built a {}x{} map at depth {}: {} tiles cleared, {} spawns",
            self.build_data.width,
            self.build_data.height,
            self.build_data.map.depth,
            self.build_data.map.get_total_cleared_tiles(),
            self.build_data.spawn_list.len()
        );
        Ok(())
    }

    /// Turns the spawn list and the stairs into entities.
    pub fn spawn_entities(&self, ecs: &mut World) {
        for entity in self.build_data.spawn_list.iter() {
            spawn_entity(ecs, &(&entity.0, &entity.1));
        }
        if let Some(pos) = &self.build_data.stairs_position {
            stairs(ecs, pos.x, pos.y, self.build_data.map.depth);
        }
    }
}

pub trait InitialMapBuilder {
    fn build_map(&mut self, rng: &mut RandomNumberGenerator, build_data: &mut BuilderMap) -> Result<()>;
}

pub trait MetaMapBuilder {
    fn build_map(&mut self, rng: &mut RandomNumberGenerator, build_data: &mut BuilderMap) -> Result<()>;
}

fn room_based_placement(chain: &mut BuilderChain) {
    chain.with(RoomBasedStartingPosition::new());
    chain.with(RoomBasedStairs::new());
    chain.with(RoomBasedSpawner::new());
}

/// Assembles the chain for one level. Settings are validated for the chosen
/// layout before anything is built, and the archetype store is loaded on
/// first use.
pub fn level_builder(kind: DungeonKind, settings: &GeneratorSettings) -> Result<BuilderChain> {
    settings.validate(kind)?;
    raws::ensure_loaded()?;
    debug!("assembling a {} level at depth {}", kind, settings.depth);

    let mut chain = BuilderChain::new(settings.depth, settings.width, settings.height);
    match kind {
        DungeonKind::Tunnel => chain.start_with(TunnelBuilder::new(settings)),
        DungeonKind::BspTree => chain.start_with(BspTreeBuilder::new(settings)),
        DungeonKind::Maze => chain.start_with(MazeBuilder::new(settings)),
        DungeonKind::DrunkardsWalk => chain.start_with(DrunkardsWalkBuilder::new(settings.drunkard.clone())),
        DungeonKind::Buildings => chain.start_with(BuildingsBuilder::new(settings)),
    }
    if settings.water_noise {
        chain.with(WaterNoise::new());
    }
    match kind {
        DungeonKind::Tunnel | DungeonKind::BspTree | DungeonKind::Maze => room_based_placement(&mut chain),
        DungeonKind::DrunkardsWalk => {
            chain.with(RandomSpawnPoints::new());
            chain.with(ZoneSpawner::new());
        }
        DungeonKind::Buildings => chain.with(RandomSpawnPoints::new()),
    }
    Ok(chain)
}

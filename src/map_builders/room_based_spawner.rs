use bracket_random::prelude::RandomNumberGenerator;
use log::debug;

use crate::error::{GenError, Result};
use crate::map_builders::{BuilderMap, MetaMapBuilder};
use crate::spawner::spawn_room;

/// Populates every room except the first, which holds the player.
pub struct RoomBasedSpawner {}

impl MetaMapBuilder for RoomBasedSpawner {
    fn build_map(&mut self, rng: &mut RandomNumberGenerator, build_data: &mut BuilderMap) -> Result<()> {
        self.build(rng, build_data)
    }
}

impl RoomBasedSpawner {
    pub fn new() -> Box<Self> {
        Box::new(Self {})
    }

    fn build(&mut self, rng: &mut RandomNumberGenerator, build_data: &mut BuilderMap) -> Result<()> {
        let rooms = build_data.rooms.as_ref().ok_or(GenError::MissingRooms("room based spawning"))?;
        let reserved = build_data.reserved_tiles();
        for room in rooms.iter().skip(1) {
            spawn_room(rng, room, build_data.map.depth, &reserved, &mut build_data.spawn_list);
        }
        debug!("spawned {} entities across {} rooms", build_data.spawn_list.len(), rooms.len().saturating_sub(1));
        Ok(())
    }
}

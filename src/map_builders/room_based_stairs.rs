use bracket_random::prelude::RandomNumberGenerator;

use crate::components::Position;
use crate::error::{GenError, Result};
use crate::map_builders::{BuilderMap, MetaMapBuilder};

/// Puts the way down in the centre of the last room.
pub struct RoomBasedStairs {}

impl MetaMapBuilder for RoomBasedStairs {
    fn build_map(&mut self, rng: &mut RandomNumberGenerator, build_data: &mut BuilderMap) -> Result<()> {
        self.build(rng, build_data)
    }
}

impl RoomBasedStairs {
    pub fn new() -> Box<Self> {
        Box::new(Self {})
    }

    fn build(&mut self, _rng: &mut RandomNumberGenerator, build_data: &mut BuilderMap) -> Result<()> {
        let rooms = build_data.rooms.as_ref().ok_or(GenError::MissingRooms("room based stairs"))?;
        let last = rooms.last().ok_or(GenError::MissingRooms("room based stairs"))?;
        let (x, y) = last.center();
        build_data.stairs_position = Some(Position { x, y });
        Ok(())
    }
}

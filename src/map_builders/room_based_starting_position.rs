use bracket_random::prelude::RandomNumberGenerator;

use crate::components::Position;
use crate::error::{GenError, Result};
use crate::map_builders::{BuilderMap, MetaMapBuilder};

/// Starts the player in the centre of the first room.
pub struct RoomBasedStartingPosition {}

impl MetaMapBuilder for RoomBasedStartingPosition {
    fn build_map(&mut self, rng: &mut RandomNumberGenerator, build_data: &mut BuilderMap) -> Result<()> {
        self.build(rng, build_data)
    }
}

impl RoomBasedStartingPosition {
    pub fn new() -> Box<Self> {
        Box::new(Self {})
    }

    fn build(&mut self, _rng: &mut RandomNumberGenerator, build_data: &mut BuilderMap) -> Result<()> {
        let rooms = build_data
            .rooms
            .as_ref()
            .ok_or(GenError::MissingRooms("room based starting position"))?;
        let first = rooms
            .first()
            .ok_or(GenError::MissingRooms("room based starting position"))?;
        let (x, y) = first.center();
        build_data.starting_position = Some(Position { x, y });
        Ok(())
    }
}

use bracket_random::prelude::RandomNumberGenerator;

use crate::components::Position;
use crate::error::{GenError, Result};
use crate::map_builders::{BuilderMap, MetaMapBuilder};

/// Picks two different spawnable tiles, one for the player and one for the
/// stairs.
pub struct RandomSpawnPoints {}

impl MetaMapBuilder for RandomSpawnPoints {
    fn build_map(&mut self, rng: &mut RandomNumberGenerator, build_data: &mut BuilderMap) -> Result<()> {
        self.build(rng, build_data)
    }
}

impl RandomSpawnPoints {
    pub fn new() -> Box<Self> {
        Box::new(Self {})
    }

    fn build(&mut self, rng: &mut RandomNumberGenerator, build_data: &mut BuilderMap) -> Result<()> {
        let mut locations = build_data.map.spawn_locations();
        if locations.len() < 2 {
            return Err(GenError::NoSpawnLocations { found: locations.len() });
        }
        let start_idx = rng.range(0, locations.len() as i32) as usize;
        let (start_x, start_y) = locations.swap_remove(start_idx);
        let stairs_idx = rng.range(0, locations.len() as i32) as usize;
        let (stairs_x, stairs_y) = locations[stairs_idx];

        build_data.starting_position = Some(Position { x: start_x, y: start_y });
        build_data.stairs_position = Some(Position { x: stairs_x, y: stairs_y });
        Ok(())
    }
}

use bracket_random::prelude::RandomNumberGenerator;
use log::debug;

use crate::error::{GenError, Result};
use crate::map_builders::{BuilderMap, MetaMapBuilder};
use crate::spawner::spawn_room;

/// Populates every zone found in an open layout.
pub struct ZoneSpawner {}

impl MetaMapBuilder for ZoneSpawner {
    fn build_map(&mut self, rng: &mut RandomNumberGenerator, build_data: &mut BuilderMap) -> Result<()> {
        self.build(rng, build_data)
    }
}

impl ZoneSpawner {
    pub fn new() -> Box<Self> {
        Box::new(Self {})
    }

    fn build(&mut self, rng: &mut RandomNumberGenerator, build_data: &mut BuilderMap) -> Result<()> {
        let zones = build_data.zones.as_ref().ok_or(GenError::MissingZones("zone spawning"))?;
        let reserved = build_data.reserved_tiles();
        for zone in zones.iter() {
            spawn_room(rng, zone, build_data.map.depth, &reserved, &mut build_data.spawn_list);
        }
        debug!("spawned {} entities across {} zones", build_data.spawn_list.len(), zones.len());
        Ok(())
    }
}

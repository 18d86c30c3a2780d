use bracket_random::prelude::RandomNumberGenerator;
use log::debug;

use crate::error::Result;
use crate::map_builders::common::{apply_room_to_map, connect_rooms};
use crate::map_builders::{BuilderMap, InitialMapBuilder};
use crate::rect::Rect;
use crate::settings::GeneratorSettings;

/// Scatters non-overlapping rooms and links each one to the room accepted
/// before it.
pub struct TunnelBuilder {
    max_rooms: i32,
    min_size: i32,
    max_size: i32,
}

impl InitialMapBuilder for TunnelBuilder {
    fn build_map(&mut self, rng: &mut RandomNumberGenerator, build_data: &mut BuilderMap) -> Result<()> {
        self.build_rooms(rng, build_data);
        Ok(())
    }
}

impl TunnelBuilder {
    pub fn new(settings: &GeneratorSettings) -> Box<Self> {
        Box::new(Self {
            max_rooms: settings.tunnel.max_rooms,
            min_size: settings.room_min_size,
            max_size: settings.room_max_size,
        })
    }

    fn build_rooms(&mut self, rng: &mut RandomNumberGenerator, build_data: &mut BuilderMap) {
        let mut rooms: Vec<Rect> = Vec::new();

        for _ in 0..self.max_rooms {
            let w = rng.range(self.min_size, self.max_size + 1);
            let h = rng.range(self.min_size, self.max_size + 1);
            let x = rng.range(0, build_data.width - w);
            let y = rng.range(0, build_data.height - h);
            let new_room = Rect::new(x, y, w, h);

            if rooms.iter().any(|other| new_room.intersect(other)) {
                continue;
            }
            apply_room_to_map(&mut build_data.map, &new_room);
            if let Some(prev) = rooms.last() {
                connect_rooms(&mut build_data.map, rng, prev, &new_room);
            }
            rooms.push(new_room);
            build_data.take_snapshot();
        }

        debug!("tunnel layout placed {} of {} rooms", rooms.len(), self.max_rooms);
        build_data.rooms = Some(rooms);
    }
}

use bracket_random::prelude::RandomNumberGenerator;
use log::debug;

use crate::error::Result;
use crate::map::Map;
use crate::map_builders::{BuilderMap, InitialMapBuilder};
use crate::rect::Rect;
use crate::settings::GeneratorSettings;

/// Walled buildings with a single door, standing on open ground. Nothing
/// spawns inside or on a building.
pub struct BuildingsBuilder {
    max_rooms: i32,
    distance: i32,
    min_size: i32,
    max_size: i32,
}

impl InitialMapBuilder for BuildingsBuilder {
    fn build_map(&mut self, rng: &mut RandomNumberGenerator, build_data: &mut BuilderMap) -> Result<()> {
        self.build(rng, build_data);
        Ok(())
    }
}

impl BuildingsBuilder {
    pub fn new(settings: &GeneratorSettings) -> Box<Self> {
        Box::new(Self {
            max_rooms: settings.buildings.max_rooms,
            distance: settings.buildings.distance,
            min_size: settings.room_min_size,
            max_size: settings.room_max_size,
        })
    }

    fn build(&mut self, rng: &mut RandomNumberGenerator, build_data: &mut BuilderMap) {
        build_data.map = Map::new_open(build_data.map.depth, build_data.width, build_data.height);
        let mut rooms: Vec<Rect> = Vec::new();

        for _ in 0..self.max_rooms {
            let w = rng.range(self.min_size, self.max_size + 1);
            let h = rng.range(self.min_size, self.max_size + 1);
            let x = rng.range(0, build_data.width - w);
            let y = rng.range(0, build_data.height - h);
            let new_room = Rect::new(x, y, w, h);

            let area_around_room = new_room.expanded(self.distance);
            if rooms
                .iter()
                .any(|other| area_around_room.intersect(&other.expanded(self.distance)))
            {
                continue;
            }
            create_room_walls(&mut build_data.map, rng, &new_room);
            exclude_from_spawning(&mut build_data.map, &new_room);
            rooms.push(new_room);
            build_data.take_snapshot();
        }

        debug!("buildings layout raised {} of {} buildings", rooms.len(), self.max_rooms);
        build_data.rooms = Some(rooms);
    }
}

/// Cells of the outline where a door may go: never a corner or next to one.
pub fn door_candidates(room: &Rect) -> Vec<(i32, i32)> {
    let mut candidates = Vec::new();
    for y in room.y1 + 2..room.y2 - 1 {
        candidates.push((room.x1, y));
        candidates.push((room.x2, y));
    }
    for x in room.x1 + 2..room.x2 - 1 {
        candidates.push((x, room.y1));
        candidates.push((x, room.y2));
    }
    candidates
}

fn create_room_walls(map: &mut Map, rng: &mut RandomNumberGenerator, room: &Rect) {
    for x in room.x1..=room.x2 {
        map.block(x, room.y1);
        map.block(x, room.y2);
    }
    for y in room.y1..=room.y2 {
        map.block(room.x1, y);
        map.block(room.x2, y);
    }
    let candidates = door_candidates(room);
    if let Some(&(door_x, door_y)) = rng.random_slice_entry(&candidates) {
        map.carve(door_x, door_y);
    }
}

fn exclude_from_spawning(map: &mut Map, room: &Rect) {
    for x in room.x1..=room.x2 {
        for y in room.y1..=room.y2 {
            if map.in_bounds(x, y) {
                map.tile_mut(x, y).can_spawn = false;
            }
        }
    }
}

use bracket_random::prelude::RandomNumberGenerator;
use log::{debug, warn};
use specs::prelude::*;

use crate::components::{Name, Position, Stairs};
use crate::raws::{raws, spawn_named_entity, RawMaster, SpawnType};
use crate::rect::Rect;

/// Archetype ids keyed by the tile they were placed on.
pub type SpawnList = Vec<((i32, i32), String)>;

fn occupied(spawn_list: &SpawnList, reserved: &[(i32, i32)], pos: (i32, i32)) -> bool {
    reserved.contains(&pos) || spawn_list.iter().any(|(p, _)| *p == pos)
}

fn random_room_point(rng: &mut RandomNumberGenerator, room: &Rect) -> (i32, i32) {
    (
        rng.range(room.x1 + 1, room.x2),
        rng.range(room.y1 + 1, room.y2),
    )
}

/// Fills a room (or zone) with monsters and items drawn from the depth
/// scaled tables of the shared archetype store. `reserved` holds tiles
/// already taken by something outside the spawn list (player start, stairs).
pub fn spawn_room(
    rng: &mut RandomNumberGenerator,
    room: &Rect,
    depth: i32,
    reserved: &[(i32, i32)],
    spawn_list: &mut SpawnList,
) {
    spawn_room_from(&raws(), rng, room, depth, reserved, spawn_list);
}

/// Every slot draws exactly one coordinate; landing on a reserved tile or on
/// one that already holds a spawn forfeits the slot instead of retrying.
pub fn spawn_room_from(
    raws: &RawMaster,
    rng: &mut RandomNumberGenerator,
    room: &Rect,
    depth: i32,
    reserved: &[(i32, i32)],
    spawn_list: &mut SpawnList,
) {
    let num_monsters = rng.range(0, raws.max_monsters(depth) + 1);
    let num_items = rng.range(0, raws.max_items(depth) + 1);

    let monster_table = raws.get_monster_table_for_depth(depth);
    for _ in 0..num_monsters {
        let pos = random_room_point(rng, room);
        if occupied(spawn_list, reserved, pos) {
            continue;
        }
        if let Some(name) = monster_table.roll(rng) {
            spawn_list.push((pos, name.to_string()));
        }
    }

    let consumables = raws.get_consumable_table_for_depth(depth);
    let equipment = raws.get_equipment_table_for_depth(depth);
    for _ in 0..num_items {
        let pos = random_room_point(rng, room);
        if occupied(spawn_list, reserved, pos) {
            continue;
        }
        let pool = if rng.range(0, 101) < raws.consumable_chance() {
            &consumables
        } else {
            &equipment
        };
        if let Some(name) = pool.roll(rng) {
            spawn_list.push((pos, name.to_string()));
        }
    }
}

pub fn spawn_entity(ecs: &mut World, spawn: &(&(i32, i32), &String)) {
    let coords = spawn.0;
    let result = spawn_named_entity(
        &raws(),
        spawn.1,
        SpawnType::AtPosition { x: coords.0, y: coords.1 },
        ecs,
    );
    if result.is_none() {
        warn!("don't know how to spawn [{}]", spawn.1);
    }
}

/// The way down to `depth + 1`.
pub fn stairs(ecs: &mut World, x: i32, y: i32, depth: i32) -> Entity {
    debug!("placing stairs at ({}, {}) leading to depth {}", x, y, depth + 1);
    ecs.create_entity()
        .with(Position { x, y })
        .with(Name {
            name: "Stairs".to_string(),
        })
        .with(Stairs {
            destination: depth + 1,
        })
        .build()
}

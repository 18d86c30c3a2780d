use std::cmp::{max, min};

use bracket_random::prelude::RandomNumberGenerator;

use crate::map::Map;
use crate::rect::Rect;

/// Carves the interior of a room, leaving `x1`/`y1` as wall.
pub fn apply_room_to_map(map: &mut Map, room: &Rect) {
    for x in room.x1 + 1..room.x2 {
        for y in room.y1 + 1..room.y2 {
            map.carve(x, y);
        }
    }
}

pub fn apply_horizontal_tunnel(map: &mut Map, x1: i32, x2: i32, y: i32) {
    for x in min(x1, x2)..=max(x1, x2) {
        map.carve(x, y);
    }
}

pub fn apply_vertical_tunnel(map: &mut Map, y1: i32, y2: i32, x: i32) {
    for y in min(y1, y2)..=max(y1, y2) {
        map.carve(x, y);
    }
}

/// L-shaped corridor between two points; a coin flip decides which leg
/// comes first.
pub fn connect_points(map: &mut Map, rng: &mut RandomNumberGenerator, from: (i32, i32), to: (i32, i32)) {
    let (prev_x, prev_y) = from;
    let (new_x, new_y) = to;
    if rng.range(0, 2) == 1 {
        apply_horizontal_tunnel(map, prev_x, new_x, prev_y);
        apply_vertical_tunnel(map, prev_y, new_y, new_x);
    } else {
        apply_vertical_tunnel(map, prev_y, new_y, prev_x);
        apply_horizontal_tunnel(map, prev_x, new_x, new_y);
    }
}

pub fn connect_rooms(map: &mut Map, rng: &mut RandomNumberGenerator, from: &Rect, to: &Rect) {
    connect_points(map, rng, from.center(), to.center());
}

use dungeon_carver::raws::{self, load_raws};
use dungeon_carver::random_tables::{from_dungeon_level, RandomTable};
use dungeon_carver::spawner::spawn_room;
use dungeon_carver::{level_builder, DungeonKind, GeneratorSettings, RandomNumberGenerator, Rect, SpawnList};

const MAX_MONSTERS: [(i32, i32); 3] = [(2, 1), (3, 4), (5, 6)];

#[test]
fn depth_table_steps() {
    let expected = [(0, 0), (1, 2), (2, 2), (3, 2), (4, 3), (5, 3), (6, 5), (12, 5)];
    for (depth, value) in expected {
        assert_eq!(from_dungeon_level(&MAX_MONSTERS, depth), value, "depth {}", depth);
    }
}

#[test]
fn weighted_draws_converge() {
    let table = RandomTable::new().add("a", 10).add("b", 30).add("c", 60);
    let mut rng = RandomNumberGenerator::seeded(31337);
    let trials = 60_000;
    let mut counts = [0; 3];
    for _ in 0..trials {
        match table.roll(&mut rng) {
            Some("a") => counts[0] += 1,
            Some("b") => counts[1] += 1,
            Some("c") => counts[2] += 1,
            other => panic!("unexpected draw {:?}", other),
        }
    }
    for (count, weight) in counts.iter().zip([0.1, 0.3, 0.6]) {
        let observed = *count as f64 / trials as f64;
        assert!((observed - weight).abs() < 0.015, "{} vs {}", observed, weight);
    }
}

#[test]
fn shallow_levels_never_see_trolls() {
    load_raws().unwrap();
    let mut rng = RandomNumberGenerator::seeded(6);
    let mut spawn_list = SpawnList::new();
    for _ in 0..300 {
        spawn_room(&mut rng, &Rect::new(0, 0, 20, 20), 2, &[], &mut spawn_list);
    }
    assert!(spawn_list.iter().any(|(_, name)| name == "orc"));
    assert!(!spawn_list.iter().any(|(_, name)| name == "troll"));
    assert!(!spawn_list.iter().any(|(_, name)| name == "shield" || name == "fireball_scroll"));
}

#[test]
fn deep_levels_see_trolls() {
    load_raws().unwrap();
    let mut rng = RandomNumberGenerator::seeded(7);
    let mut spawn_list = SpawnList::new();
    for _ in 0..300 {
        spawn_room(&mut rng, &Rect::new(0, 0, 20, 20), 7, &[], &mut spawn_list);
    }
    assert!(spawn_list.iter().any(|(_, name)| name == "troll"));
    let store = raws::raws();
    assert!(spawn_list.iter().all(|(_, name)| store.is_known(name)));
}

#[test]
fn room_levels_start_in_first_room_and_exit_in_last() {
    let settings = GeneratorSettings::default();
    for kind in [DungeonKind::Tunnel, DungeonKind::BspTree, DungeonKind::Maze] {
        let mut chain = level_builder(kind, &settings).unwrap();
        let mut rng = RandomNumberGenerator::seeded(10);
        chain.build_map(&mut rng).unwrap();
        let data = &chain.build_data;
        let rooms = data.rooms.as_ref().unwrap();
        let start = data.starting_position.unwrap();
        let stairs = data.stairs_position.unwrap();
        assert_eq!((start.x, start.y), rooms[0].center());
        assert_eq!((stairs.x, stairs.y), rooms[rooms.len() - 1].center());
        assert!(!data.map.is_blocked(start.x, start.y));
        assert!(!data.map.is_blocked(stairs.x, stairs.y));
        for ((x, y), _) in data.spawn_list.iter() {
            assert!(!rooms[0].contains(*x, *y) || rooms.iter().skip(1).any(|r| r.contains(*x, *y)));
            assert!(!data.map.is_blocked(*x, *y), "{} spawn on rock at ({}, {})", kind, x, y);
        }
    }
}

#[test]
fn drunkard_levels_spawn_in_zones() {
    let settings = GeneratorSettings::default();
    let mut chain = level_builder(DungeonKind::DrunkardsWalk, &settings).unwrap();
    let mut rng = RandomNumberGenerator::seeded(12);
    chain.build_map(&mut rng).unwrap();
    let data = &chain.build_data;
    let zones = data.zones.as_ref().unwrap();
    assert!(!zones.is_empty());
    assert_ne!(data.starting_position, data.stairs_position);
    for ((x, y), _) in data.spawn_list.iter() {
        assert!(zones.iter().any(|z| z.contains(*x, *y)));
        assert!(!data.map.is_blocked(*x, *y));
    }
}

fn assert_start_and_stairs_left_free(kind: DungeonKind, seeds: std::ops::Range<u64>) -> usize {
    let settings = GeneratorSettings {
        depth: 6,
        ..GeneratorSettings::default()
    };
    let mut total_spawns = 0;
    for seed in seeds {
        let mut chain = level_builder(kind, &settings).unwrap();
        let mut rng = RandomNumberGenerator::seeded(seed);
        chain.build_map(&mut rng).unwrap();
        let data = &chain.build_data;
        let start = data.starting_position.unwrap();
        let stairs = data.stairs_position.unwrap();
        for ((x, y), name) in data.spawn_list.iter() {
            assert_ne!((*x, *y), (start.x, start.y), "{} seed {}: {} on the start tile", kind, seed, name);
            assert_ne!((*x, *y), (stairs.x, stairs.y), "{} seed {}: {} on the stairs", kind, seed, name);
        }
        total_spawns += data.spawn_list.len();
    }
    total_spawns
}

#[test]
fn deep_drunkard_levels_keep_start_and_stairs_clear() {
    let spawns = assert_start_and_stairs_left_free(DungeonKind::DrunkardsWalk, 0..400);
    assert!(spawns > 1000, "only {} spawns across the sweep", spawns);
}

#[test]
fn deep_room_levels_keep_the_stairs_clear() {
    for kind in [DungeonKind::Tunnel, DungeonKind::BspTree, DungeonKind::Maze] {
        let spawns = assert_start_and_stairs_left_free(kind, 0..60);
        assert!(spawns > 0, "{} spawned nothing", kind);
    }
}

#[test]
fn buildings_levels_only_place_start_and_stairs() {
    let settings = GeneratorSettings::default();
    let mut chain = level_builder(DungeonKind::Buildings, &settings).unwrap();
    let mut rng = RandomNumberGenerator::seeded(13);
    chain.build_map(&mut rng).unwrap();
    let data = &chain.build_data;
    assert!(data.spawn_list.is_empty());
    let start = data.starting_position.unwrap();
    let stairs = data.stairs_position.unwrap();
    assert_ne!(start, stairs);
    assert!(data.map.tile(start.x, start.y).is_spawnable());
    assert!(data.map.tile(stairs.x, stairs.y).is_spawnable());
}

use dungeon_carver::{level_builder, DungeonKind, GeneratorSettings, Map, RandomNumberGenerator};
use proptest::prelude::*;

fn carve(kind: DungeonKind, settings: &GeneratorSettings, seed: u64) -> Map {
    let mut chain = level_builder(kind, settings).unwrap();
    let mut rng = RandomNumberGenerator::seeded(seed);
    chain.build_map(&mut rng).unwrap();
    chain.build_data.map
}

#[test]
fn tunnel_levels_are_connected() {
    let settings = GeneratorSettings::default();
    for seed in 0..20 {
        let map = carve(DungeonKind::Tunnel, &settings, seed);
        assert_eq!(map.connected_areas(), 1, "seed {}\n{}", seed, map.to_ascii());
    }
}

#[test]
fn bsp_levels_are_connected() {
    let settings = GeneratorSettings::default();
    for seed in 0..20 {
        let map = carve(DungeonKind::BspTree, &settings, seed);
        assert_eq!(map.connected_areas(), 1, "seed {}\n{}", seed, map.to_ascii());
    }
}

#[test]
fn drunkard_levels_are_connected() {
    let settings = GeneratorSettings::default();
    for seed in 0..10 {
        let map = carve(DungeonKind::DrunkardsWalk, &settings, seed);
        assert_eq!(map.connected_areas(), 1);
    }
}

#[test]
fn labyrinth_settings_stay_connected() {
    let mut settings = GeneratorSettings::default();
    settings.maze = dungeon_carver::settings::MazeSettings::labyrinth();
    for seed in 0..10 {
        let map = carve(DungeonKind::Maze, &settings, seed);
        assert_eq!(map.connected_areas(), 1, "seed {}\n{}", seed, map.to_ascii());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn maze_levels_form_one_region(
        seed in any::<u64>(),
        width in 21i32..70,
        height in 21i32..60,
        winding in 0.0f32..1.0,
        extra in 0.0f32..0.3,
    ) {
        let mut settings = GeneratorSettings {
            width,
            height,
            room_min_size: 3,
            room_max_size: 7,
            ..GeneratorSettings::default()
        };
        settings.maze.winding_percent = winding;
        settings.maze.extra_connector_chance = extra;
        let map = carve(DungeonKind::Maze, &settings, seed);
        prop_assert_eq!(map.connected_areas(), 1);
    }
}

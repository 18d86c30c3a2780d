use dungeon_carver::map_builders::bsp_tree::BspTree;
use dungeon_carver::map_builders::drunkards::DrunkardsWalkBuilder;
use dungeon_carver::map_builders::BuilderChain;
use dungeon_carver::settings::DrunkardSettings;
use dungeon_carver::{level_builder, DungeonKind, GeneratorSettings, Map, RandomNumberGenerator, TileType};
use proptest::prelude::*;

fn assert_disjoint(rooms: &[dungeon_carver::Rect]) {
    for (i, a) in rooms.iter().enumerate() {
        for b in rooms.iter().skip(i + 1) {
            assert!(!a.intersect(b), "{:?} overlaps {:?}", a, b);
        }
    }
}

#[test]
fn tunnel_and_bsp_rooms_never_overlap() {
    let settings = GeneratorSettings::default();
    for kind in [DungeonKind::Tunnel, DungeonKind::BspTree] {
        for seed in 0..15 {
            let mut chain = level_builder(kind, &settings).unwrap();
            let mut rng = RandomNumberGenerator::seeded(seed);
            chain.build_map(&mut rng).unwrap();
            assert_disjoint(chain.build_data.rooms.as_ref().unwrap());
        }
    }
}

#[test]
fn bsp_leaves_match_rooms() {
    let mut rng = RandomNumberGenerator::seeded(99);
    let mut tree = BspTree::grow(80, 50, 24, 10, &mut rng);
    let mut map = Map::new(1, 80, 50);
    let rooms = tree.create_rooms(&mut map, &mut rng, 6, 10);
    assert_eq!(tree.leaves().count(), rooms.len());
    for leaf in tree.leaves() {
        let room = leaf.room.unwrap();
        let area = leaf.area();
        assert!(room.x1 >= area.x1 && room.x2 < area.x2);
        assert!(room.y1 >= area.y1 && room.y2 < area.y2);
    }
}

#[test]
fn drunkard_presets_hit_their_goals() {
    for settings in [DrunkardSettings::default(), DrunkardSettings::open_cave(), DrunkardSettings::winding_passages()] {
        let mut map = Map::new(1, 60, 50);
        let mut rng = RandomNumberGenerator::seeded(5);
        let outcome = DrunkardsWalkBuilder::new(settings).walk(&mut rng, &mut map);
        assert!(outcome.reached_goal() || outcome.iterations == outcome.cap);
    }
}

#[test]
fn water_overlay_is_opt_in() {
    let mut settings = GeneratorSettings::default();
    let has_water = |map: &Map| map.tiles.iter().flatten().any(|t| t.tile_type == TileType::Water);

    let mut chain = level_builder(DungeonKind::Tunnel, &settings).unwrap();
    chain.build_map(&mut RandomNumberGenerator::seeded(8)).unwrap();
    assert!(!has_water(&chain.build_data.map));

    settings.water_noise = true;
    let mut flooded = false;
    for seed in 0..10 {
        let mut chain = level_builder(DungeonKind::Tunnel, &settings).unwrap();
        chain.build_map(&mut RandomNumberGenerator::seeded(seed)).unwrap();
        for tile in chain.build_data.map.tiles.iter().flatten() {
            if tile.tile_type == TileType::Water {
                assert!(!tile.blocked && tile.can_spawn);
            }
        }
        flooded |= has_water(&chain.build_data.map);
    }
    assert!(flooded);
}

#[test]
fn settings_documents_drive_the_chain() {
    let settings = GeneratorSettings::from_json(
        r#"{ "width": 45, "height": 35, "depth": 4, "bsp": { "max_node_size": 18, "min_leaf_size": 8 } }"#,
    )
    .unwrap();
    let kind: DungeonKind = serde_json::from_str("\"bsp_tree\"").unwrap();
    let mut chain: BuilderChain = level_builder(kind, &settings).unwrap();
    chain.build_map(&mut RandomNumberGenerator::seeded(3)).unwrap();
    assert_eq!(chain.build_data.map.width, 45);
    assert_eq!(chain.build_data.map.depth, 4);
    assert!(chain.build_data.rooms.as_ref().unwrap().len() >= 2);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn buildings_keep_their_margin(seed in any::<u64>(), distance in 0i32..6) {
        let mut settings = GeneratorSettings::default();
        settings.buildings.distance = distance;
        let mut chain = level_builder(DungeonKind::Buildings, &settings).unwrap();
        chain.build_map(&mut RandomNumberGenerator::seeded(seed)).unwrap();
        let rooms = chain.build_data.rooms.as_ref().unwrap();
        for (i, a) in rooms.iter().enumerate() {
            for b in rooms.iter().skip(i + 1) {
                prop_assert!(!a.expanded(distance).intersect(&b.expanded(distance)));
            }
        }
    }
}

use faculty_core::mapgen::walkable_components;
use faculty_core::spatial::{is_walkable, tile_center};
use faculty_core::{MapGenerator, SimRng, TileKind, generate_map};
use proptest::prelude::*;

#[test]
fn default_map_is_one_component_with_walkable_spawns() {
    let map = generate_map(42, 64);
    assert_eq!(map.grid.width(), 64);
    assert!(map.grid.count(TileKind::Floor) >= 1);
    assert_eq!(walkable_components(&map.grid).len(), 1);

    let mut rng = SimRng::seed_from_u64(42);
    for _ in 0..1_000 {
        let tile = map.find_spawn_point(&mut rng);
        assert!(map.grid.is_walkable_tile(tile), "spawned on {tile:?}");
        assert!(is_walkable(&map.grid, tile_center(tile)));
    }
}

#[test]
fn every_staff_room_door_leads_somewhere() {
    for seed in 0..32 {
        let map = generate_map(seed, 64);
        for room in &map.staff_rooms {
            assert_eq!(map.grid.tile_at(room.door), TileKind::Floor, "seed {seed}");
            assert!(
                room.interior_tiles().all(|tile| map.grid.tile_at(tile) == TileKind::StaffRoom)
            );
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_maps_stay_connected(seed in any::<u64>(), size in 24usize..=128) {
        let map = MapGenerator::new(size).generate(&mut SimRng::seed_from_u64(seed));
        prop_assert!(map.grid.walkable_count() > 0);
        prop_assert_eq!(walkable_components(&map.grid).len(), 1);
    }

    #[test]
    fn spawn_points_are_walkable(seed in any::<u64>(), draws in 1usize..200) {
        let map = generate_map(seed, 48);
        let mut rng = SimRng::seed_from_u64(seed ^ 0x5eed);
        for _ in 0..draws {
            prop_assert!(map.grid.is_walkable_tile(map.find_spawn_point(&mut rng)));
        }
    }
}

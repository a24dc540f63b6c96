use super::{camera_offset, student_color, tile_color, visible_tiles};
use faculty_core::tuning::TILE_SIZE;
use faculty_core::{Position, StudentState, TileGrid, TileKind};
use macroquad::prelude::RED;

#[test]
fn camera_centres_the_player() {
    let offset = camera_offset(Position::new(500.0, 300.0), 800.0, 600.0);
    assert_eq!(offset, (-100.0, 0.0));
}

#[test]
fn visible_tiles_cover_the_screen_and_stay_in_bounds() {
    let grid = TileGrid::filled(64, 64, TileKind::Floor);
    let offset = camera_offset(Position::new(100.0, 100.0), 800.0, 600.0);
    let (xs, ys) = visible_tiles(offset, 800.0, 600.0, &grid);
    assert_eq!(xs.start, 0);
    assert_eq!(ys.start, 0);
    assert_eq!(xs.end, ((800.0 - offset.0) / TILE_SIZE).ceil() as i32);

    let far = camera_offset(Position::new(64.0 * TILE_SIZE, 64.0 * TILE_SIZE), 800.0, 600.0);
    let (xs, ys) = visible_tiles(far, 800.0, 600.0, &grid);
    assert_eq!(xs.end, 64);
    assert_eq!(ys.end, 64);
}

#[test]
fn visible_range_is_empty_when_the_grid_is_off_screen() {
    let grid = TileGrid::filled(4, 4, TileKind::Floor);
    let (xs, ys) = visible_tiles((-10_000.0, -10_000.0), 800.0, 600.0, &grid);
    assert!(xs.is_empty());
    assert!(ys.is_empty());
}

#[test]
fn colors_distinguish_tiles_and_states() {
    assert_ne!(tile_color(TileKind::Floor), tile_color(TileKind::Wall));
    assert_ne!(tile_color(TileKind::Floor), tile_color(TileKind::StaffRoom));
    assert_eq!(student_color(StudentState::Chasing), RED);
    assert_ne!(student_color(StudentState::Idle), student_color(StudentState::Searching));
}

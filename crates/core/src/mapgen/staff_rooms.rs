//! Walled staff rooms with one centred door and a short access corridor.

use crate::rng::SimRng;
use crate::types::{TileKind, TilePos};

use super::grid::TileGrid;
use super::layout::{RoomRect, random_rect};
use super::model::{StaffRoom, room_centroid};

const MIN_STAFF_ROOMS: usize = 2;
const MAX_STAFF_ROOMS: usize = 3;
const MIN_STAFF_SIDE: usize = 6;
const MAX_STAFF_SIDE: usize = 9;
const PLACEMENT_ATTEMPTS: u32 = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DoorSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl DoorSide {
    const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Door tile on this side of `rect`, centred along it.
    fn door(self, rect: RoomRect) -> TilePos {
        let mid_x = (rect.x + rect.width / 2) as i32;
        let mid_y = (rect.y + rect.height / 2) as i32;
        match self {
            Self::Top => TilePos { y: rect.y as i32, x: mid_x },
            Self::Bottom => TilePos { y: rect.bottom() as i32, x: mid_x },
            Self::Left => TilePos { y: mid_y, x: rect.x as i32 },
            Self::Right => TilePos { y: mid_y, x: rect.right() as i32 },
        }
    }

    /// Outward step `(dy, dx)` away from the room.
    fn outward(self) -> (i32, i32) {
        match self {
            Self::Top => (-1, 0),
            Self::Bottom => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

pub(super) fn place_staff_rooms(grid: &mut TileGrid, rng: &mut SimRng) -> Vec<StaffRoom> {
    let target = rng.range_usize(MIN_STAFF_ROOMS, MAX_STAFF_ROOMS);
    let mut placed: Vec<RoomRect> = Vec::with_capacity(target);
    let mut rooms = Vec::with_capacity(target);

    for _ in 0..target {
        let Some(rect) = pick_free_rect(grid, rng, &placed) else {
            continue;
        };
        let side = DoorSide::ALL[rng.index(DoorSide::ALL.len())];
        let door = carve_room(grid, rect, side);
        carve_access_corridor(grid, door, side, &placed, rect);
        placed.push(rect);
        rooms.push(StaffRoom {
            min_x: rect.x as i32,
            max_x: rect.right() as i32,
            min_y: rect.y as i32,
            max_y: rect.bottom() as i32,
            centroid: room_centroid(
                rect.x as i32,
                rect.y as i32,
                rect.width as i32,
                rect.height as i32,
            ),
            door,
        });
    }
    rooms
}

fn pick_free_rect(grid: &TileGrid, rng: &mut SimRng, placed: &[RoomRect]) -> Option<RoomRect> {
    for _ in 0..PLACEMENT_ATTEMPTS {
        let width = rng.range_usize(MIN_STAFF_SIDE, MAX_STAFF_SIDE);
        let height = rng.range_usize(MIN_STAFF_SIDE, MAX_STAFF_SIDE);
        let rect = random_rect(rng, grid, width, height)?;
        if placed.iter().all(|other| !other.expanded(1).intersects(&rect)) {
            return Some(rect);
        }
    }
    None
}

fn carve_room(grid: &mut TileGrid, rect: RoomRect, side: DoorSide) -> TilePos {
    for pos in rect.tiles() {
        let on_perimeter = pos.x == rect.x as i32
            || pos.x == rect.right() as i32
            || pos.y == rect.y as i32
            || pos.y == rect.bottom() as i32;
        let tile = if on_perimeter { TileKind::Wall } else { TileKind::StaffRoom };
        grid.set_tile(pos, tile);
    }
    let door = side.door(rect);
    grid.set_tile(door, TileKind::Floor);
    door
}

/// Opens walls outward from the door until the corridor meets walkable ground
/// outside any staff room, leaves the grid, or runs into another staff room.
fn carve_access_corridor(
    grid: &mut TileGrid,
    door: TilePos,
    side: DoorSide,
    placed: &[RoomRect],
    own: RoomRect,
) {
    let (dy, dx) = side.outward();
    let mut pos = TilePos { y: door.y + dy, x: door.x + dx };
    while grid.in_bounds(pos) {
        if own.contains(pos) || placed.iter().any(|rect| rect.contains(pos)) {
            return;
        }
        if grid.tile_at(pos) != TileKind::Wall {
            return;
        }
        grid.set_tile(pos, TileKind::Floor);
        pos = TilePos { y: pos.y + dy, x: pos.x + dx };
    }
}

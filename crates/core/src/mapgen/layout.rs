//! Open-plan room scattering, corridor carving and wall smoothing.

use crate::rng::SimRng;
use crate::types::{TileKind, TilePos};

use super::grid::{TileGrid, floor_neighbors};

const MIN_ROOMS: usize = 15;
const MAX_ROOMS: usize = 24;
const MIN_ROOM_SIDE: usize = 4;
const MAX_ROOM_SIDE: usize = 11;
const CORRIDOR_ATTEMPTS: u32 = 500;
const MIN_CORRIDOR_LENGTH: usize = 3;
const MAX_CORRIDOR_LENGTH: usize = 12;
const SMOOTHING_FLOOR_THRESHOLD: usize = 5;
/// Rooms keep this many tiles between themselves and the grid edge.
pub(super) const EDGE_MARGIN: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct RoomRect {
    pub(super) x: usize,
    pub(super) y: usize,
    pub(super) width: usize,
    pub(super) height: usize,
}

impl RoomRect {
    pub(super) fn right(self) -> usize {
        self.x + self.width - 1
    }

    pub(super) fn bottom(self) -> usize {
        self.y + self.height - 1
    }

    pub(super) fn expanded(self, margin: usize) -> Self {
        let expanded_x = self.x.saturating_sub(margin);
        let expanded_y = self.y.saturating_sub(margin);
        let expanded_right = self.right().saturating_add(margin);
        let expanded_bottom = self.bottom().saturating_add(margin);
        Self {
            x: expanded_x,
            y: expanded_y,
            width: expanded_right - expanded_x + 1,
            height: expanded_bottom - expanded_y + 1,
        }
    }

    pub(super) fn intersects(self, other: &Self) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    pub(super) fn contains(self, pos: TilePos) -> bool {
        if pos.x < 0 || pos.y < 0 {
            return false;
        }
        let px = pos.x as usize;
        let py = pos.y as usize;
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    pub(super) fn tiles(self) -> impl Iterator<Item = TilePos> {
        (self.y..=self.bottom()).flat_map(move |y| {
            (self.x..=self.right()).map(move |x| TilePos { y: y as i32, x: x as i32 })
        })
    }
}

/// Random origin for a `width`x`height` rectangle inside the edge margin,
/// or `None` when the grid is too small to hold it.
pub(super) fn random_rect(
    rng: &mut SimRng,
    grid: &TileGrid,
    width: usize,
    height: usize,
) -> Option<RoomRect> {
    let slack_x = grid.width().checked_sub(width + 2 * EDGE_MARGIN).filter(|&slack| slack > 0)?;
    let slack_y = grid.height().checked_sub(height + 2 * EDGE_MARGIN).filter(|&slack| slack > 0)?;
    let x = EDGE_MARGIN + rng.range_usize(0, slack_x - 1);
    let y = EDGE_MARGIN + rng.range_usize(0, slack_y - 1);
    Some(RoomRect { x, y, width, height })
}

/// Scatters overlapping floor rectangles. Overlaps simply merge.
pub(super) fn carve_rooms(grid: &mut TileGrid, rng: &mut SimRng) -> usize {
    let room_count = rng.range_usize(MIN_ROOMS, MAX_ROOMS);
    let mut carved = 0;
    for _ in 0..room_count {
        let width = rng.range_usize(MIN_ROOM_SIDE, MAX_ROOM_SIDE);
        let height = rng.range_usize(MIN_ROOM_SIDE, MAX_ROOM_SIDE);
        let Some(room) = random_rect(rng, grid, width, height) else {
            continue;
        };
        for pos in room.tiles() {
            grid.set_tile(pos, TileKind::Floor);
        }
        carved += 1;
    }
    carved
}

/// Grows three-wide straight corridors out of randomly sampled floor tiles.
pub(super) fn carve_corridors(grid: &mut TileGrid, rng: &mut SimRng) {
    if grid.width() == 0 || grid.height() == 0 {
        return;
    }
    for _ in 0..CORRIDOR_ATTEMPTS {
        let y = rng.index(grid.height()) as i32;
        let x = rng.index(grid.width()) as i32;
        let origin = TilePos { y, x };
        if grid.tile_at(origin) != TileKind::Floor {
            continue;
        }
        let horizontal = rng.chance(0.5);
        let length = rng.range_usize(MIN_CORRIDOR_LENGTH, MAX_CORRIDOR_LENGTH) as i32;
        for step in 0..length {
            let (center, side_a, side_b) = if horizontal {
                let x = origin.x + step;
                (
                    TilePos { y: origin.y, x },
                    TilePos { y: origin.y - 1, x },
                    TilePos { y: origin.y + 1, x },
                )
            } else {
                let y = origin.y + step;
                (
                    TilePos { y, x: origin.x },
                    TilePos { y, x: origin.x - 1 },
                    TilePos { y, x: origin.x + 1 },
                )
            };
            for pos in [center, side_a, side_b] {
                grid.set_tile(pos, TileKind::Floor);
            }
        }
    }
}

/// One cellular-automaton pass: interior walls with enough floor around them open up.
pub(super) fn smooth_walls(grid: &mut TileGrid) {
    if grid.width() < 3 || grid.height() < 3 {
        return;
    }
    let source = grid.clone();
    for y in 1..(source.height() - 1) {
        for x in 1..(source.width() - 1) {
            let pos = TilePos { y: y as i32, x: x as i32 };
            if source.tile_at(pos) == TileKind::Wall
                && floor_neighbors(&source, pos) >= SMOOTHING_FLOOR_THRESHOLD
            {
                grid.set_tile(pos, TileKind::Floor);
            }
        }
    }
}

//! Public data models for generated maps and their staff rooms.

use serde::{Deserialize, Serialize};

use crate::rng::SimRng;
use crate::tuning::TILE_SIZE;
use crate::types::{Position, TileKind, TilePos};

use super::grid::TileGrid;

const SPAWN_SAMPLE_ATTEMPTS: u32 = 100;

/// Walled room with a single door. Bounds are inclusive and include the wall ring.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaffRoom {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
    /// World-space centre of the rectangle.
    pub centroid: Position,
    pub door: TilePos,
}

impl StaffRoom {
    pub fn contains(&self, pos: TilePos) -> bool {
        pos.x >= self.min_x && pos.x <= self.max_x && pos.y >= self.min_y && pos.y <= self.max_y
    }

    pub fn interior_contains(&self, pos: TilePos) -> bool {
        pos.x > self.min_x && pos.x < self.max_x && pos.y > self.min_y && pos.y < self.max_y
    }

    pub fn interior_tiles(&self) -> impl Iterator<Item = TilePos> + '_ {
        ((self.min_y + 1)..self.max_y)
            .flat_map(move |y| ((self.min_x + 1)..self.max_x).map(move |x| TilePos { y, x }))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedMap {
    pub grid: TileGrid,
    pub staff_rooms: Vec<StaffRoom>,
}

impl GeneratedMap {
    /// Random floor tile: sampled first, then scanned, then the grid centre as a last resort.
    pub fn find_spawn_point(&self, rng: &mut SimRng) -> TilePos {
        find_spawn_tile(&self.grid, rng)
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.grid.tiles().len() + 64);
        bytes.extend((self.grid.width() as u32).to_le_bytes());
        bytes.extend((self.grid.height() as u32).to_le_bytes());
        for tile in self.grid.tiles() {
            bytes.push(match tile {
                TileKind::Floor => 0,
                TileKind::Wall => 1,
                TileKind::StaffRoom => 2,
            });
        }
        bytes.extend((self.staff_rooms.len() as u32).to_le_bytes());
        for room in &self.staff_rooms {
            for value in [room.min_x, room.max_x, room.min_y, room.max_y, room.door.y, room.door.x]
            {
                bytes.extend(value.to_le_bytes());
            }
        }
        bytes
    }

    pub fn staff_room_at(&self, pos: TilePos) -> Option<&StaffRoom> {
        self.staff_rooms.iter().find(|room| room.contains(pos))
    }
}

pub(crate) fn find_spawn_tile(grid: &TileGrid, rng: &mut SimRng) -> TilePos {
    if grid.width() > 0 && grid.height() > 0 {
        for _ in 0..SPAWN_SAMPLE_ATTEMPTS {
            let y = rng.index(grid.height()) as i32;
            let x = rng.index(grid.width()) as i32;
            let pos = TilePos { y, x };
            if grid.tile_at(pos) == TileKind::Floor {
                return pos;
            }
        }
    }

    if let Some(pos) = grid.positions().find(|&pos| grid.tile_at(pos) == TileKind::Floor) {
        return pos;
    }

    TilePos { y: (grid.height() / 2) as i32, x: (grid.width() / 2) as i32 }
}

pub(super) fn room_centroid(min_x: i32, min_y: i32, width: i32, height: i32) -> Position {
    Position {
        x: (min_x as f32 + width as f32 / 2.0) * TILE_SIZE,
        y: (min_y as f32 + height as f32 / 2.0) * TILE_SIZE,
    }
}

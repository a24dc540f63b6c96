//! World/tile conversion, distance and line-of-sight queries over a tile grid.

use crate::mapgen::TileGrid;
use crate::tuning::{STUDENT_VIEW_DISTANCE_TILES, TILE_SIZE, tiles};
use crate::types::{Position, TilePos};

pub fn world_to_tile(pos: Position) -> TilePos {
    TilePos { y: (pos.y / TILE_SIZE).floor() as i32, x: (pos.x / TILE_SIZE).floor() as i32 }
}

pub fn tile_center(tile: TilePos) -> Position {
    Position {
        x: tile.x as f32 * TILE_SIZE + TILE_SIZE / 2.0,
        y: tile.y as f32 * TILE_SIZE + TILE_SIZE / 2.0,
    }
}

/// Out-of-grid points are never walkable.
pub fn is_walkable(grid: &TileGrid, pos: Position) -> bool {
    grid.is_walkable_tile(world_to_tile(pos))
}

pub fn distance(a: Position, b: Position) -> f32 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Half-tile ray march from `from` to `to`, both endpoints included.
///
/// Not symmetric: swapping the endpoints samples different points near thin walls.
pub fn has_line_of_sight(grid: &TileGrid, from: Position, to: Position) -> bool {
    let dist = distance(from, to);
    if dist > tiles(STUDENT_VIEW_DISTANCE_TILES) {
        return false;
    }
    let steps = (dist / (TILE_SIZE / 2.0)).ceil().max(1.0) as u32;
    let dx = (to.x - from.x) / steps as f32;
    let dy = (to.y - from.y) / steps as f32;
    (0..=steps).all(|step| {
        let sample = Position { x: from.x + dx * step as f32, y: from.y + dy * step as f32 };
        is_walkable(grid, sample)
    })
}

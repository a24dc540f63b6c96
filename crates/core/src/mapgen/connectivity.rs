//! Component labelling and repair so every walkable tile shares one region.

use std::collections::VecDeque;

use crate::rng::SimRng;
use crate::types::{TileKind, TilePos};

use super::grid::{CARDINALS, TileGrid};
use super::model::StaffRoom;

const REPAIR_HALF_WIDTH: i32 = 1;

/// 4-connected components of walkable tiles, labelled in row-major scan order.
pub fn walkable_components(grid: &TileGrid) -> Vec<Vec<TilePos>> {
    let mut visited = vec![false; grid.tiles().len()];
    let mut components = Vec::new();
    let mut queue = VecDeque::new();

    for start in grid.positions() {
        let start_idx = grid.index(start);
        if visited[start_idx] || !grid.is_walkable_tile(start) {
            continue;
        }
        visited[start_idx] = true;
        queue.push_back(start);
        let mut component = Vec::new();

        while let Some(pos) = queue.pop_front() {
            component.push(pos);
            for (dy, dx) in CARDINALS {
                let next = TilePos { y: pos.y + dy, x: pos.x + dx };
                if !grid.is_walkable_tile(next) {
                    continue;
                }
                let next_idx = grid.index(next);
                if !visited[next_idx] {
                    visited[next_idx] = true;
                    queue.push_back(next);
                }
            }
        }
        components.push(component);
    }
    components
}

/// Joins every stray component to the largest one with a three-wide L-shaped path.
/// Paths first route around staff-room walls; any region still cut off after that
/// is joined again with paths that may cross them. Returns how many components
/// were joined.
pub(super) fn repair_connectivity(
    grid: &mut TileGrid,
    staff_rooms: &[StaffRoom],
    rng: &mut SimRng,
) -> usize {
    let joined = join_components(grid, staff_rooms, rng);
    if joined > 0 && walkable_components(grid).len() > 1 {
        join_components(grid, &[], rng);
    }
    joined
}

fn join_components(grid: &mut TileGrid, protected: &[StaffRoom], rng: &mut SimRng) -> usize {
    let components = walkable_components(grid);
    if components.len() <= 1 {
        return 0;
    }

    let mut main_index = 0;
    for (index, component) in components.iter().enumerate() {
        if component.len() > components[main_index].len() {
            main_index = index;
        }
    }

    let mut joined = 0;
    for (index, component) in components.iter().enumerate() {
        if index == main_index {
            continue;
        }
        let from = pick_endpoint(component, protected, rng);
        let to = pick_endpoint(&components[main_index], protected, rng);
        carve_l_path(grid, protected, from, to);
        joined += 1;
    }
    joined
}

/// Random tile of `component`, avoiding staff rooms when the component reaches outside them.
fn pick_endpoint(component: &[TilePos], rooms: &[StaffRoom], rng: &mut SimRng) -> TilePos {
    let outside: Vec<TilePos> = component
        .iter()
        .copied()
        .filter(|pos| !rooms.iter().any(|room| room.contains(*pos)))
        .collect();
    let pool: &[TilePos] = if outside.is_empty() { component } else { &outside };
    pool[rng.index(pool.len())]
}

/// Horizontal leg along `from.y`, then a vertical leg along `to.x`.
/// Only walls are opened so staff-room interiors keep their tag.
fn carve_l_path(grid: &mut TileGrid, protected: &[StaffRoom], from: TilePos, to: TilePos) {
    let (x_lo, x_hi) = (from.x.min(to.x), from.x.max(to.x));
    for x in x_lo..=x_hi {
        for offset in -REPAIR_HALF_WIDTH..=REPAIR_HALF_WIDTH {
            open_wall(grid, protected, TilePos { y: from.y + offset, x });
        }
    }
    let (y_lo, y_hi) = (from.y.min(to.y), from.y.max(to.y));
    for y in y_lo..=y_hi {
        for offset in -REPAIR_HALF_WIDTH..=REPAIR_HALF_WIDTH {
            open_wall(grid, protected, TilePos { y, x: to.x + offset });
        }
    }
}

fn open_wall(grid: &mut TileGrid, protected: &[StaffRoom], pos: TilePos) {
    let on_room_wall =
        protected.iter().any(|room| room.contains(pos) && !room.interior_contains(pos));
    if !on_room_wall && grid.tile_at(pos) == TileKind::Wall && grid.in_bounds(pos) {
        grid.set_tile(pos, TileKind::Floor);
    }
}

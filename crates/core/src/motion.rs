//! Steering toward a target with peer separation and wall sliding.

use crate::mapgen::TileGrid;
use crate::spatial::{distance, is_walkable};
use crate::tuning::{
    FLEE_SPEED_MULTIPLIER, STUDENT_SEPARATION_DISTANCE_TILES, STUDENT_SEPARATION_STRENGTH, tiles,
};
use crate::types::{Direction, Position, StudentId};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveResult {
    pub position: Position,
    pub direction: Direction,
    pub is_moving: bool,
}

impl MoveResult {
    fn stay(position: Position, direction: Direction) -> Self {
        Self { position, direction, is_moving: false }
    }
}

/// Peers a mover keeps its distance from. The mover's own entry is skipped by id.
#[derive(Clone, Copy, Debug)]
pub struct Separation<'a> {
    pub self_id: StudentId,
    pub peers: &'a [(StudentId, Position)],
}

pub fn move_towards(
    grid: &TileGrid,
    from: Position,
    to: Position,
    speed: f32,
    separation: Option<Separation<'_>>,
) -> MoveResult {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let direction = Direction::from_delta(dx, dy);
    let dist = distance(from, to);

    if dist <= speed {
        let arrived = if is_walkable(grid, to) { to } else { from };
        return MoveResult::stay(arrived, direction);
    }

    let mut candidate =
        Position { x: from.x + dx / dist * speed, y: from.y + dy / dist * speed };
    if let Some(separation) = separation {
        candidate = apply_separation(candidate, speed, separation);
    }

    match slide(grid, from, candidate) {
        Some(position) if position != from => MoveResult { position, direction, is_moving: true },
        _ => MoveResult::stay(from, direction),
    }
}

fn apply_separation(candidate: Position, speed: f32, separation: Separation<'_>) -> Position {
    let radius = tiles(STUDENT_SEPARATION_DISTANCE_TILES);
    let push = STUDENT_SEPARATION_STRENGTH * speed;
    let mut nudged = candidate;
    for &(peer_id, peer_pos) in separation.peers {
        if peer_id == separation.self_id {
            continue;
        }
        let gap = distance(candidate, peer_pos);
        // Coincident peers give no direction to push along.
        if gap >= radius || gap == 0.0 {
            continue;
        }
        nudged.x += (candidate.x - peer_pos.x) / gap * push;
        nudged.y += (candidate.y - peer_pos.y) / gap * push;
    }
    nudged
}

/// Full step, then the horizontal component alone, then the vertical one.
fn slide(grid: &TileGrid, from: Position, candidate: Position) -> Option<Position> {
    [candidate, Position { x: candidate.x, y: from.y }, Position { x: from.x, y: candidate.y }]
        .into_iter()
        .find(|&pos| is_walkable(grid, pos))
}

/// Fixed displacement with the same wall slide as `move_towards`. Used for keyboard movement.
pub fn step_by(grid: &TileGrid, from: Position, dx: f32, dy: f32) -> MoveResult {
    let direction = Direction::from_delta(dx, dy);
    let candidate = Position { x: from.x + dx, y: from.y + dy };
    match slide(grid, from, candidate) {
        Some(position) if position != from => MoveResult { position, direction, is_moving: true },
        _ => MoveResult::stay(from, direction),
    }
}

/// Straight step directly away from `threat`. A blocked step does not slide.
pub fn flee_step(grid: &TileGrid, from: Position, threat: Position, speed: f32) -> MoveResult {
    let dx = from.x - threat.x;
    let dy = from.y - threat.y;
    let dist = distance(from, threat);
    let direction = Direction::from_delta(dx, dy);
    if dist == 0.0 {
        return MoveResult::stay(from, direction);
    }
    let step = speed * FLEE_SPEED_MULTIPLIER;
    let candidate = Position { x: from.x + dx / dist * step, y: from.y + dy / dist * step };
    if is_walkable(grid, candidate) {
        MoveResult { position: candidate, direction, is_moving: true }
    } else {
        MoveResult::stay(from, direction)
    }
}

//! Student perception, communication, grouping and search.
//!
//! A tick runs in three phases. Every student first decides its own transition
//! from an immutable copy of last tick's roster. The group-level writes those
//! decisions produce (pairing on lost contact, sighting broadcasts, chase
//! propagation) are then applied to the new roster in a fixed order. Finally
//! every student moves toward whatever target it ended up with.

use slotmap::SlotMap;
use tracing::trace;

use crate::mapgen::TileGrid;
use crate::motion::{MoveResult, Separation, flee_step, move_towards};
use crate::rng::SimRng;
use crate::spatial::{distance, has_line_of_sight, is_walkable};
use crate::state::{GroupIds, Student};
use crate::tuning::*;
use crate::types::{GroupId, LogEvent, Position, StudentId, StudentState};

/// World inputs a pursuit step reads but never writes.
#[derive(Clone, Copy, Debug)]
pub struct PursuitContext<'a> {
    pub grid: &'a TileGrid,
    pub player: Position,
    pub tick: u64,
    /// Every student perceives the player regardless of walls or range.
    pub reveal: bool,
    pub repellent_active: bool,
    pub speed: f32,
}

pub fn group_members(
    students: &SlotMap<StudentId, Student>,
    group: GroupId,
) -> impl Iterator<Item = StudentId> + '_ {
    students.iter().filter(move |(_, s)| s.group_id == Some(group)).map(|(id, _)| id)
}

/// Student movement speed after `tick` ticks, before any reveal doubling.
pub fn student_speed(tick: u64) -> f32 {
    let minutes = (tick / TICKS_PER_MINUTE) as f32;
    STUDENT_SPEED * (1.0 + STUDENT_SPEED_GROWTH_PER_MINUTE * minutes)
}

#[derive(Clone, Debug, PartialEq)]
enum GroupWrite {
    /// `seeker` lost the player and teams up with its nearest peer.
    Pair { seeker: StudentId, peer: StudentId },
    /// `source` alerts every listed student that was not already chasing.
    Broadcast { source: StudentId, recipients: Vec<StudentId> },
    /// `source` sees the player; its whole group chases.
    Chase { source: StudentId },
}

impl GroupWrite {
    fn order(&self) -> u8 {
        match self {
            Self::Pair { .. } => 0,
            Self::Broadcast { .. } => 1,
            Self::Chase { .. } => 2,
        }
    }
}

pub fn step_students(
    students: &mut SlotMap<StudentId, Student>,
    groups: &mut GroupIds,
    ctx: &PursuitContext<'_>,
    rng: &mut SimRng,
    log: &mut Vec<LogEvent>,
) {
    let snapshot: Vec<(StudentId, Student)> =
        students.iter().map(|(id, student)| (id, student.clone())).collect();

    let mut writes = Vec::new();
    for (id, previous) in &snapshot {
        let next = decide(*id, previous, &snapshot, ctx, rng, &mut writes);
        if let Some(student) = students.get_mut(*id) {
            *student = next;
        }
    }

    writes.sort_by_key(GroupWrite::order);
    for write in writes {
        apply_write(students, groups, ctx, write, log);
    }

    let positions: Vec<(StudentId, Position)> =
        snapshot.iter().map(|(id, student)| (*id, student.pos)).collect();
    for (id, student) in students.iter_mut() {
        move_student(id, student, &positions, ctx);
    }

    for (id, previous) in &snapshot {
        if let Some(student) = students.get(*id)
            && student.state != previous.state
        {
            log.push(LogEvent::StudentStateChanged {
                student: *id,
                from: previous.state,
                to: student.state,
            });
        }
    }
}

fn decide(
    id: StudentId,
    previous: &Student,
    snapshot: &[(StudentId, Student)],
    ctx: &PursuitContext<'_>,
    rng: &mut SimRng,
    writes: &mut Vec<GroupWrite>,
) -> Student {
    let mut next = previous.clone();
    next.communication_cooldown = next.communication_cooldown.saturating_sub(1);

    // Once scattered, a student keeps fleeing until the repellent wears off.
    let repelled = ctx.repellent_active
        && (next.state == StudentState::Fleeing
            || distance(next.pos, ctx.player) <= tiles(REPELLENT_RADIUS_TILES));
    if repelled {
        next.state = StudentState::Fleeing;
        next.target = None;
        next.search_target = None;
        return next;
    }
    if next.state == StudentState::Fleeing {
        next.state = StudentState::Idle;
    }

    let perceives = ctx.reveal || has_line_of_sight(ctx.grid, next.pos, ctx.player);
    if perceives {
        next.state = StudentState::Chasing;
        next.last_seen_player = Some(ctx.player);
        next.target = Some(ctx.player);
        next.search_target = None;
        if next.group_id.is_some() {
            writes.push(GroupWrite::Chase { source: id });
        }
    } else {
        match next.state {
            StudentState::Chasing => lose_or_follow(id, &mut next, snapshot, ctx, rng, writes),
            StudentState::Informed => follow_group(id, &mut next, snapshot, ctx, rng),
            StudentState::Searching => keep_searching(&mut next, ctx, rng),
            StudentState::Idle => idle_wander(&mut next, ctx, rng),
            StudentState::Fleeing => {}
        }
    }

    if next.state == StudentState::Chasing && next.communication_cooldown == 0 {
        let range = tiles(STUDENT_COMMUNICATION_RANGE_TILES);
        let recipients: Vec<StudentId> = snapshot
            .iter()
            .filter(|(other_id, other)| {
                *other_id != id
                    && !matches!(other.state, StudentState::Chasing | StudentState::Fleeing)
                    && distance(next.pos, other.pos) <= range
            })
            .map(|(other_id, _)| *other_id)
            .collect();
        if !recipients.is_empty() {
            next.communication_cooldown = BROADCAST_COOLDOWN_TICKS;
            writes.push(GroupWrite::Broadcast { source: id, recipients });
        }
    }

    next
}

/// Chasing without sight: keep heading for the last sighting until close to it
/// or stalled against a wall, then pair up with the nearest peer or fall back to searching.
fn lose_or_follow(
    id: StudentId,
    next: &mut Student,
    snapshot: &[(StudentId, Student)],
    ctx: &PursuitContext<'_>,
    rng: &mut SimRng,
    writes: &mut Vec<GroupWrite>,
) {
    let lost = !next.is_moving
        || next
            .last_seen_player
            .is_none_or(|last| distance(next.pos, last) <= tiles(LOST_CONTACT_DISTANCE_TILES));
    if !lost {
        next.target = next.last_seen_player;
        return;
    }

    let mut nearest: Option<(StudentId, Position, f32)> = None;
    for (other_id, other) in snapshot {
        if *other_id == id {
            continue;
        }
        let gap = distance(next.pos, other.pos);
        if nearest.is_none_or(|(_, _, best)| gap < best) {
            nearest = Some((*other_id, other.pos, gap));
        }
    }

    match nearest {
        Some((peer, peer_pos, gap)) if gap <= tiles(STUDENT_COMMUNICATION_RANGE_TILES) => {
            next.state = StudentState::Informed;
            next.target = Some(peer_pos);
            next.search_target = None;
            writes.push(GroupWrite::Pair { seeker: id, peer });
        }
        _ => {
            next.state = StudentState::Searching;
            let point = random_point_near(ctx.grid, next.pos, SEARCH_RADIUS_TILES, rng);
            next.search_target = Some(point);
            next.target = Some(point);
        }
    }
}

fn follow_group(
    id: StudentId,
    next: &mut Student,
    snapshot: &[(StudentId, Student)],
    ctx: &PursuitContext<'_>,
    rng: &mut SimRng,
) {
    let Some(group) = next.group_id else {
        next.state = StudentState::Idle;
        return;
    };
    let chasing_mate = snapshot.iter().find(|(other_id, other)| {
        *other_id != id && other.group_id == Some(group) && other.state == StudentState::Chasing
    });
    if let Some((_, mate)) = chasing_mate {
        next.state = StudentState::Chasing;
        next.last_seen_player = mate.last_seen_player;
        next.target = mate.target.or(mate.last_seen_player);
        return;
    }

    if ctx.tick % INFORMED_WANDER_PERIOD_TICKS != 0 {
        return;
    }
    let mates: Vec<Position> = snapshot
        .iter()
        .filter(|(other_id, other)| *other_id != id && other.group_id == Some(group))
        .map(|(_, other)| other.pos)
        .collect();
    if mates.is_empty() || rng.chance(0.5) {
        next.target = Some(random_point_near(
            ctx.grid,
            next.pos,
            INFORMED_WANDER_RADIUS_TILES,
            rng,
        ));
    } else {
        next.target = Some(mates[rng.index(mates.len())]);
    }
}

fn keep_searching(next: &mut Student, ctx: &PursuitContext<'_>, rng: &mut SimRng) {
    let arrived = next
        .search_target
        .is_none_or(|point| distance(next.pos, point) <= tiles(SEARCH_ARRIVAL_TILES));
    if arrived {
        next.search_target = Some(random_point_near(ctx.grid, next.pos, SEARCH_RADIUS_TILES, rng));
    }
    next.target = next.search_target;
}

fn idle_wander(next: &mut Student, ctx: &PursuitContext<'_>, rng: &mut SimRng) {
    if ctx.tick % IDLE_WANDER_PERIOD_TICKS == 0 {
        next.target = Some(random_point_near(ctx.grid, next.pos, IDLE_WANDER_RADIUS_TILES, rng));
    }
}

/// Walkable point `radius` tiles away at a random angle, or `origin` when every
/// sampled angle lands in a wall.
fn random_point_near(
    grid: &TileGrid,
    origin: Position,
    radius: f32,
    rng: &mut SimRng,
) -> Position {
    let reach = tiles(radius);
    for _ in 0..SEARCH_POINT_ATTEMPTS {
        let angle = rng.angle();
        let point =
            Position { x: origin.x + angle.cos() * reach, y: origin.y + angle.sin() * reach };
        if is_walkable(grid, point) {
            return point;
        }
    }
    origin
}

fn apply_write(
    students: &mut SlotMap<StudentId, Student>,
    groups: &mut GroupIds,
    ctx: &PursuitContext<'_>,
    write: GroupWrite,
    log: &mut Vec<LogEvent>,
) {
    match write {
        GroupWrite::Pair { seeker, peer } => {
            if !students.contains_key(seeker) || !students.contains_key(peer) {
                return;
            }
            let group = groups.fresh();
            trace!(group = group.0, "students paired into a new group");
            log.push(LogEvent::GroupFormed { group, members: vec![seeker, peer] });
            for member in [seeker, peer] {
                let Some(student) = students.get_mut(member) else {
                    continue;
                };
                student.group_id = Some(group);
                if !matches!(student.state, StudentState::Chasing | StudentState::Fleeing) {
                    student.state = StudentState::Informed;
                    student.search_target = None;
                }
            }
        }
        GroupWrite::Broadcast { source, recipients } => {
            let Some(sender) = students.get(source) else {
                return;
            };
            let sighting = sender.last_seen_player;
            let (group, opened) = match sender.group_id {
                Some(group) => (group, false),
                None => (groups.fresh(), true),
            };
            if let Some(sender) = students.get_mut(source) {
                sender.group_id = Some(group);
            }

            let mut reached = vec![source];
            for recipient in recipients {
                let Some(student) = students.get_mut(recipient) else {
                    continue;
                };
                if matches!(student.state, StudentState::Chasing | StudentState::Fleeing) {
                    continue;
                }
                student.group_id = Some(group);
                student.state = StudentState::Informed;
                student.last_seen_player = sighting;
                student.target = sighting.or(student.target);
                student.search_target = None;
                reached.push(recipient);
            }
            let recipients = (reached.len() - 1) as u32;
            if opened {
                trace!(group = group.0, "sighting broadcast opened a new group");
                log.push(LogEvent::GroupFormed { group, members: reached });
            }
            log.push(LogEvent::SightingBroadcast { source, group, recipients });
        }
        GroupWrite::Chase { source } => {
            let Some(group) = students.get(source).and_then(|s| s.group_id) else {
                return;
            };
            for (id, student) in students.iter_mut() {
                if id == source
                    || student.group_id != Some(group)
                    || student.state == StudentState::Fleeing
                {
                    continue;
                }
                student.state = StudentState::Chasing;
                student.last_seen_player = Some(ctx.player);
                student.target = Some(ctx.player);
                student.search_target = None;
            }
        }
    }
}

fn move_student(
    id: StudentId,
    student: &mut Student,
    positions: &[(StudentId, Position)],
    ctx: &PursuitContext<'_>,
) {
    if student.state == StudentState::Fleeing {
        apply_motion(student, flee_step(ctx.grid, student.pos, ctx.player, ctx.speed));
        return;
    }

    let Some(target) = student.target else {
        student.is_moving = false;
        return;
    };
    let separation = Separation { self_id: id, peers: positions };
    let result = move_towards(ctx.grid, student.pos, target, ctx.speed, Some(separation));
    let blocked = !result.is_moving && result.position != target;
    apply_motion(student, result);

    match student.state {
        StudentState::Searching if blocked => student.search_target = None,
        StudentState::Idle | StudentState::Informed if !student.is_moving => student.target = None,
        _ => {}
    }
}

fn apply_motion(student: &mut Student, result: MoveResult) {
    student.pos = result.position;
    student.direction = result.direction;
    student.is_moving = result.is_moving;
}

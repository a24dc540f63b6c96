use faculty_core::pursuit::{PursuitContext, step_students, student_speed};
use faculty_core::spatial::tile_center;
use faculty_core::state::{GroupIds, Student};
use faculty_core::tuning::tiles;
use faculty_core::{
    GroupId, LogEvent, Position, SimRng, StudentId, StudentState, TileGrid, TileKind, TilePos,
};
use slotmap::SlotMap;

fn at(y: i32, x: i32) -> Position {
    tile_center(TilePos { y, x })
}

/// 32x32 floor with a solid wall across row 5, so anything below row 5 is blind to row 2.
fn walled_courtyard() -> TileGrid {
    let mut grid = TileGrid::filled(32, 32, TileKind::Floor);
    for x in 0..32 {
        grid.set_tile(TilePos { y: 5, x }, TileKind::Wall);
    }
    grid
}

struct World {
    grid: TileGrid,
    students: SlotMap<StudentId, Student>,
    groups: GroupIds,
    rng: SimRng,
    log: Vec<LogEvent>,
    tick: u64,
}

impl World {
    fn new(grid: TileGrid) -> Self {
        Self {
            grid,
            students: SlotMap::with_key(),
            groups: GroupIds::default(),
            rng: SimRng::seed_from_u64(99),
            log: Vec::new(),
            tick: 1,
        }
    }

    fn add(&mut self, pos: Position, state: StudentState) -> StudentId {
        self.students.insert(Student { state, ..Student::new(pos, "When is the deadline?") })
    }

    fn step(&mut self, player: Position) {
        let ctx = PursuitContext {
            grid: &self.grid,
            player,
            tick: self.tick,
            reveal: false,
            repellent_active: false,
            speed: student_speed(self.tick),
        };
        step_students(&mut self.students, &mut self.groups, &ctx, &mut self.rng, &mut self.log);
        self.tick += 1;
    }
}

#[test]
fn lone_chaser_that_loses_sight_ends_up_searching() {
    let mut world = World::new(walled_courtyard());
    let hidden_player = at(2, 10);
    let chaser = world.add(at(14, 10), StudentState::Chasing);
    world.students[chaser].last_seen_player = Some(at(9, 10));
    world.students[chaser].target = Some(at(9, 10));
    world.students[chaser].is_moving = true;

    let mut searching_at = None;
    for tick in 0..200 {
        world.step(hidden_player);
        let state = world.students[chaser].state;
        if state == StudentState::Searching {
            searching_at = Some(tick);
            break;
        }
        assert_eq!(state, StudentState::Chasing, "unexpected detour at tick {tick}");
    }
    assert!(searching_at.is_some(), "chaser never gave up");
    assert!(world.students[chaser].search_target.is_some());
}

#[test]
fn group_mates_join_the_chase_in_the_same_tick() {
    let mut world = World::new(walled_courtyard());
    let player = at(10, 20);
    let spotter = world.add(at(10, 14), StudentState::Informed);
    let behind_wall = world.add(at(2, 3), StudentState::Searching);
    let idle_mate = world.add(at(28, 28), StudentState::Idle);
    let outsider = world.add(at(3, 25), StudentState::Idle);
    for id in [spotter, behind_wall, idle_mate] {
        world.students[id].group_id = Some(GroupId(5));
    }

    world.step(player);
    for id in [spotter, behind_wall, idle_mate] {
        let student = &world.students[id];
        assert_eq!(student.state, StudentState::Chasing);
        assert_eq!(student.target, Some(player));
    }
    assert_eq!(world.students[outsider].group_id, None);
    assert_ne!(world.students[outsider].state, StudentState::Chasing);
}

#[test]
fn chaser_losing_sight_pairs_with_a_peer_three_tiles_away() {
    let mut world = World::new(walled_courtyard());
    let hidden_player = at(2, 10);
    let start = at(10, 10);
    let chaser = world.add(start, StudentState::Chasing);
    let sighting = Position::new(start.x + tiles(1.5), start.y);
    world.students[chaser].last_seen_player = Some(sighting);
    world.students[chaser].target = Some(sighting);
    world.students[chaser].is_moving = true;
    let peer = world.add(at(10, 13), StudentState::Idle);

    world.step(hidden_player);
    let group = world.students[chaser].group_id;
    assert!(group.is_some());
    assert_eq!(world.students[peer].group_id, group);
    assert_eq!(world.students[chaser].state, StudentState::Informed);
    assert_eq!(world.students[peer].state, StudentState::Informed);
}

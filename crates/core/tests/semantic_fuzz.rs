use faculty_core::spatial::is_walkable;
use faculty_core::{
    AdvanceStopReason, Direction, Game, PlayerInput, SessionConfig, StudentState, ToolKind,
    UpgradeKind,
};
use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p]
}

fn random_input(rng: &mut ChaCha8Rng) -> PlayerInput {
    let all = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
    let mut held = Vec::new();
    for direction in all {
        if rng.next_u64() % 3 == 0 {
            held.push(direction);
        }
    }
    PlayerInput::holding(&held)
}

fn check_invariants(game: &Game, map_seed: u64) -> Result<(), String> {
    let state = game.state();
    let grid = &state.map.grid;
    let player = &state.player;
    if !is_walkable(grid, player.pos) {
        return Err(format!("player left walkable ground on map_seed {map_seed}"));
    }
    if player.health < 0.0 || player.health > player.max_health {
        return Err(format!("health {} out of bounds on map_seed {map_seed}", player.health));
    }
    if player.ego < 0.0 {
        return Err(format!("negative ego on map_seed {map_seed}"));
    }
    for (id, student) in &state.students {
        if !is_walkable(grid, student.pos) {
            return Err(format!("student {id:?} inside a wall on map_seed {map_seed}"));
        }
        if student.state == StudentState::Chasing && student.target.is_none() {
            return Err(format!("student {id:?} chasing nothing on map_seed {map_seed}"));
        }
        if student.group_id.is_some_and(|group| group.0 > state.groups.issued()) {
            return Err(format!("student {id:?} holds an unissued group on map_seed {map_seed}"));
        }
    }
    for npc in state.npcs.values() {
        let room = state.map.staff_rooms.get(npc.room);
        let tile = faculty_core::spatial::world_to_tile(npc.pos);
        if !room.is_some_and(|room| room.contains(tile)) {
            return Err(format!("staff member left its room on map_seed {map_seed}"));
        }
    }
    Ok(())
}

fn run_fuzz_simulation(map_seed: u64, input_seed: u64, max_ticks: u32) -> Result<(), String> {
    let config = SessionConfig { student_count: 10, ..SessionConfig::with_seed(map_seed) };
    let mut game = Game::new(&config).map_err(|error| error.to_string())?;
    let mut rng = ChaCha8Rng::seed_from_u64(input_seed);

    let mut total_steps = 0;
    while total_steps < max_ticks {
        let result = game.advance(random_input(&mut rng), 10);
        total_steps += result.simulated_ticks;

        // Refusals are part of the contract; only invariants matter here.
        let _ = game.purchase(choose(&mut rng, &UpgradeKind::ALL));
        let _ = game.use_tool(choose(&mut rng, &[ToolKind::Assignment, ToolKind::GptTracker]));

        check_invariants(&game, map_seed)?;
        if let AdvanceStopReason::Finished(_) = result.stop_reason {
            break;
        }
    }

    Ok(())
}

#[test]
fn fuzz_session_preserves_invariants() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(16));
    let seeds = (any::<u64>(), any::<u64>());

    runner
        .run(&seeds, |(map_seed, input_seed)| {
            run_fuzz_simulation(map_seed, input_seed, 3_000).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("semantic fuzz simulation should preserve invariants");
}

use faculty_core::{Direction, Game, PlayerInput, SessionConfig};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

const DIRECTIONS: [Direction; 4] =
    [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

/// Held keys change every half second, with idle stretches long enough for aura farming.
fn scripted_inputs(seed: u64, ticks: usize) -> Vec<PlayerInput> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut inputs = Vec::with_capacity(ticks);
    while inputs.len() < ticks {
        let input = match rng.next_u64() % 6 {
            0 => PlayerInput::NONE,
            roll => {
                let first = DIRECTIONS[(roll % 4) as usize];
                let second = DIRECTIONS[(rng.next_u64() % 4) as usize];
                PlayerInput::holding(&[first, second])
            }
        };
        let hold = if input.is_idle() { 240 } else { 30 };
        inputs.extend(std::iter::repeat_n(input, hold));
    }
    inputs.truncate(ticks);
    inputs
}

fn run_trace(seed: u64, inputs: &[PlayerInput]) -> (Vec<u64>, String) {
    let config = SessionConfig { student_count: 12, ..SessionConfig::with_seed(seed) };
    let mut game = Game::new(&config).expect("valid config");
    let mut hashes = Vec::with_capacity(inputs.len());
    for input in inputs {
        game.step(*input);
        hashes.push(game.snapshot_hash());
        if game.is_over() {
            break;
        }
    }
    let json = game.snapshot().to_json().expect("snapshot serializes");
    (hashes, json)
}

#[test]
fn identical_seed_and_inputs_produce_identical_sessions() {
    let inputs = scripted_inputs(9, 2_400);
    let (hashes_a, json_a) = run_trace(2024, &inputs);
    let (hashes_b, json_b) = run_trace(2024, &inputs);
    assert_eq!(hashes_a, hashes_b);
    assert_eq!(json_a, json_b);
}

#[test]
fn different_seeds_diverge() {
    let inputs = scripted_inputs(9, 120);
    let (hashes_a, _) = run_trace(1, &inputs);
    let (hashes_b, _) = run_trace(2, &inputs);
    assert_ne!(hashes_a, hashes_b);

    let map_a = Game::new(&SessionConfig::with_seed(1)).expect("valid config");
    let map_b = Game::new(&SessionConfig::with_seed(2)).expect("valid config");
    assert_ne!(map_a.map().canonical_bytes(), map_b.map().canonical_bytes());
}

#[test]
fn event_logs_replay_identically() {
    let inputs = scripted_inputs(3, 1_800);
    let run = |seed| {
        let mut game = Game::new(&SessionConfig::with_seed(seed)).expect("valid config");
        for input in &inputs {
            game.step(*input);
        }
        format!("{:?}", game.log())
    };
    assert_eq!(run(77), run(77));
}

#[test]
fn restart_reproduces_a_fresh_session() {
    let inputs = scripted_inputs(5, 600);
    let mut restarted = Game::new(&SessionConfig::with_seed(10)).expect("valid config");
    for input in &inputs {
        restarted.step(*input);
    }
    restarted.restart(11);
    let mut fresh = Game::new(&SessionConfig::with_seed(11)).expect("valid config");
    assert_eq!(restarted.snapshot_hash(), fresh.snapshot_hash());

    for input in &inputs {
        restarted.step(*input);
        fresh.step(*input);
    }
    assert_eq!(restarted.snapshot_hash(), fresh.snapshot_hash());
}

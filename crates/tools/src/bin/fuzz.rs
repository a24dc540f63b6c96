use anyhow::{Result, ensure};
use clap::Parser;
use faculty_core::spatial::is_walkable;
use faculty_core::{
    AdvanceStopReason, Direction, Game, PlayerInput, SessionConfig, StudentState, ToolKind,
    UpgradeKind,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of consecutive seeds to run, starting at `seed`
    #[arg(short, long, default_value_t = 1)]
    runs: u64,
    #[arg(short, long, default_value_t = 6_000)]
    ticks: u32,
    #[arg(long, default_value_t = 16)]
    students: usize,
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p]
}

fn random_input(rng: &mut ChaCha8Rng) -> PlayerInput {
    let directions = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
    let held: Vec<Direction> =
        directions.into_iter().filter(|_| rng.next_u64() % 3 == 0).collect();
    PlayerInput::holding(&held)
}

fn check_invariants(game: &Game) -> Result<()> {
    let state = game.state();
    let grid = &state.map.grid;
    let player = &state.player;
    ensure!(is_walkable(grid, player.pos), "Invariant failed: player inside wall");
    ensure!(player.health <= player.max_health, "Invariant failed: health above max");
    ensure!(player.ego >= 0.0, "Invariant failed: negative ego");
    for (id, student) in &state.students {
        ensure!(is_walkable(grid, student.pos), "Invariant failed: student {id:?} inside wall");
        ensure!(
            student.state != StudentState::Chasing || student.target.is_some(),
            "Invariant failed: student {id:?} chasing without a target"
        );
    }
    Ok(())
}

fn run(seed: u64, args: &Args) -> Result<()> {
    let config = SessionConfig { student_count: args.students, ..SessionConfig::with_seed(seed) };
    let mut game = Game::new(&config)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut total_steps = 0;
    while total_steps < args.ticks {
        let result = game.advance(random_input(&mut rng), 10);
        total_steps += result.simulated_ticks;

        // Refused purchases are expected most of the time.
        let _ = game.purchase(choose(&mut rng, &UpgradeKind::ALL));
        let _ = game.use_tool(choose(&mut rng, &[ToolKind::Assignment, ToolKind::GptTracker]));

        check_invariants(&game)?;
        if let AdvanceStopReason::Finished(reason) = result.stop_reason {
            println!("Seed {seed}: {reason:?} after {total_steps} ticks");
            return Ok(());
        }
    }
    println!("Seed {seed}: survived {total_steps} ticks");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting fuzz harness on {} seed(s) for max {} ticks...", args.runs, args.ticks);
    for seed in args.seed..args.seed.saturating_add(args.runs) {
        run(seed, &args)?;
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}

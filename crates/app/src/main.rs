mod frame_input;
mod render;
mod window_config;

use std::env;

use faculty_app::app_loop::{AppState, FrameKeys};
use faculty_app::launch::{generate_runtime_seed, parse_launch_args};
use faculty_app::stats_file::MetaStats;
use faculty_core::{Game, SessionConfig};
use macroquad::prelude::next_frame;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::frame_input::capture_frame_input;
use crate::render::draw_frame;
use crate::window_config::build_window_conf;

fn session_config() -> SessionConfig {
    let args: Vec<String> = env::args().collect();
    match parse_launch_args(&args, generate_runtime_seed()) {
        Ok(options) => options.session_config(),
        Err(error) => {
            warn!(%error, "ignoring launch arguments");
            SessionConfig::with_seed(generate_runtime_seed())
        }
    }
}

#[macroquad::main(build_window_conf)]
async fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = session_config();
    let mut game = match Game::new(&config) {
        Ok(game) => game,
        Err(error) => {
            warn!(%error, "invalid session options, using defaults");
            let fallback = SessionConfig::with_seed(config.seed);
            let Ok(game) = Game::new(&fallback) else {
                return;
            };
            game
        }
    };

    let stats_path = MetaStats::get_default_path();
    let mut stats = match stats_path.as_deref().map(MetaStats::load_or_default) {
        Some(Ok(stats)) => stats,
        Some(Err(error)) => {
            warn!(%error, "meta stats unreadable, starting fresh");
            MetaStats::default()
        }
        None => MetaStats::default(),
    };

    let mut app = AppState::new();
    loop {
        let input = capture_frame_input();
        let frame = FrameKeys { pressed: &input.keys_pressed, held: input.held, dt: input.dt };
        if let Some(summary) = app.tick(&mut game, &stats, frame) {
            stats.record(&summary);
            if let Some(path) = &stats_path
                && let Err(error) = stats.write_atomic(path)
            {
                warn!(%error, path = %path.display(), "failed to save meta stats");
            }
        }

        draw_frame(&game, &app, &stats);
        next_frame().await
    }
}

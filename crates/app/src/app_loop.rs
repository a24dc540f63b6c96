use faculty_core::tuning::TICKS_PER_SECOND;
use faculty_core::{CharacterId, Game, PlayerInput, SessionSummary, ToolKind, UpgradeKind};
use macroquad::prelude::KeyCode;

use crate::launch::generate_runtime_seed;
use crate::stats_file::MetaStats;

pub const TICK_SECONDS: f32 = 1.0 / TICKS_PER_SECOND as f32;
/// Long frames (window drags, breakpoints) are clamped instead of replayed.
pub const MAX_FRAME_SECONDS: f32 = 0.25;
pub const MAX_TICKS_PER_FRAME: u32 = 8;

pub const SHOP_KEYS: [(KeyCode, UpgradeKind); 3] = [
    (KeyCode::Key1, UpgradeKind::SpeedBoost),
    (KeyCode::Key2, UpgradeKind::Assignment),
    (KeyCode::Key3, UpgradeKind::GptTracker),
];
pub const TOOL_KEYS: [(KeyCode, ToolKind); 2] =
    [(KeyCode::Q, ToolKind::Assignment), (KeyCode::E, ToolKind::GptTracker)];

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Screen {
    #[default]
    Start,
    Playing,
    GameOver(SessionSummary),
}

/// Everything the app loop reads from one rendered frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameKeys<'a> {
    pub pressed: &'a [KeyCode],
    pub held: PlayerInput,
    pub dt: f32,
}

pub struct AppState {
    pub screen: Screen,
    pub character: CharacterId,
    /// Latest shop or tool message, shown until the next one.
    pub notice: Option<String>,
    accumulator: f32,
    seed_source: fn() -> u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_seed_source(generate_runtime_seed)
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed_source(seed_source: fn() -> u64) -> Self {
        Self {
            screen: Screen::Start,
            character: CharacterId::default(),
            notice: None,
            accumulator: 0.0,
            seed_source,
        }
    }

    /// Runs one frame. Returns the summary of a session that ended during this frame.
    pub fn tick(
        &mut self,
        game: &mut Game,
        stats: &MetaStats,
        frame: FrameKeys<'_>,
    ) -> Option<SessionSummary> {
        match self.screen {
            Screen::Start => {
                self.handle_start_keys(game, stats, frame.pressed);
                None
            }
            Screen::Playing => self.play(game, frame),
            Screen::GameOver(_) => {
                if frame.pressed.contains(&KeyCode::Enter) {
                    self.start_session(game, (self.seed_source)());
                } else if frame.pressed.contains(&KeyCode::Escape) {
                    self.reset_to_start(game);
                }
                None
            }
        }
    }

    fn handle_start_keys(&mut self, game: &mut Game, stats: &MetaStats, pressed: &[KeyCode]) {
        let unlocked = stats.unlocked_characters();
        if !unlocked.contains(&self.character) {
            self.character = CharacterId::default();
        }
        let current = unlocked.iter().position(|c| *c == self.character).unwrap_or(0);
        if pressed.contains(&KeyCode::Right) && !unlocked.is_empty() {
            self.character = unlocked[(current + 1) % unlocked.len()];
        }
        if pressed.contains(&KeyCode::Left) && !unlocked.is_empty() {
            self.character = unlocked[(current + unlocked.len() - 1) % unlocked.len()];
        }
        if pressed.contains(&KeyCode::Enter) {
            self.start_session(game, game.seed());
        }
    }

    fn start_session(&mut self, game: &mut Game, seed: u64) {
        let mut config = game.config().clone();
        config.seed = seed;
        config.character = self.character;
        match Game::new(&config) {
            Ok(fresh) => {
                *game = fresh;
                self.screen = Screen::Playing;
                self.notice = None;
                self.accumulator = 0.0;
            }
            Err(error) => self.notice = Some(error.to_string()),
        }
    }

    fn reset_to_start(&mut self, game: &mut Game) {
        game.restart((self.seed_source)());
        self.screen = Screen::Start;
        self.notice = None;
    }

    fn play(&mut self, game: &mut Game, frame: FrameKeys<'_>) -> Option<SessionSummary> {
        for (key, kind) in SHOP_KEYS {
            if frame.pressed.contains(&key) {
                self.notice = Some(match game.purchase(kind) {
                    Ok(()) => format!("Bought {}", kind.name()),
                    Err(error) => error.to_string(),
                });
            }
        }
        for (key, tool) in TOOL_KEYS {
            if frame.pressed.contains(&key) {
                self.notice = match game.use_tool(tool) {
                    Ok(()) => None,
                    Err(error) => Some(error.to_string()),
                };
            }
        }

        self.accumulator += frame.dt.clamp(0.0, MAX_FRAME_SECONDS);
        let mut ticks = 0;
        while self.accumulator >= TICK_SECONDS && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= TICK_SECONDS;
            ticks += 1;
            game.step(frame.held);
            if game.is_over() {
                break;
            }
        }
        if ticks == MAX_TICKS_PER_FRAME {
            self.accumulator = self.accumulator.min(TICK_SECONDS);
        }

        if game.is_over() {
            let summary = game.summary();
            self.screen = Screen::GameOver(summary);
            return Some(summary);
        }
        None
    }
}

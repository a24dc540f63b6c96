//! Session construction: map generation, spawns and restart.

use tracing::debug;

use super::*;
use crate::config::ConfigError;
use crate::content;
use crate::mapgen::MapGenerator;
use crate::spatial::tile_center;
use crate::state::{Coin, Npc, Player, Student};

impl Game {
    pub fn new(config: &SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = SimRng::seed_from_u64(config.seed);
        let state = build_state(config, &mut rng);
        debug!(
            seed = config.seed,
            map_size = config.map_size,
            students = state.students.len(),
            coins = state.coins.len(),
            staff_rooms = state.map.staff_rooms.len(),
            "session started"
        );
        Ok(Self {
            seed: config.seed,
            tick: 0,
            rng,
            config: config.clone(),
            state,
            log: Vec::new(),
            outcome: None,
        })
    }

    /// Regenerates everything from `seed`, keeping the rest of the configuration.
    pub fn restart(&mut self, seed: u64) {
        self.config.seed = seed;
        self.seed = seed;
        self.rng = SimRng::seed_from_u64(seed);
        self.state = build_state(&self.config, &mut self.rng);
        self.tick = 0;
        self.log.clear();
        self.outcome = None;
        debug!(seed, "session restarted");
    }
}

fn build_state(config: &SessionConfig, rng: &mut SimRng) -> GameState {
    let map = MapGenerator::new(config.map_size).generate(rng);
    let spawn = tile_center(map.find_spawn_point(rng));
    let mut state = GameState::new(map, Player::new(spawn, config.character));

    for _ in 0..config.student_count {
        let pos = tile_center(state.map.find_spawn_point(rng));
        let complaint = content::complaint(rng.index(content::STUDENT_COMPLAINTS.len()));
        state.students.insert(Student::new(pos, complaint));
    }

    for _ in 0..config.coin_count {
        let pos = tile_center(state.map.find_spawn_point(rng));
        state.coins.insert(Coin { pos, collected: false, respawn_at: None });
    }

    for (room, staff_room) in state.map.staff_rooms.iter().enumerate() {
        state.npcs.insert(Npc {
            room,
            pos: staff_room.centroid,
            direction: Direction::Down,
            is_moving: false,
            target: None,
            saying_index: room % content::STAFF_SAYINGS.len(),
        });
    }

    state
}

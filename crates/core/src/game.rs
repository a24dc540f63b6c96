//! Session orchestration: owns the generated map, the roster and the tick clock.

use tracing::info;

use crate::config::SessionConfig;
use crate::mapgen::GeneratedMap;
use crate::rng::SimRng;
use crate::state::GameState;
use crate::types::*;

mod bootstrap;
mod hash;
mod npcs;
mod shop;
mod snapshot;
mod tick;

#[cfg(test)]
mod test_support;

pub use shop::ShopError;
pub use snapshot::{GameSnapshot, SessionSummary, StudentView};

pub struct Game {
    seed: u64,
    tick: u64,
    rng: SimRng,
    config: SessionConfig,
    state: GameState,
    log: Vec<LogEvent>,
    outcome: Option<GameOverReason>,
}

impl Game {
    /// Steps up to `max_ticks` ticks with the same held input, stopping once the session ends.
    pub fn advance(&mut self, input: PlayerInput, max_ticks: u32) -> AdvanceResult {
        let mut steps = 0;
        while steps < max_ticks {
            if let Some(reason) = self.outcome {
                return AdvanceResult {
                    simulated_ticks: steps,
                    stop_reason: AdvanceStopReason::Finished(reason),
                };
            }
            self.run_tick(input);
            steps += 1;
        }

        let stop_reason = match self.outcome {
            Some(reason) => AdvanceStopReason::Finished(reason),
            None => AdvanceStopReason::BudgetExhausted,
        };
        AdvanceResult { simulated_ticks: steps, stop_reason }
    }

    pub fn step(&mut self, input: PlayerInput) -> AdvanceResult {
        self.advance(input, 1)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn map(&self) -> &GeneratedMap {
        &self.state.map
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn outcome(&self) -> Option<GameOverReason> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    fn finish(&mut self, reason: GameOverReason) {
        if self.outcome.is_some() {
            return;
        }
        self.outcome = Some(reason);
        self.log.push(LogEvent::GameOver { reason });
        info!(
            seed = self.seed,
            tick = self.tick,
            ?reason,
            ego = self.state.player.ego,
            "session over"
        );
    }
}


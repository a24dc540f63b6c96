//! Serializable read-only views for presentation layers and tooling.

use serde::Serialize;

use super::*;
use crate::state::{Coin, Effects, Npc, Player, Student};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StudentView {
    pub id: StudentId,
    #[serde(flatten)]
    pub student: Student,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub seed: u64,
    pub tick: u64,
    pub player: Player,
    pub students: Vec<StudentView>,
    /// Uncollected coins only.
    pub coins: Vec<Coin>,
    pub npcs: Vec<Npc>,
    pub effects: Effects,
    /// While set, consumers may show every student regardless of line of sight.
    pub tracker_active: bool,
    pub near_staff: bool,
    pub outcome: Option<GameOverReason>,
}

impl GameSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub character: CharacterId,
    pub survival_ticks: u64,
    pub final_ego: f32,
    pub coins_collected: u32,
    pub reason: Option<GameOverReason>,
}

impl SessionSummary {
    pub fn survival_seconds(&self) -> u64 {
        self.survival_ticks / crate::tuning::TICKS_PER_SECOND
    }
}

impl Game {
    pub fn snapshot(&self) -> GameSnapshot {
        let state = &self.state;
        GameSnapshot {
            seed: self.seed,
            tick: self.tick,
            player: state.player.clone(),
            students: state
                .students
                .iter()
                .map(|(id, student)| StudentView { id, student: student.clone() })
                .collect(),
            coins: state.coins.values().filter(|coin| !coin.collected).cloned().collect(),
            npcs: state.npcs.values().cloned().collect(),
            effects: state.effects,
            tracker_active: state.effects.tracker_active(self.tick),
            near_staff: self.is_near_staff(),
            outcome: self.outcome,
        }
    }

    pub fn summary(&self) -> SessionSummary {
        let player = &self.state.player;
        SessionSummary {
            seed: self.seed,
            character: player.character,
            survival_ticks: self.tick,
            final_ego: player.ego,
            coins_collected: player.coins_collected,
            reason: self.outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn snapshot_lists_roster_and_hides_collected_coins() {
        let mut game = corridor_game();
        let pos = game.state.player.pos;
        let student = add_student(&mut game, Position::new(pos.x + 300.0, pos.y));
        add_coin(&mut game, Position::new(pos.x + 8.0, pos.y));
        add_coin(&mut game, Position::new(pos.x + 200.0, pos.y));
        game.step(PlayerInput::NONE);

        let snapshot = game.snapshot();
        assert_eq!(snapshot.tick, 1);
        assert_eq!(snapshot.students.len(), 1);
        assert_eq!(snapshot.students[0].id, student);
        assert_eq!(snapshot.coins.len(), 1);
        assert!(!snapshot.tracker_active);
        assert!(!snapshot.near_staff);

        let json = snapshot.to_json().expect("snapshot serializes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["tick"], 1);
        assert_eq!(value["students"][0]["state"], "Chasing");
    }

    #[test]
    fn tracker_flag_follows_the_effect() {
        let mut game = corridor_game();
        game.state.player.trackers = 1;
        game.use_tool(ToolKind::GptTracker).expect("charge available");
        assert!(game.snapshot().tracker_active);
    }

    #[test]
    fn summary_reports_the_run() {
        let mut game = corridor_game();
        game.advance(PlayerInput::holding(&[Direction::Right]), 120);
        let summary = game.summary();
        assert_eq!(summary.survival_ticks, 120);
        assert_eq!(summary.survival_seconds(), 2);
        assert_eq!(summary.reason, None);
        assert_eq!(summary.character, CharacterId::Lecturer);
        assert!(summary.final_ego < crate::tuning::STARTING_EGO);
    }
}

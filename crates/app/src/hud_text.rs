//! Text for the HUD, the start and game-over screens, and event log entries.

use faculty_core::spatial::world_to_tile;
use faculty_core::tuning::TICKS_PER_SECOND;
use faculty_core::{CharacterId, Game, LogEvent, SessionSummary, StudentState, ToolKind};

use crate::app_loop::SHOP_KEYS;
use crate::stats_file::MetaStats;
use crate::{format_clock, format_seed, format_snapshot_hash, reason_code};

pub fn hud_lines(game: &Game) -> Vec<String> {
    let player = &game.state().player;
    let mut lines = vec![
        format!("Time {}", format_clock(game.current_tick() / TICKS_PER_SECOND)),
        format!("Health {:.0}/{:.0}", player.health, player.max_health),
        format!("Ego {:.0}", player.ego),
        format!(
            "[Q] Assignments {}  [E] Trackers {}",
            player.tool_charges(ToolKind::Assignment),
            player.tool_charges(ToolKind::GptTracker)
        ),
    ];
    if player.aura_farming {
        lines.push("Aura farming: everyone can see you".to_string());
    }
    if game.map().staff_room_at(world_to_tile(player.pos)).is_some() {
        lines.push("Staff room".to_string());
    }
    lines
}

pub fn shop_lines(ego: f32) -> Vec<String> {
    let mut lines = vec!["Staff shop:".to_string()];
    for (index, (_, kind)) in SHOP_KEYS.iter().enumerate() {
        let marker = if ego >= kind.cost() { ' ' } else { 'x' };
        lines.push(format!(
            "{marker}[{}] {} ({:.0} ego) {}",
            index + 1,
            kind.name(),
            kind.cost(),
            kind.description()
        ));
    }
    lines
}

pub fn student_state_label(state: StudentState) -> &'static str {
    match state {
        StudentState::Idle => "idle",
        StudentState::Chasing => "chasing",
        StudentState::Informed => "heard a rumour",
        StudentState::Searching => "searching",
        StudentState::Fleeing => "fleeing",
    }
}

pub fn character_line(character: CharacterId, stats: &MetaStats) -> String {
    let profile = character.profile();
    let mut line = format!(
        "{} ({} hp, {:.0}% speed)",
        profile.name,
        profile.max_health,
        profile.speed_multiplier * 100.0
    );
    if !stats.is_unlocked(character)
        && let Some(unlock) = profile.unlock
    {
        line.push_str(&format!(
            " locked: {}/{} {:?}",
            stats.value(unlock.stat),
            unlock.amount,
            unlock.stat
        ));
    }
    line
}

pub fn start_screen_lines(selected: CharacterId, seed: u64, stats: &MetaStats) -> Vec<String> {
    let mut lines = vec![
        "Survive the students. Keep your ego.".to_string(),
        format!("Seed: {}", format_seed(seed)),
        String::new(),
    ];
    for character in CharacterId::ALL {
        let cursor = if character == selected { '>' } else { ' ' };
        lines.push(format!("{cursor} {}", character_line(character, stats)));
    }
    lines.push(String::new());
    lines.push("Left/Right to choose, Enter to start".to_string());
    lines
}

pub fn game_over_lines(game: &Game, summary: &SessionSummary, stats: &MetaStats) -> Vec<String> {
    let reason = summary.reason.map_or("IN_PROGRESS", reason_code);
    vec![
        format!("Session over: {reason}"),
        format!("Survived {}", format_clock(summary.survival_seconds())),
        format!("Final ego {:.0}", summary.final_ego),
        format!("Coins {}", summary.coins_collected),
        format!("Seed {}  Snapshot {}", summary.seed, format_snapshot_hash(game.snapshot_hash())),
        String::new(),
        format!(
            "Runs {}  Best {}  Total coins {}",
            stats.runs_played,
            format_clock(stats.best_survival_ticks / TICKS_PER_SECOND),
            stats.total_coins
        ),
        "Enter for another run, Escape for the menu".to_string(),
    ]
}

pub fn event_log_line(event: &LogEvent) -> Option<String> {
    let line = match event {
        LogEvent::StudentStateChanged { to: StudentState::Chasing, .. } => {
            "A student spotted you!".to_string()
        }
        LogEvent::StudentStateChanged { .. } => return None,
        LogEvent::GroupFormed { .. } => "Students are comparing notes".to_string(),
        LogEvent::SightingBroadcast { recipients, .. } => {
            format!("Word spreads to {recipients} more students")
        }
        LogEvent::PlayerDamaged { amount, .. } => format!("Cornered! -{amount:.0} health"),
        LogEvent::CoinCollected { ego_awarded, .. } => format!("+{ego_awarded:.0} ego"),
        LogEvent::CoinRespawned { .. } => return None,
        LogEvent::UpgradePurchased { kind } => format!("Bought {}", kind.name()),
        LogEvent::ToolUsed { kind } => match kind {
            ToolKind::Assignment => "Surprise assignment announced".to_string(),
            ToolKind::GptTracker => "Tracker online".to_string(),
        },
        LogEvent::AuraFarmingStarted => "Aura farming...".to_string(),
        LogEvent::AuraFarmingEnded => "Back to work".to_string(),
        LogEvent::GameOver { reason } => format!("Game over: {}", reason_code(*reason)),
    };
    Some(line)
}

/// Latest `limit` displayable log lines, oldest first.
pub fn recent_event_lines(events: &[LogEvent], limit: usize) -> Vec<String> {
    let mut lines: Vec<String> =
        events.iter().rev().filter_map(event_log_line).take(limit).collect();
    lines.reverse();
    lines
}

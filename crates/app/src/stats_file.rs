//! Meta statistics persisted across runs, and the character unlocks they gate.

use directories::ProjectDirs;
use faculty_core::{CharacterId, MetaStat, SessionSummary};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::APP_NAME;

pub const STATS_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MetaStats {
    pub format_version: u32,
    pub runs_played: u64,
    pub total_survival_ticks: u64,
    pub best_survival_ticks: u64,
    pub total_coins: u64,
    pub best_ego: f32,
}

impl Default for MetaStats {
    fn default() -> Self {
        Self {
            format_version: STATS_FORMAT_VERSION,
            runs_played: 0,
            total_survival_ticks: 0,
            best_survival_ticks: 0,
            total_coins: 0,
            best_ego: 0.0,
        }
    }
}

impl MetaStats {
    pub fn get_default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
            let mut path = proj_dirs.data_dir().to_path_buf();
            path.push("meta_stats.json");
            path
        })
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;

        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let stats: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(stats)
    }

    /// Missing file means a first launch; anything else unreadable is reported.
    pub fn load_or_default(path: &Path) -> io::Result<Self> {
        match Self::load(path) {
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            other => other,
        }
    }

    pub fn record(&mut self, summary: &SessionSummary) {
        self.runs_played += 1;
        self.total_survival_ticks += summary.survival_ticks;
        self.best_survival_ticks = self.best_survival_ticks.max(summary.survival_ticks);
        self.total_coins += u64::from(summary.coins_collected);
        self.best_ego = self.best_ego.max(summary.final_ego);
    }

    pub fn value(&self, stat: MetaStat) -> u64 {
        match stat {
            MetaStat::RunsPlayed => self.runs_played,
            MetaStat::TotalSurvivalTicks => self.total_survival_ticks,
            MetaStat::TotalCoins => self.total_coins,
        }
    }

    pub fn is_unlocked(&self, character: CharacterId) -> bool {
        character.profile().unlock.is_none_or(|unlock| self.value(unlock.stat) >= unlock.amount)
    }

    pub fn unlocked_characters(&self) -> Vec<CharacterId> {
        CharacterId::ALL.into_iter().filter(|character| self.is_unlocked(*character)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faculty_core::GameOverReason;
    use tempfile::tempdir;

    fn summary(survival_ticks: u64, coins_collected: u32, final_ego: f32) -> SessionSummary {
        SessionSummary {
            seed: 1,
            character: CharacterId::Lecturer,
            survival_ticks,
            final_ego,
            coins_collected,
            reason: Some(GameOverReason::Overwhelmed),
        }
    }

    #[test]
    fn record_accumulates_totals_and_bests() {
        let mut stats = MetaStats::default();
        stats.record(&summary(600, 4, 70.0));
        stats.record(&summary(300, 2, 90.0));
        assert_eq!(stats.runs_played, 2);
        assert_eq!(stats.total_survival_ticks, 900);
        assert_eq!(stats.best_survival_ticks, 600);
        assert_eq!(stats.total_coins, 6);
        assert_eq!(stats.best_ego, 90.0);
    }

    #[test]
    fn characters_unlock_from_stats() {
        let mut stats = MetaStats::default();
        assert_eq!(stats.unlocked_characters(), vec![CharacterId::Lecturer]);
        for _ in 0..3 {
            stats.record(&summary(10, 0, 0.0));
        }
        assert!(stats.is_unlocked(CharacterId::TeachingAssistant));
        assert!(!stats.is_unlocked(CharacterId::Dean));
        stats.total_coins = 100;
        assert!(stats.is_unlocked(CharacterId::Dean));
    }

    #[test]
    fn atomic_write_and_load() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("stats.json");
        let mut stats = MetaStats::default();
        stats.record(&summary(1_200, 9, 55.5));

        stats.write_atomic(&path).expect("write");
        let loaded = MetaStats::load(&path).expect("load");
        assert_eq!(stats, loaded);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn missing_file_loads_defaults_but_garbage_is_an_error() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("stats.json");
        assert_eq!(MetaStats::load_or_default(&path).expect("defaults"), MetaStats::default());

        fs::write(&path, "{ not json").expect("write garbage");
        let err = MetaStats::load_or_default(&path).expect_err("garbage should not parse");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn older_files_missing_fields_still_load() {
        let stats: MetaStats =
            serde_json::from_str(r#"{"runs_played": 4}"#).expect("partial stats parse");
        assert_eq!(stats.runs_played, 4);
        assert_eq!(stats.format_version, STATS_FORMAT_VERSION);
    }
}

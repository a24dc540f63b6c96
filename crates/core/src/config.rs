//! Per-session configuration and its validation.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::tuning::{DEFAULT_COIN_COUNT, DEFAULT_STUDENT_COUNT, MAP_SIZE};
use crate::types::CharacterId;

pub const MAP_SIZE_RANGE: RangeInclusive<usize> = 24..=256;
pub const STUDENT_COUNT_RANGE: RangeInclusive<usize> = 1..=64;
pub const MAX_COIN_COUNT: usize = 500;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub seed: u64,
    pub map_size: usize,
    pub student_count: usize,
    pub coin_count: usize,
    pub character: CharacterId,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            map_size: MAP_SIZE,
            student_count: DEFAULT_STUDENT_COUNT,
            coin_count: DEFAULT_COIN_COUNT,
            character: CharacterId::default(),
        }
    }
}

impl SessionConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self { seed, ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !MAP_SIZE_RANGE.contains(&self.map_size) {
            return Err(ConfigError::MapSize(self.map_size));
        }
        if !STUDENT_COUNT_RANGE.contains(&self.student_count) {
            return Err(ConfigError::StudentCount(self.student_count));
        }
        if self.coin_count > MAX_COIN_COUNT {
            return Err(ConfigError::CoinCount(self.coin_count));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    MapSize(usize),
    StudentCount(usize),
    CoinCount(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MapSize(size) => write!(
                f,
                "map size {size} is outside {}..={}",
                MAP_SIZE_RANGE.start(),
                MAP_SIZE_RANGE.end()
            ),
            Self::StudentCount(count) => write!(
                f,
                "student count {count} is outside {}..={}",
                STUDENT_COUNT_RANGE.start(),
                STUDENT_COUNT_RANGE.end()
            ),
            Self::CoinCount(count) => {
                write!(f, "coin count {count} exceeds the limit of {MAX_COIN_COUNT}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

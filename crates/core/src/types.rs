use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct StudentId;
    pub struct CoinId;
    pub struct NpcId;
}

/// Continuous world-space coordinate in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Discrete tile coordinate. Ordered row-major so scans and tie-breaks are stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TilePos {
    pub y: i32,
    pub x: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Floor,
    Wall,
    StaffRoom,
}

impl TileKind {
    pub fn is_walkable(self) -> bool {
        matches!(self, Self::Floor | Self::StaffRoom)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Down,
    Left,
    Right,
    Up,
}

impl Direction {
    /// Facing for a displacement: horizontal dominance picks Left/Right, ties go vertical.
    pub fn from_delta(dx: f32, dy: f32) -> Self {
        if dx.abs() > dy.abs() {
            if dx > 0.0 { Self::Right } else { Self::Left }
        } else if dy < 0.0 {
            Self::Up
        } else {
            Self::Down
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StudentState {
    #[default]
    Idle,
    Chasing,
    Informed,
    Searching,
    Fleeing,
}

/// Opaque identifier shared by students informed of the same sighting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupId(pub u64);

/// Movement keys held during one tick. The core does not care where they came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl PlayerInput {
    pub const NONE: Self = Self { up: false, down: false, left: false, right: false };

    pub fn holding(directions: &[Direction]) -> Self {
        let mut input = Self::NONE;
        for direction in directions {
            match direction {
                Direction::Up => input.up = true,
                Direction::Down => input.down = true,
                Direction::Left => input.left = true,
                Direction::Right => input.right = true,
            }
        }
        input
    }

    /// Unit-per-axis intent with opposite keys cancelling out.
    pub fn axis(self) -> (f32, f32) {
        let dx = f32::from(i8::from(self.right) - i8::from(self.left));
        let dy = f32::from(i8::from(self.down) - i8::from(self.up));
        (dx, dy)
    }

    pub fn is_idle(self) -> bool {
        self.axis() == (0.0, 0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Health reached zero from student contact.
    Overwhelmed,
    /// Ego decayed to zero.
    EgoCollapsed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    SpeedBoost,
    Assignment,
    GptTracker,
}

impl UpgradeKind {
    pub const ALL: [Self; 3] = [Self::SpeedBoost, Self::Assignment, Self::GptTracker];

    pub fn cost(self) -> f32 {
        match self {
            Self::SpeedBoost => 60.0,
            Self::Assignment => 40.0,
            Self::GptTracker => 30.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::SpeedBoost => "Espresso Shot",
            Self::Assignment => "Surprise Assignment",
            Self::GptTracker => "GPT Tracker",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::SpeedBoost => "Permanently walk a little faster.",
            Self::Assignment => "Announce a deadline: nearby students scatter for a while.",
            Self::GptTracker => "Reveal every student on campus for a while.",
        }
    }

    /// Consumable tool granted by this purchase, if any.
    pub fn tool(self) -> Option<ToolKind> {
        match self {
            Self::SpeedBoost => None,
            Self::Assignment => Some(ToolKind::Assignment),
            Self::GptTracker => Some(ToolKind::GptTracker),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Assignment,
    GptTracker,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetaStat {
    RunsPlayed,
    TotalSurvivalTicks,
    TotalCoins,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unlock {
    pub stat: MetaStat,
    pub amount: u64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharacterProfile {
    pub name: &'static str,
    pub pronoun: &'static str,
    pub max_health: f32,
    pub speed_multiplier: f32,
    pub unlock: Option<Unlock>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterId {
    #[default]
    Lecturer,
    TeachingAssistant,
    Dean,
    Janitor,
}

impl CharacterId {
    pub const ALL: [Self; 4] = [Self::Lecturer, Self::TeachingAssistant, Self::Dean, Self::Janitor];

    pub fn profile(self) -> CharacterProfile {
        match self {
            Self::Lecturer => CharacterProfile {
                name: "Lecturer",
                pronoun: "they",
                max_health: 100.0,
                speed_multiplier: 1.0,
                unlock: None,
            },
            Self::TeachingAssistant => CharacterProfile {
                name: "Teaching Assistant",
                pronoun: "she",
                max_health: 80.0,
                speed_multiplier: 1.2,
                unlock: Some(Unlock { stat: MetaStat::RunsPlayed, amount: 3 }),
            },
            Self::Dean => CharacterProfile {
                name: "Dean",
                pronoun: "he",
                max_health: 150.0,
                speed_multiplier: 0.85,
                unlock: Some(Unlock { stat: MetaStat::TotalCoins, amount: 100 }),
            },
            Self::Janitor => CharacterProfile {
                name: "Janitor",
                pronoun: "he",
                max_health: 120.0,
                speed_multiplier: 1.1,
                // Ten minutes survived across all runs.
                unlock: Some(Unlock { stat: MetaStat::TotalSurvivalTicks, amount: 36_000 }),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum LogEvent {
    StudentStateChanged { student: StudentId, from: StudentState, to: StudentState },
    GroupFormed { group: GroupId, members: Vec<StudentId> },
    SightingBroadcast { source: StudentId, group: GroupId, recipients: u32 },
    PlayerDamaged { amount: f32, health_left: f32 },
    CoinCollected { coin: CoinId, ego_awarded: f32 },
    CoinRespawned { coin: CoinId },
    UpgradePurchased { kind: UpgradeKind },
    ToolUsed { kind: ToolKind },
    AuraFarmingStarted,
    AuraFarmingEnded,
    GameOver { reason: GameOverReason },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceStopReason {
    Finished(GameOverReason),
    BudgetExhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdvanceResult {
    pub simulated_ticks: u32,
    pub stop_reason: AdvanceStopReason,
}

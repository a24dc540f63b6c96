use serde::Serialize;
use slotmap::SlotMap;

use crate::mapgen::GeneratedMap;
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Player {
    pub pos: Position,
    pub direction: Direction,
    pub is_moving: bool,
    pub health: f32,
    pub max_health: f32,
    pub ego: f32,
    pub character: CharacterId,
    /// Consecutive ticks without held movement.
    pub idle_ticks: u32,
    pub aura_farming: bool,
    pub speed_boosts: u32,
    pub assignments: u32,
    pub trackers: u32,
    pub coins_collected: u32,
}

impl Player {
    pub fn new(pos: Position, character: CharacterId) -> Self {
        let profile = character.profile();
        Self {
            pos,
            direction: Direction::Down,
            is_moving: false,
            health: profile.max_health,
            max_health: profile.max_health,
            ego: crate::tuning::STARTING_EGO,
            character,
            idle_ticks: 0,
            aura_farming: false,
            speed_boosts: 0,
            assignments: 0,
            trackers: 0,
            coins_collected: 0,
        }
    }

    pub fn tool_charges(&self, tool: ToolKind) -> u32 {
        match tool {
            ToolKind::Assignment => self.assignments,
            ToolKind::GptTracker => self.trackers,
        }
    }

    pub(crate) fn tool_charges_mut(&mut self, tool: ToolKind) -> &mut u32 {
        match tool {
            ToolKind::Assignment => &mut self.assignments,
            ToolKind::GptTracker => &mut self.trackers,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Student {
    pub pos: Position,
    pub direction: Direction,
    pub is_moving: bool,
    pub state: StudentState,
    pub target: Option<Position>,
    pub last_seen_player: Option<Position>,
    pub search_target: Option<Position>,
    pub group_id: Option<GroupId>,
    pub communication_cooldown: u32,
    pub complaint: &'static str,
}

impl Student {
    pub fn new(pos: Position, complaint: &'static str) -> Self {
        Self {
            pos,
            direction: Direction::Down,
            is_moving: false,
            state: StudentState::Idle,
            target: None,
            last_seen_player: None,
            search_target: None,
            group_id: None,
            communication_cooldown: 0,
            complaint,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Coin {
    pub pos: Position,
    pub collected: bool,
    /// Tick at which a collected coin reappears somewhere new.
    pub respawn_at: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Npc {
    /// Index into the map's staff rooms.
    pub room: usize,
    pub pos: Position,
    pub direction: Direction,
    pub is_moving: bool,
    pub target: Option<Position>,
    pub saying_index: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Effects {
    pub repellent_until: Option<u64>,
    pub tracker_until: Option<u64>,
    pub last_damage_tick: Option<u64>,
}

impl Effects {
    pub fn repellent_active(&self, tick: u64) -> bool {
        self.repellent_until.is_some_and(|until| tick < until)
    }

    pub fn tracker_active(&self, tick: u64) -> bool {
        self.tracker_until.is_some_and(|until| tick < until)
    }
}

/// Source of fresh group identifiers. Ids are never reused within a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GroupIds {
    next: u64,
}

impl GroupIds {
    pub fn fresh(&mut self) -> GroupId {
        self.next += 1;
        GroupId(self.next)
    }

    pub fn issued(&self) -> u64 {
        self.next
    }
}

#[derive(Clone, Debug)]
pub struct GameState {
    pub map: GeneratedMap,
    pub player: Player,
    pub students: SlotMap<StudentId, Student>,
    pub coins: SlotMap<CoinId, Coin>,
    pub npcs: SlotMap<NpcId, Npc>,
    pub effects: Effects,
    pub groups: GroupIds,
}

impl GameState {
    pub fn new(map: GeneratedMap, player: Player) -> Self {
        Self {
            map,
            player,
            students: SlotMap::with_key(),
            coins: SlotMap::with_key(),
            npcs: SlotMap::with_key(),
            effects: Effects::default(),
            groups: GroupIds::default(),
        }
    }
}

//! Gameplay constants. Distances are in tiles unless the name says otherwise;
//! durations are in ticks at `TICKS_PER_SECOND`.

pub const TILE_SIZE: f32 = 32.0;
pub const MAP_SIZE: usize = 64;
pub const TICKS_PER_SECOND: u64 = 60;
pub const TICKS_PER_MINUTE: u64 = TICKS_PER_SECOND * 60;

pub const MOVE_SPEED: f32 = 2.0;
pub const SPEED_BOOST_STEP: f32 = 0.15;
pub const MAX_SPEED_BOOSTS: u32 = 5;

pub const STUDENT_SPEED: f32 = 1.5;
/// Fractional student speed increase per whole elapsed minute.
pub const STUDENT_SPEED_GROWTH_PER_MINUTE: f32 = 0.1;
pub const STUDENT_VIEW_DISTANCE_TILES: f32 = 10.0;
pub const STUDENT_COMMUNICATION_RANGE_TILES: f32 = 10.0;
pub const STUDENT_SEPARATION_DISTANCE_TILES: f32 = 2.0;
pub const STUDENT_SEPARATION_STRENGTH: f32 = 0.5;
pub const LOST_CONTACT_DISTANCE_TILES: f32 = 2.0;
pub const SEARCH_RADIUS_TILES: f32 = 5.0;
pub const SEARCH_ARRIVAL_TILES: f32 = 2.0;
pub const SEARCH_POINT_ATTEMPTS: u32 = 8;
pub const BROADCAST_COOLDOWN_TICKS: u32 = 120;
pub const INFORMED_WANDER_PERIOD_TICKS: u64 = 120;
pub const INFORMED_WANDER_RADIUS_TILES: f32 = 3.0;
pub const IDLE_WANDER_PERIOD_TICKS: u64 = 180;
pub const IDLE_WANDER_RADIUS_TILES: f32 = 3.0;
pub const STUDENT_DAMAGE: f32 = 20.0;
pub const DAMAGE_COOLDOWN_TICKS: u64 = 60;

pub const REPELLENT_RADIUS_TILES: f32 = 6.0;
pub const REPELLENT_DURATION_TICKS: u64 = 5 * TICKS_PER_SECOND;
pub const FLEE_SPEED_MULTIPLIER: f32 = 1.5;
pub const TRACKER_DURATION_TICKS: u64 = 10 * TICKS_PER_SECOND;

pub const HEALTH_REGEN_PER_SECOND: f32 = 0.5;
pub const STARTING_EGO: f32 = 50.0;
pub const EGO_DECAY_PER_SECOND: f32 = 0.25;
pub const AURA_IDLE_TICKS: u32 = 3 * TICKS_PER_SECOND as u32;
pub const AURA_EGO_PER_SECOND: f32 = 2.0;

pub const COIN_VALUE: f32 = 10.0;
pub const COIN_RESPAWN_TICKS: u64 = 10 * TICKS_PER_SECOND;

pub const NPC_SPEED: f32 = 0.8;
pub const NPC_WANDER_PERIOD_TICKS: u64 = 240;
pub const NPC_SAYING_PERIOD_TICKS: u64 = 5 * TICKS_PER_SECOND;
pub const NPC_INTERACT_RANGE_TILES: f32 = 2.0;

pub const DEFAULT_STUDENT_COUNT: usize = 5;
pub const DEFAULT_COIN_COUNT: usize = 30;

/// World-unit length of `count` tiles.
pub fn tiles(count: f32) -> f32 {
    count * TILE_SIZE
}

pub(crate) fn per_tick(per_second: f32) -> f32 {
    per_second / TICKS_PER_SECOND as f32
}

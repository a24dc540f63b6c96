//! One fixed simulation tick: player, vitals, students, staff, coins, contact.

use super::*;
use crate::motion::step_by;
use crate::pursuit::{PursuitContext, step_students, student_speed};
use crate::spatial::{distance, tile_center};
use crate::tuning::*;

impl Game {
    pub(super) fn run_tick(&mut self, input: PlayerInput) {
        let now = self.tick;
        self.expire_effects(now);
        self.move_player(input);
        self.update_vitals();

        let player = &self.state.player;
        let aura = player.aura_farming;
        let ctx = PursuitContext {
            grid: &self.state.map.grid,
            player: player.pos,
            tick: now,
            reveal: aura,
            repellent_active: self.state.effects.repellent_active(now),
            speed: if aura { student_speed(now) * 2.0 } else { student_speed(now) },
        };
        step_students(
            &mut self.state.students,
            &mut self.state.groups,
            &ctx,
            &mut self.rng,
            &mut self.log,
        );

        self.step_npcs(now);
        self.update_coins(now);
        self.resolve_contact(now);
        if self.state.player.ego <= 0.0 {
            self.finish(GameOverReason::EgoCollapsed);
        }

        self.tick += 1;
    }

    fn expire_effects(&mut self, now: u64) {
        let effects = &mut self.state.effects;
        if !effects.repellent_active(now) {
            effects.repellent_until = None;
        }
        if !effects.tracker_active(now) {
            effects.tracker_until = None;
        }
    }

    pub fn player_speed(&self) -> f32 {
        let player = &self.state.player;
        let boost = 1.0 + SPEED_BOOST_STEP * player.speed_boosts as f32;
        MOVE_SPEED * player.character.profile().speed_multiplier * boost
    }

    fn move_player(&mut self, input: PlayerInput) {
        let speed = self.player_speed();
        let (dx, dy) = input.axis();
        let player = &mut self.state.player;

        if input.is_idle() {
            player.is_moving = false;
            player.idle_ticks = player.idle_ticks.saturating_add(1);
            if !player.aura_farming && player.idle_ticks >= AURA_IDLE_TICKS {
                player.aura_farming = true;
                self.log.push(LogEvent::AuraFarmingStarted);
            }
            return;
        }

        player.idle_ticks = 0;
        if player.aura_farming {
            player.aura_farming = false;
            self.log.push(LogEvent::AuraFarmingEnded);
        }
        let result = step_by(&self.state.map.grid, player.pos, dx * speed, dy * speed);
        player.pos = result.position;
        player.direction = result.direction;
        player.is_moving = result.is_moving;
    }

    fn update_vitals(&mut self) {
        let player = &mut self.state.player;
        player.health = (player.health + per_tick(HEALTH_REGEN_PER_SECOND)).min(player.max_health);
        player.ego -= per_tick(EGO_DECAY_PER_SECOND);
        if player.aura_farming {
            player.ego += per_tick(AURA_EGO_PER_SECOND);
        }
        player.ego = player.ego.max(0.0);
    }

    fn update_coins(&mut self, now: u64) {
        let player_pos = self.state.player.pos;
        let coin_ids: Vec<CoinId> = self.state.coins.keys().collect();
        for id in coin_ids {
            let Some(coin) = self.state.coins.get(id) else {
                continue;
            };

            if coin.collected {
                if coin.respawn_at.is_some_and(|at| now >= at) {
                    let pos = tile_center(self.state.map.find_spawn_point(&mut self.rng));
                    if let Some(coin) = self.state.coins.get_mut(id) {
                        coin.pos = pos;
                        coin.collected = false;
                        coin.respawn_at = None;
                    }
                    self.log.push(LogEvent::CoinRespawned { coin: id });
                }
                continue;
            }

            if distance(player_pos, coin.pos) < TILE_SIZE {
                if let Some(coin) = self.state.coins.get_mut(id) {
                    coin.collected = true;
                    coin.respawn_at = Some(now + COIN_RESPAWN_TICKS);
                }
                let player = &mut self.state.player;
                player.ego += COIN_VALUE;
                player.coins_collected += 1;
                self.log.push(LogEvent::CoinCollected { coin: id, ego_awarded: COIN_VALUE });
            }
        }
    }

    /// Damage from the first student in contact, gated by one global cooldown.
    fn resolve_contact(&mut self, now: u64) {
        let cooled_down = self
            .state
            .effects
            .last_damage_tick
            .is_none_or(|last| now.saturating_sub(last) >= DAMAGE_COOLDOWN_TICKS);
        if !cooled_down {
            return;
        }

        let player_pos = self.state.player.pos;
        let in_contact = self
            .state
            .students
            .values()
            .any(|student| distance(student.pos, player_pos) < TILE_SIZE);
        if !in_contact {
            return;
        }

        let player = &mut self.state.player;
        player.health = (player.health - STUDENT_DAMAGE).max(0.0);
        let health_left = player.health;
        self.state.effects.last_damage_tick = Some(now);
        self.log.push(LogEvent::PlayerDamaged { amount: STUDENT_DAMAGE, health_left });
        if health_left <= 0.0 {
            self.finish(GameOverReason::Overwhelmed);
        }
    }
}

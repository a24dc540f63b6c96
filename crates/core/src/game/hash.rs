//! Stable snapshot hashing for determinism checks.
//! Slot maps are walked in key order, which is insertion order for a fresh session.

use std::hash::Hasher;

use super::*;
use xxhash_rust::xxh3::Xxh3;

fn write_pos(hasher: &mut Xxh3, pos: Position) {
    hasher.write_u32(pos.x.to_bits());
    hasher.write_u32(pos.y.to_bits());
}

fn write_opt_pos(hasher: &mut Xxh3, pos: Option<Position>) {
    match pos {
        Some(pos) => {
            hasher.write_u8(1);
            write_pos(hasher, pos);
        }
        None => hasher.write_u8(0),
    }
}

fn write_opt_tick(hasher: &mut Xxh3, tick: Option<u64>) {
    hasher.write_u64(tick.unwrap_or(u64::MAX));
}

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.tick);
        hasher.write_u64(self.state.groups.issued());

        let player = &self.state.player;
        write_pos(&mut hasher, player.pos);
        hasher.write_u32(player.health.to_bits());
        hasher.write_u32(player.ego.to_bits());
        hasher.write_u32(player.idle_ticks);
        hasher.write_u8(u8::from(player.aura_farming));
        hasher.write_u32(player.speed_boosts);
        hasher.write_u32(player.assignments);
        hasher.write_u32(player.trackers);
        hasher.write_u32(player.coins_collected);

        for student in self.state.students.values() {
            write_pos(&mut hasher, student.pos);
            hasher.write_u8(student.state as u8);
            write_opt_pos(&mut hasher, student.target);
            write_opt_pos(&mut hasher, student.last_seen_player);
            write_opt_pos(&mut hasher, student.search_target);
            hasher.write_u64(student.group_id.map_or(0, |group| group.0));
            hasher.write_u32(student.communication_cooldown);
        }
        for coin in self.state.coins.values() {
            write_pos(&mut hasher, coin.pos);
            hasher.write_u8(u8::from(coin.collected));
            write_opt_tick(&mut hasher, coin.respawn_at);
        }
        for npc in self.state.npcs.values() {
            write_pos(&mut hasher, npc.pos);
            hasher.write_usize(npc.saying_index);
        }

        let effects = &self.state.effects;
        write_opt_tick(&mut hasher, effects.repellent_until);
        write_opt_tick(&mut hasher, effects.tracker_until);
        write_opt_tick(&mut hasher, effects.last_damage_tick);
        hasher.write_u8(match self.outcome {
            None => 0,
            Some(GameOverReason::Overwhelmed) => 1,
            Some(GameOverReason::EgoCollapsed) => 2,
        });
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn hash_tracks_simulation_state() {
        let mut game = corridor_game();
        let before = game.snapshot_hash();
        assert_eq!(before, corridor_game().snapshot_hash());
        game.step(PlayerInput::holding(&[Direction::Right]));
        assert_ne!(game.snapshot_hash(), before);
    }
}

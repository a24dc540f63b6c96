//! Staff members idling inside their rooms.

use super::*;
use crate::content;
use crate::motion::move_towards;
use crate::spatial::{distance, tile_center};
use crate::state::Npc;
use crate::tuning::{
    NPC_INTERACT_RANGE_TILES, NPC_SAYING_PERIOD_TICKS, NPC_SPEED, NPC_WANDER_PERIOD_TICKS, tiles,
};

impl Npc {
    pub fn saying(&self) -> &'static str {
        content::saying(self.saying_index)
    }
}

impl Game {
    pub(super) fn step_npcs(&mut self, now: u64) {
        let rotate = now > 0 && now % NPC_SAYING_PERIOD_TICKS == 0;
        let wander = now % NPC_WANDER_PERIOD_TICKS == 0;

        for npc in self.state.npcs.values_mut() {
            if rotate {
                npc.saying_index = (npc.saying_index + 1) % content::STAFF_SAYINGS.len();
            }
            let Some(room) = self.state.map.staff_rooms.get(npc.room) else {
                continue;
            };
            if wander {
                let interior: Vec<TilePos> = room.interior_tiles().collect();
                if !interior.is_empty() {
                    npc.target = Some(tile_center(interior[self.rng.index(interior.len())]));
                }
            }
            let Some(target) = npc.target else {
                npc.is_moving = false;
                continue;
            };
            let result = move_towards(&self.state.map.grid, npc.pos, target, NPC_SPEED, None);
            npc.pos = result.position;
            npc.direction = result.direction;
            npc.is_moving = result.is_moving;
            if !result.is_moving {
                npc.target = None;
            }
        }
    }

    /// Closest staff member within talking range of the player, if any.
    pub fn nearby_staff(&self) -> Option<(NpcId, &Npc)> {
        let player = self.state.player.pos;
        let range = tiles(NPC_INTERACT_RANGE_TILES);
        self.state
            .npcs
            .iter()
            .map(|(id, npc)| (id, npc, distance(npc.pos, player)))
            .filter(|(_, _, gap)| *gap <= range)
            .min_by(|a, b| a.2.total_cmp(&b.2))
            .map(|(id, npc, _)| (id, npc))
    }

    pub fn is_near_staff(&self) -> bool {
        self.nearby_staff().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn staff_stay_inside_their_room() {
        let mut game = lounge_game();
        let room = game.state.map.staff_rooms[0];
        for _ in 0..2_000 {
            game.step(PlayerInput::holding(&[Direction::Down]));
            if game.is_over() {
                break;
            }
            for npc in game.state.npcs.values() {
                let tile = crate::spatial::world_to_tile(npc.pos);
                assert!(room.interior_contains(tile), "staff wandered to {tile:?}");
            }
        }
    }

    #[test]
    fn sayings_rotate_on_a_fixed_period() {
        let mut game = lounge_game();
        let first = game.state.npcs.values().next().map(Npc::saying);
        game.advance(PlayerInput::holding(&[Direction::Left]), NPC_SAYING_PERIOD_TICKS as u32);
        let same = game.state.npcs.values().next().map(Npc::saying);
        assert_eq!(first, same);
        game.step(PlayerInput::holding(&[Direction::Right]));
        let next = game.state.npcs.values().next().map(Npc::saying);
        assert_ne!(first, next);
        assert_eq!(next, Some(content::saying(1)));
    }

    #[test]
    fn player_next_to_staff_is_near_staff() {
        let mut game = lounge_game();
        assert!(game.is_near_staff());
        game.state.player.pos = tile_center(TilePos { y: 6, x: 8 });
        assert!(!game.is_near_staff());
    }
}

//! Shared fixtures for the `game` submodule test suites.

use super::*;
use crate::mapgen::{StaffRoom, TileGrid};
use crate::spatial::tile_center;
use crate::state::{Coin, Npc, Player, Student};

fn game_on(grid: TileGrid, staff_rooms: Vec<StaffRoom>, player: TilePos) -> Game {
    let map = GeneratedMap { grid, staff_rooms };
    let player = Player::new(tile_center(player), CharacterId::Lecturer);
    Game {
        seed: 0,
        tick: 0,
        rng: SimRng::seed_from_u64(0),
        config: SessionConfig::with_seed(0),
        state: GameState::new(map, player),
        log: Vec::new(),
        outcome: None,
    }
}

/// One-tile-high corridor, x 1..=28 on row 1. Player at column 5, nobody else.
pub(super) fn corridor_game() -> Game {
    let grid = TileGrid::from_rows(&[
        "##############################",
        "#............................#",
        "##############################",
    ]);
    game_on(grid, Vec::new(), TilePos { y: 1, x: 5 })
}

/// Ring corridor around a staff room with a door on its bottom wall.
/// The player starts inside the room next to the staff member.
pub(super) fn lounge_game() -> Game {
    let grid = TileGrid::from_rows(&[
        "##########",
        "#........#",
        "#.######.#",
        "#.#ssss#.#",
        "#.#ssss#.#",
        "#.##.###.#",
        "#........#",
        "##########",
    ]);
    let room = StaffRoom {
        min_x: 2,
        max_x: 7,
        min_y: 2,
        max_y: 5,
        centroid: Position::new(160.0, 128.0),
        door: TilePos { y: 5, x: 4 },
    };
    let mut game = game_on(grid, vec![room], TilePos { y: 4, x: 3 });
    game.state.npcs.insert(Npc {
        room: 0,
        pos: room.centroid,
        direction: Direction::Down,
        is_moving: false,
        target: None,
        saying_index: 0,
    });
    game
}

pub(super) fn add_student(game: &mut Game, pos: Position) -> StudentId {
    game.state.students.insert(Student::new(pos, crate::content::complaint(0)))
}

pub(super) fn add_coin(game: &mut Game, pos: Position) -> CoinId {
    game.state.coins.insert(Coin { pos, collected: false, respawn_at: None })
}

//! Keyboard input collection for one rendered frame.

use faculty_app::app_loop::{SHOP_KEYS, TOOL_KEYS};
use faculty_core::{Direction, PlayerInput};
use macroquad::prelude::{KeyCode, get_frame_time, is_key_down, is_key_pressed};

const MENU_KEYS: [KeyCode; 4] = [KeyCode::Enter, KeyCode::Escape, KeyCode::Left, KeyCode::Right];

/// Arrow keys and WASD both steer.
const MOVE_KEYS: [(KeyCode, KeyCode, Direction); 4] = [
    (KeyCode::Up, KeyCode::W, Direction::Up),
    (KeyCode::Down, KeyCode::S, Direction::Down),
    (KeyCode::Left, KeyCode::A, Direction::Left),
    (KeyCode::Right, KeyCode::D, Direction::Right),
];

#[derive(Default)]
pub struct FrameInput {
    pub keys_pressed: Vec<KeyCode>,
    pub held: PlayerInput,
    pub dt: f32,
}

pub fn held_input(is_down: impl Fn(KeyCode) -> bool) -> PlayerInput {
    let held: Vec<Direction> = MOVE_KEYS
        .iter()
        .filter(|(arrow, letter, _)| is_down(*arrow) || is_down(*letter))
        .map(|(_, _, direction)| *direction)
        .collect();
    PlayerInput::holding(&held)
}

pub fn capture_frame_input() -> FrameInput {
    let mut keys_pressed = Vec::new();
    let candidates = MENU_KEYS
        .into_iter()
        .chain(SHOP_KEYS.map(|(key, _)| key))
        .chain(TOOL_KEYS.map(|(key, _)| key));
    for key in candidates {
        if is_key_pressed(key) {
            keys_pressed.push(key);
        }
    }

    FrameInput { keys_pressed, held: held_input(is_key_down), dt: get_frame_time() }
}

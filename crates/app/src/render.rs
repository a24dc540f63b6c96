//! Drawing for the play field, the HUD and the menu screens.

use std::ops::Range;

use faculty_app::app_loop::{AppState, Screen};
use faculty_app::hud_text::{
    game_over_lines, hud_lines, recent_event_lines, shop_lines, start_screen_lines,
    student_state_label,
};
use faculty_app::stats_file::MetaStats;
use faculty_core::spatial::has_line_of_sight;
use faculty_core::tuning::TILE_SIZE;
use faculty_core::{Game, Position, StudentState, TileGrid, TileKind, TilePos};
use macroquad::prelude::*;

const FLOOR_COLOR: Color = Color { r: 0.16, g: 0.16, b: 0.18, a: 1.0 };
const WALL_COLOR: Color = Color { r: 0.36, g: 0.33, b: 0.30, a: 1.0 };
const STAFF_ROOM_COLOR: Color = Color { r: 0.20, g: 0.27, b: 0.22, a: 1.0 };
const PANEL_COLOR: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 0.6 };
const PANEL_PAD: f32 = 12.0;
const LINE_HEIGHT: f32 = 20.0;
const FONT_SIZE: f32 = 20.0;
const EVENT_LINES: usize = 6;

pub fn draw_frame(game: &Game, app: &AppState, stats: &MetaStats) {
    clear_background(BLACK);
    match app.screen {
        Screen::Start => {
            draw_centered_lines(&start_screen_lines(app.character, game.seed(), stats), WHITE);
        }
        Screen::Playing => {
            draw_world(game);
            draw_hud(game, app);
        }
        Screen::GameOver(summary) => {
            draw_world(game);
            draw_centered_lines(&game_over_lines(game, &summary, stats), YELLOW);
        }
    }
}

/// World-to-screen offset that keeps the player centred.
pub fn camera_offset(player: Position, screen_w: f32, screen_h: f32) -> (f32, f32) {
    (screen_w / 2.0 - player.x, screen_h / 2.0 - player.y)
}

/// Tile indices intersecting the screen, clamped to the grid.
pub fn visible_tiles(
    offset: (f32, f32),
    screen_w: f32,
    screen_h: f32,
    grid: &TileGrid,
) -> (Range<i32>, Range<i32>) {
    let span = |offset: f32, extent: f32, len: usize| {
        let first = (-offset / TILE_SIZE).floor().max(0.0) as i32;
        let last = ((extent - offset) / TILE_SIZE).ceil().clamp(0.0, len as f32) as i32;
        first..last.max(first)
    };
    (span(offset.0, screen_w, grid.width()), span(offset.1, screen_h, grid.height()))
}

pub fn tile_color(tile: TileKind) -> Color {
    match tile {
        TileKind::Floor => FLOOR_COLOR,
        TileKind::Wall => WALL_COLOR,
        TileKind::StaffRoom => STAFF_ROOM_COLOR,
    }
}

pub fn student_color(state: StudentState) -> Color {
    match state {
        StudentState::Idle => LIGHTGRAY,
        StudentState::Chasing => RED,
        StudentState::Informed => ORANGE,
        StudentState::Searching => YELLOW,
        StudentState::Fleeing => SKYBLUE,
    }
}

fn draw_world(game: &Game) {
    let state = game.state();
    let grid = &state.map.grid;
    let player = &state.player;
    let (screen_w, screen_h) = (screen_width(), screen_height());
    let offset = camera_offset(player.pos, screen_w, screen_h);
    let to_screen = |pos: Position| (pos.x + offset.0, pos.y + offset.1);

    let (xs, ys) = visible_tiles(offset, screen_w, screen_h, grid);
    for y in ys {
        for x in xs.clone() {
            let tile = grid.tile_at(TilePos { y, x });
            draw_rectangle(
                x as f32 * TILE_SIZE + offset.0,
                y as f32 * TILE_SIZE + offset.1,
                TILE_SIZE,
                TILE_SIZE,
                tile_color(tile),
            );
        }
    }

    for coin in state.coins.values().filter(|coin| !coin.collected) {
        let (x, y) = to_screen(coin.pos);
        draw_circle(x, y, TILE_SIZE * 0.2, GOLD);
    }

    for npc in state.npcs.values() {
        let (x, y) = to_screen(npc.pos);
        draw_circle(x, y, TILE_SIZE * 0.4, GREEN);
        if game.is_near_staff() {
            draw_text(npc.saying(), x - TILE_SIZE, y - TILE_SIZE * 0.6, 16.0, WHITE);
        }
    }

    let tracker = state.effects.tracker_active(game.current_tick());
    for student in state.students.values() {
        if !tracker && !has_line_of_sight(grid, player.pos, student.pos) {
            continue;
        }
        let (x, y) = to_screen(student.pos);
        draw_circle(x, y, TILE_SIZE * 0.4, student_color(student.state));
        let label = match student.state {
            _ if tracker => Some(student_state_label(student.state)),
            StudentState::Chasing => Some(student.complaint),
            _ => None,
        };
        if let Some(label) = label {
            draw_text(label, x - TILE_SIZE, y - TILE_SIZE * 0.6, 14.0, WHITE);
        }
    }

    let (x, y) = to_screen(player.pos);
    let player_color = if player.aura_farming { VIOLET } else { BLUE };
    draw_circle(x, y, TILE_SIZE * 0.45, player_color);
}

fn draw_hud(game: &Game, app: &AppState) {
    let mut lines = hud_lines(game);
    if game.is_near_staff() {
        lines.extend(shop_lines(game.state().player.ego));
    }
    if let Some(notice) = &app.notice {
        lines.push(notice.clone());
    }
    draw_panel(&lines, PANEL_PAD, PANEL_PAD, WHITE);

    let events = recent_event_lines(game.log(), EVENT_LINES);
    let height = events.len() as f32 * LINE_HEIGHT + PANEL_PAD;
    draw_panel(&events, PANEL_PAD, screen_height() - height - PANEL_PAD, LIGHTGRAY);
}

fn draw_panel(lines: &[String], x: f32, y: f32, color: Color) {
    if lines.is_empty() {
        return;
    }
    let width = lines
        .iter()
        .map(|line| measure_text(line, None, FONT_SIZE as u16, 1.0).width)
        .fold(0.0, f32::max);
    let height = lines.len() as f32 * LINE_HEIGHT + PANEL_PAD;
    draw_rectangle(x, y, width + PANEL_PAD * 2.0, height, PANEL_COLOR);
    for (index, line) in lines.iter().enumerate() {
        let baseline = y + PANEL_PAD + (index as f32 + 0.5) * LINE_HEIGHT;
        draw_text(line, x + PANEL_PAD, baseline, FONT_SIZE, color);
    }
}

fn draw_centered_lines(lines: &[String], color: Color) {
    let top = screen_height() / 2.0 - lines.len() as f32 * LINE_HEIGHT / 2.0;
    for (index, line) in lines.iter().enumerate() {
        let width = measure_text(line, None, FONT_SIZE as u16, 1.0).width;
        let x = screen_width() / 2.0 - width / 2.0;
        draw_text(line, x, top + index as f32 * LINE_HEIGHT, FONT_SIZE, color);
    }
}

#[cfg(test)]
mod tests;

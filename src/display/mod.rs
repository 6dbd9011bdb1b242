//! Rendering layer — all terminal I/O lives here.
//!
//! `paint` draws a frame into a `Canvas` without touching the terminal;
//! `render` paints and then writes the canvas out.  No game logic is
//! performed here.

pub mod canvas;

use std::io::Write;

use crate::consts::PLAYER_MAX_HEALTH;
use crate::entities::{GameState, GameStatus, Rgb};
use crate::scene;

pub use canvas::Canvas;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BACKGROUND: Rgb = Rgb::BLACK;
const C_HUD: Rgb = Rgb::WHITE;
const C_HINT: Rgb = Rgb::GRAY;
const C_GAME_OVER: Rgb = Rgb::RED;
const C_RESTART: Rgb = Rgb::WHITE;
/// Opacity of the black veil over a finished game.
const GAME_OVER_VEIL: u8 = 200;

const CONTROLS_HINT: &str =
    "WASD: move  Q/E: up/down  Mouse/arrows: look  Click/F: shoot  ESC: quit";

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, canvas: &mut Canvas, state: &GameState) -> std::io::Result<()> {
    paint(canvas, state);
    canvas.present(out)
}

/// Draw the world, HUD and overlays into `canvas`.
pub fn paint(canvas: &mut Canvas, state: &GameState) {
    canvas.clear(C_BACKGROUND);
    for command in scene::compose(state) {
        canvas.draw(&command);
    }

    draw_hud(canvas, state);
    draw_controls_hint(canvas);

    if state.status == GameStatus::GameOver {
        draw_game_over(canvas);
    }
}

// ── HUD (top-left) ────────────────────────────────────────────────────────────

fn draw_hud(canvas: &mut Canvas, state: &GameState) {
    let lines = [
        format!("Health: {}/{}", state.player.health, PLAYER_MAX_HEALTH),
        format!("Score: {}", state.player.score),
        format!("Level: {}", state.player.level),
        format!("Wave: {}", state.wave),
        format!("Enemies: {}", state.enemies.len()),
    ];
    for (row, line) in lines.iter().enumerate() {
        canvas.text(1, row as u16, line, C_HUD);
    }
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint(canvas: &mut Canvas) {
    let row = canvas.rows().saturating_sub(1);
    canvas.text_centered(row, CONTROLS_HINT, C_HINT);
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over(canvas: &mut Canvas) {
    canvas.darken(GAME_OVER_VEIL);
    let mid = canvas.rows() / 2;
    canvas.text_centered(mid.saturating_sub(2), "GAME OVER!", C_GAME_OVER);
    canvas.text_centered(mid + 1, "Press SPACE to restart", C_RESTART);
}

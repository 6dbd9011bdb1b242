//! First-person cube shooter for the terminal.
//!
//! - `entities`: pure game data
//! - `camera`: camera basis and perspective projection
//! - `compute`: simulation (movement, enemy AI, combat, waves)
//! - `scene`: game state → draw commands
//! - `display`: rasterisation and terminal output
//! - `config` / `error`: application plumbing

pub mod camera;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod scene;

pub use error::{Error, Result};

/// Game tuning constants.
pub mod consts {
    /// Virtual screen size; all projection happens in these pixels.
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Focal constant of the perspective divide (`scale = FOCAL / z`).
    pub const FOCAL: f32 = 400.0;
    /// Points at or closer than this depth are not drawn.
    pub const NEAR_PLANE: f32 = 0.1;

    pub const TICK_RATE: u32 = 60;
    /// Upper bound on a single frame's dt, in seconds.
    pub const MAX_DT: f32 = 0.1;

    pub const PLAYER_MAX_HEALTH: u32 = 20;
    /// Units per second.
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_MIN_Y: f32 = -10.0;
    pub const PLAYER_MAX_Y: f32 = 10.0;
    /// Radians per virtual pixel of mouse movement.
    pub const MOUSE_SENSITIVITY: f32 = 0.002;
    /// Radius of the player's hitbox added to an enemy ball's radius.
    pub const PLAYER_HIT_RADIUS: f32 = 2.0;

    /// Enemies chase only while the player is strictly inside this band.
    pub const CHASE_MIN_DISTANCE: f32 = 30.0;
    pub const CHASE_MAX_DISTANCE: f32 = 100.0;
    pub const WOBBLE_AMPLITUDE: f32 = 0.3;

    /// Balls farther than this from the player are discarded.
    pub const BALL_CULL_DISTANCE: f32 = 500.0;
    /// Extra screen-space slack around a ball for a deflecting click.
    pub const DEFLECT_SLACK: f32 = 10.0;

    pub const BASE_ENEMY_COUNT: u32 = 3;
    pub const SPAWN_FORWARD_OFFSET: f32 = 30.0;
}

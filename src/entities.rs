//! All game entity types — pure data, no logic.

use glam::Vec3;

// ── Colour ────────────────────────────────────────────────────────────────────

/// 24-bit colour, the only colour type the simulation and scene know about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const GRAY: Rgb = Rgb(128, 128, 128);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const LIGHT_GREEN: Rgb = Rgb(100, 255, 100);

    /// Every channel halved; used for the non-front faces of a cube.
    pub fn darker(self) -> Rgb {
        Rgb(self.0 / 2, self.1 / 2, self.2 / 2)
    }

    /// Every channel raised by 50, saturating; the highlight of a ball.
    pub fn lighter(self) -> Rgb {
        Rgb(
            self.0.saturating_add(50),
            self.1.saturating_add(50),
            self.2.saturating_add(50),
        )
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BallKind {
    /// Fired by the player along the view direction.
    Player,
    /// Fired by an enemy at the player.
    Enemy,
    /// An enemy ball deflected by the player toward the nearest enemy.
    Bounced,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ball {
    pub kind: BallKind,
    pub position: Vec3,
    /// Units per second.
    pub velocity: Vec3,
    pub radius: f32,
    pub color: Rgb,
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub position: Vec3,
    /// Horizontal look angle in radians.
    pub yaw: f32,
    /// Vertical look angle in radians, kept within ±π/2.
    pub pitch: f32,
    pub health: u32,
    pub score: u32,
    pub level: u32,
}

/// A wobbling cube. Every stat is fixed by `level` at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub position: Vec3,
    pub level: u32,
    /// Cube edge length.
    pub size: f32,
    pub health: i32,
    pub max_health: i32,
    /// Chase speed in units per second.
    pub speed: f32,
    /// Ticks until the next shot; fires when it reaches zero or below.
    pub shoot_timer: i32,
    pub shoot_delay: i32,
    pub color: Rgb,
    /// Bob phase in radians.
    pub wobble: f32,
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub player_balls: Vec<Ball>,
    pub enemy_balls: Vec<Ball>,
    pub bounced_balls: Vec<Ball>,
    pub wave: u32,
    pub status: GameStatus,
    /// Simulation ticks since the game (re)started.
    pub frame: u64,
}

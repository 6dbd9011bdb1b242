//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current state
//! (and, where needed, an RNG handle) and returns a brand-new value.  Side
//! effects are limited to the injected RNG and log output.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec3;
use log::{debug, info};
use rand::Rng;

use crate::camera::{screen_center, Camera};
use crate::consts::*;
use crate::entities::{Ball, BallKind, Enemy, GameState, GameStatus, Player, Rgb};

// ── Difficulty tables ────────────────────────────────────────────────────────

fn enemy_size(level: u32) -> f32 {
    8.0 + level as f32
}

fn enemy_health(level: u32) -> i32 {
    3 + (level as i32 - 1) * 3
}

fn enemy_speed(level: u32) -> f32 {
    1.0 + level as f32 * 0.3
}

fn enemy_shoot_delay(level: u32) -> i32 {
    (300 - level as i32 * 25).max(50)
}

/// Enemies shift from green toward red as the level climbs.
pub fn enemy_color(level: u32) -> Rgb {
    let red = level.saturating_mul(40).saturating_add(50).min(255);
    let green = 200u32.saturating_sub(level.saturating_mul(30));
    Rgb(red as u8, green as u8, 50)
}

fn ball_speed(kind: BallKind) -> f32 {
    match kind {
        BallKind::Player => 15.0,
        BallKind::Enemy => 8.0,
        BallKind::Bounced => 12.0,
    }
}

fn ball_radius(kind: BallKind) -> f32 {
    match kind {
        BallKind::Player | BallKind::Enemy => 3.0,
        BallKind::Bounced => 4.0,
    }
}

fn ball_color(kind: BallKind) -> Rgb {
    match kind {
        BallKind::Player => Rgb::RED,
        BallKind::Enemy => Rgb::GREEN,
        BallKind::Bounced => Rgb::LIGHT_GREEN,
    }
}

/// Damage a ball deals to whatever it hits.
pub fn ball_damage(kind: BallKind) -> i32 {
    match kind {
        BallKind::Player | BallKind::Enemy => 1,
        BallKind::Bounced => 2,
    }
}

/// Score awarded when a ball of `kind` finishes off an enemy.
pub fn kill_score(kind: BallKind, level: u32) -> u32 {
    match kind {
        BallKind::Bounced => 15 * level,
        BallKind::Player | BallKind::Enemy => 10 * level,
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

pub fn new_player() -> Player {
    Player {
        position: Vec3::ZERO,
        yaw: 0.0,
        pitch: 0.0,
        health: PLAYER_MAX_HEALTH,
        score: 0,
        level: 1,
    }
}

pub fn new_enemy(position: Vec3, level: u32, rng: &mut impl Rng) -> Enemy {
    let health = enemy_health(level);
    Enemy {
        position,
        level,
        size: enemy_size(level),
        health,
        max_health: health,
        speed: enemy_speed(level),
        shoot_timer: rng.gen_range(100..=300) - level as i32 * 20,
        shoot_delay: enemy_shoot_delay(level),
        color: enemy_color(level),
        wobble: rng.gen::<f32>() * TAU,
    }
}

/// A ball of `kind` leaving `position` along `direction` (any length).
pub fn new_ball(kind: BallKind, position: Vec3, direction: Vec3) -> Ball {
    Ball {
        kind,
        position,
        velocity: direction.normalize_or_zero() * ball_speed(kind),
        radius: ball_radius(kind),
        color: ball_color(kind),
    }
}

/// Lay out `BASE_ENEMY_COUNT + wave` enemies on a ring ahead of the origin.
pub fn spawn_wave(wave: u32, level: u32, rng: &mut impl Rng) -> Vec<Enemy> {
    let count = BASE_ENEMY_COUNT + wave;
    let mut enemies = Vec::with_capacity(count as usize);
    for i in 0..count {
        let angle = i as f32 / count as f32 * TAU;
        let radius = 20.0 + rng.gen_range(10..=30) as f32;
        let x = angle.cos() * radius;
        let z = angle.sin() * radius + SPAWN_FORWARD_OFFSET;
        let y = rng.gen_range(-5..=5) as f32;
        enemies.push(new_enemy(Vec3::new(x, y, z), level, rng));
    }
    info!("wave {wave}: spawned {count} enemies at level {level}");
    enemies
}

/// Build the state of a fresh game: wave 1, full health, first ring spawned.
pub fn init_state(rng: &mut impl Rng) -> GameState {
    let player = new_player();
    let enemies = spawn_wave(1, player.level, rng);
    GameState {
        player,
        enemies,
        player_balls: Vec::new(),
        enemy_balls: Vec::new(),
        bounced_balls: Vec::new(),
        wave: 1,
        status: GameStatus::Playing,
        frame: 0,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Movement keys held during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Ground-plane walking along the view direction plus direct vertical motion.
pub fn move_player(player: &Player, input: &TickInput, dt: f32) -> Player {
    let step = PLAYER_SPEED * dt;
    let camera = Camera::from_player(player);
    let forward = Vec3::new(camera.forward.x, 0.0, camera.forward.z).normalize_or_zero();
    let right = camera.right;

    let mut position = player.position;
    if input.forward {
        position += forward * step;
    }
    if input.back {
        position -= forward * step;
    }
    if input.left {
        position -= right * step;
    }
    if input.right {
        position += right * step;
    }
    if input.up {
        position.y += step;
    }
    if input.down {
        position.y -= step;
    }
    position.y = position.y.clamp(PLAYER_MIN_Y, PLAYER_MAX_Y);

    Player {
        position,
        ..player.clone()
    }
}

/// Turn by explicit angles; pitch is clamped to straight up/down.
pub fn turn_player(player: &Player, d_yaw: f32, d_pitch: f32) -> Player {
    Player {
        yaw: player.yaw + d_yaw,
        pitch: (player.pitch + d_pitch).clamp(-FRAC_PI_2, FRAC_PI_2),
        ..player.clone()
    }
}

/// Mouse look: `dx`/`dy` are virtual-pixel deltas.
pub fn rotate_player(player: &Player, dx: f32, dy: f32, sensitivity: f32) -> Player {
    turn_player(player, dx * sensitivity, dy * sensitivity)
}

/// Launch a player ball from the camera along the view direction.
pub fn player_fire(state: &GameState) -> GameState {
    let camera = Camera::from_player(&state.player);
    let mut player_balls = state.player_balls.clone();
    player_balls.push(new_ball(
        BallKind::Player,
        state.player.position,
        camera.forward,
    ));
    GameState {
        player_balls,
        ..state.clone()
    }
}

/// The enemy closest to `point`; the first one wins a tie.
pub fn nearest_enemy(enemies: &[Enemy], point: Vec3) -> Option<&Enemy> {
    enemies
        .iter()
        .min_by(|a, b| a.position.distance(point).total_cmp(&b.position.distance(point)))
}

/// Knock back every enemy ball drawn under the crosshair.
///
/// A ball counts when its projected centre lies closer to the screen centre
/// than its drawn radius plus `DEFLECT_SLACK`.  Each one is replaced by a
/// bounced ball headed for the nearest enemy; with no enemies left the ball
/// is simply destroyed.
pub fn deflect(state: &GameState) -> GameState {
    let camera = Camera::from_player(&state.player);
    let (cx, cy) = screen_center();

    let mut enemy_balls = Vec::with_capacity(state.enemy_balls.len());
    let mut bounced_balls = state.bounced_balls.clone();

    for ball in &state.enemy_balls {
        let Some(p) = camera.project(ball.position) else {
            enemy_balls.push(ball.clone());
            continue;
        };
        let distance = (p.x - cx).hypot(p.y - cy);
        if distance >= p.radius(ball.radius) + DEFLECT_SLACK {
            enemy_balls.push(ball.clone());
            continue;
        }
        match nearest_enemy(&state.enemies, ball.position) {
            Some(target) => {
                debug!("deflected ball at {:?} toward enemy at {:?}", ball.position, target.position);
                bounced_balls.push(new_ball(
                    BallKind::Bounced,
                    ball.position,
                    target.position - ball.position,
                ));
            }
            None => debug!("deflected ball at {:?} has no target", ball.position),
        }
    }

    GameState {
        enemy_balls,
        bounced_balls,
        ..state.clone()
    }
}

/// Primary fire: shoot and try to deflect in the same click.
pub fn primary_fire(state: &GameState) -> GameState {
    deflect(&player_fire(state))
}

// ── Per-tick updates ─────────────────────────────────────────────────────────

/// Bob, chase and count down the shot timer of one enemy.
pub fn update_enemy(enemy: &Enemy, player_pos: Vec3, dt: f32) -> Enemy {
    let mut next = enemy.clone();
    next.wobble += dt;
    next.position.y += (next.wobble * 2.0).sin() * WOBBLE_AMPLITUDE;

    let to_player = player_pos - next.position;
    let distance = to_player.length();
    if distance > CHASE_MIN_DISTANCE && distance < CHASE_MAX_DISTANCE {
        next.position += to_player.normalize_or_zero() * next.speed * dt;
    }

    next.shoot_timer -= 1;
    next
}

fn advance_ball(ball: &Ball, dt: f32) -> Ball {
    Ball {
        position: ball.position + ball.velocity * dt,
        ..ball.clone()
    }
}

fn out_of_range(ball: &Ball, player_pos: Vec3) -> bool {
    ball.position.distance(player_pos) > BALL_CULL_DISTANCE
}

/// Move the player's balls (fired or bounced) and resolve their hits.
///
/// A ball hits at most one enemy per tick, the first in container order.
fn advance_strikes(
    balls: &[Ball],
    enemies: &mut Vec<Enemy>,
    player: &mut Player,
    dt: f32,
) -> Vec<Ball> {
    let mut kept = Vec::with_capacity(balls.len());
    for ball in balls {
        let ball = advance_ball(ball, dt);
        if out_of_range(&ball, player.position) {
            continue;
        }
        let hit = enemies
            .iter()
            .position(|e| ball.position.distance(e.position) < ball.radius + e.size / 2.0);
        let Some(index) = hit else {
            kept.push(ball);
            continue;
        };
        enemies[index].health -= ball_damage(ball.kind);
        if enemies[index].health <= 0 {
            let gained = kill_score(ball.kind, player.level);
            player.score += gained;
            let dead = enemies.remove(index);
            debug!("{:?} ball destroyed enemy at {:?} (+{gained})", ball.kind, dead.position);
        }
    }
    kept
}

/// Advance the simulation by one tick.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// A finished game is frozen: the state is returned unchanged.
pub fn tick(state: &GameState, input: &TickInput, dt: f32, rng: &mut impl Rng) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }

    // ── 1. Player movement ───────────────────────────────────────────────────
    let mut player = move_player(&state.player, input, dt);
    let mut status = state.status;

    // ── 2. Enemies move and shoot ────────────────────────────────────────────
    let mut enemy_balls = state.enemy_balls.clone();
    let mut enemies: Vec<Enemy> = state
        .enemies
        .iter()
        .map(|e| update_enemy(e, player.position, dt))
        .collect();
    for enemy in &mut enemies {
        if enemy.shoot_timer <= 0 {
            enemy_balls.push(new_ball(
                BallKind::Enemy,
                enemy.position,
                player.position - enemy.position,
            ));
            enemy.shoot_timer = enemy.shoot_delay;
        }
    }

    // ── 3. Player balls ↔ enemies ────────────────────────────────────────────
    let player_balls = advance_strikes(&state.player_balls, &mut enemies, &mut player, dt);

    // ── 4. Enemy balls ↔ player ──────────────────────────────────────────────
    let mut surviving = Vec::with_capacity(enemy_balls.len());
    for ball in &enemy_balls {
        let ball = advance_ball(ball, dt);
        if out_of_range(&ball, player.position) {
            continue;
        }
        if ball.position.distance(player.position) < ball.radius + PLAYER_HIT_RADIUS {
            player.health = player.health.saturating_sub(ball_damage(ball.kind) as u32);
            debug!("player hit, health {}", player.health);
            if player.health == 0 && status == GameStatus::Playing {
                status = GameStatus::GameOver;
                info!("game over: wave {}, score {}", state.wave, player.score);
            }
        } else {
            surviving.push(ball);
        }
    }

    // ── 5. Bounced balls ↔ enemies ───────────────────────────────────────────
    let bounced_balls = advance_strikes(&state.bounced_balls, &mut enemies, &mut player, dt);

    // ── 6. Wave progression ──────────────────────────────────────────────────
    let mut wave = state.wave;
    if enemies.is_empty() {
        wave += 1;
        player.level += 1;
        enemies = spawn_wave(wave, player.level, rng);
    }

    GameState {
        player,
        enemies,
        player_balls,
        enemy_balls: surviving,
        bounced_balls,
        wave,
        status,
        frame: state.frame + 1,
    }
}

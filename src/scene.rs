//! Turns game state into a flat list of draw commands.
//!
//! Nothing here touches the terminal; `display` rasterises the commands.
//! Coordinates are virtual-screen pixels.

use glam::Vec3;

use crate::camera::{screen_center, Camera};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::entities::{Ball, Enemy, GameState, Rgb};

pub type Point = (f32, f32);

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Filled polygon with an outline drawn over its edges.
    Polygon {
        points: Vec<Point>,
        fill: Rgb,
        outline: Rgb,
        outline_width: f32,
    },
    /// `width == 0` fills the disc; otherwise a ring of that thickness.
    Circle {
        center: Point,
        radius: f32,
        color: Rgb,
        width: f32,
    },
    Line {
        from: Point,
        to: Point,
        color: Rgb,
        width: f32,
    },
}

// ── Cubes ─────────────────────────────────────────────────────────────────────

/// Vertex indices of each face; index 1 faces +Z and is the lit one.
const CUBE_FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [2, 3, 7, 6],
    [0, 3, 7, 4],
    [1, 2, 6, 5],
];
const LIT_FACE: usize = 1;
const EDGE_WIDTH: f32 = 2.0;

pub fn cube_vertices(center: Vec3, size: f32) -> [Vec3; 8] {
    let s = size / 2.0;
    [
        Vec3::new(-s, -s, -s),
        Vec3::new(s, -s, -s),
        Vec3::new(s, s, -s),
        Vec3::new(-s, s, -s),
        Vec3::new(-s, -s, s),
        Vec3::new(s, -s, s),
        Vec3::new(s, s, s),
        Vec3::new(-s, s, s),
    ]
    .map(|offset| center + offset)
}

/// Faces of an enemy cube, farthest first.
///
/// A face with any vertex behind the near plane is skipped for the frame.
/// The painter's order is only right within one convex cube.
pub fn cube_faces(enemy: &Enemy, camera: &Camera) -> Vec<DrawCommand> {
    let vertices = cube_vertices(enemy.position, enemy.size);
    let projected = vertices.map(|v| camera.project(v));
    let shade = enemy.color.darker();

    let mut faces: Vec<(usize, f32, Vec<Point>)> = CUBE_FACES
        .iter()
        .enumerate()
        .filter_map(|(i, face)| {
            let points = face
                .iter()
                .map(|&v| projected[v].map(|p| (p.x, p.y)))
                .collect::<Option<Vec<Point>>>()?;
            let depth = face.iter().map(|&v| camera.depth(vertices[v])).sum::<f32>()
                / face.len() as f32;
            Some((i, depth, points))
        })
        .collect();
    faces.sort_by(|a, b| b.1.total_cmp(&a.1));

    faces
        .into_iter()
        .map(|(i, _, points)| DrawCommand::Polygon {
            points,
            fill: if i == LIT_FACE { enemy.color } else { shade },
            outline: Rgb::BLACK,
            outline_width: EDGE_WIDTH,
        })
        .collect()
}

// ── Balls ─────────────────────────────────────────────────────────────────────

/// A shaded disc: base colour, lighter core, thin black rim.
pub fn ball_sprite(ball: &Ball, camera: &Camera) -> Vec<DrawCommand> {
    let Some(p) = camera.project(ball.position) else {
        return Vec::new();
    };
    let center = (p.x, p.y);
    let radius = p.radius(ball.radius);
    vec![
        DrawCommand::Circle {
            center,
            radius,
            color: ball.color,
            width: 0.0,
        },
        DrawCommand::Circle {
            center,
            radius: (radius - 2.0).max(1.0),
            color: ball.color.lighter(),
            width: 0.0,
        },
        DrawCommand::Circle {
            center,
            radius,
            color: Rgb::BLACK,
            width: 1.0,
        },
    ]
}

// ── Environment ───────────────────────────────────────────────────────────────

const GRID_SPACING: f32 = 10.0;
const GRID_EXTENT: i32 = 20;
const FLOOR_Y: f32 = -5.0;
/// Depth at which floor dots fade to black.
const FLOOR_FADE: f32 = 200.0;

/// Dotted floor that fades with distance.
pub fn floor_grid(camera: &Camera) -> Vec<DrawCommand> {
    let mut dots = Vec::new();
    for i in -GRID_EXTENT..=GRID_EXTENT {
        for j in -GRID_EXTENT..=GRID_EXTENT {
            let point = Vec3::new(i as f32 * GRID_SPACING, FLOOR_Y, j as f32 * GRID_SPACING);
            let Some(p) = camera.project(point) else {
                continue;
            };
            if !(0.0..SCREEN_WIDTH).contains(&p.x) || !(0.0..SCREEN_HEIGHT).contains(&p.y) {
                continue;
            }
            let z = camera.depth(point);
            let brightness = ((255.0 * (1.0 - z / FLOOR_FADE)) as i32).clamp(0, 255) as u8;
            dots.push(DrawCommand::Circle {
                center: (p.x, p.y),
                radius: 1.0,
                color: Rgb(brightness / 3, brightness / 3, brightness / 2),
                width: 0.0,
            });
        }
    }
    dots
}

const CROSSHAIR_ARM: f32 = 20.0;

pub fn crosshair() -> Vec<DrawCommand> {
    let (cx, cy) = screen_center();
    vec![
        DrawCommand::Line {
            from: (cx - CROSSHAIR_ARM, cy),
            to: (cx + CROSSHAIR_ARM, cy),
            color: Rgb::RED,
            width: 2.0,
        },
        DrawCommand::Line {
            from: (cx, cy - CROSSHAIR_ARM),
            to: (cx, cy + CROSSHAIR_ARM),
            color: Rgb::RED,
            width: 2.0,
        },
        DrawCommand::Circle {
            center: (cx, cy),
            radius: 3.0,
            color: Rgb::RED,
            width: 1.0,
        },
    ]
}

// ── Whole frame ───────────────────────────────────────────────────────────────

/// Every world-space draw command for one frame, in painting order.
pub fn compose(state: &GameState) -> Vec<DrawCommand> {
    let camera = Camera::from_player(&state.player);
    let mut commands = floor_grid(&camera);

    let balls = state
        .player_balls
        .iter()
        .chain(&state.enemy_balls)
        .chain(&state.bounced_balls);
    for ball in balls {
        commands.extend(ball_sprite(ball, &camera));
    }
    for enemy in &state.enemies {
        commands.extend(cube_faces(enemy, &camera));
    }

    commands.extend(crosshair());
    commands
}

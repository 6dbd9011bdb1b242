//! Camera basis and the perspective projection onto the virtual screen.

use glam::Vec3;

use crate::consts::{FOCAL, NEAR_PLANE, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::entities::Player;

/// A point mapped onto the virtual screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub x: f32,
    pub y: f32,
    /// `FOCAL / depth`; bigger means nearer.
    pub scale: f32,
}

impl Projection {
    /// On-screen radius of a sphere of `world_radius`, whole pixels, at least 2.
    pub fn radius(&self, world_radius: f32) -> f32 {
        (world_radius * self.scale).trunc().max(2.0)
    }
}

/// Viewer position plus its orthonormal basis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl Camera {
    /// Build the basis for a yaw/pitch pair. Yaw 0, pitch 0 looks down −Z.
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        let (sy, cy) = yaw.sin_cos();
        let (sp, cp) = pitch.sin_cos();
        Self {
            position,
            forward: Vec3::new(sy * cp, sp, -cy * cp).normalize_or_zero(),
            right: Vec3::new(cy, 0.0, sy).normalize_or_zero(),
            up: Vec3::new(-sy * sp, cp, cy * sp).normalize_or_zero(),
        }
    }

    pub fn from_player(player: &Player) -> Self {
        Self::new(player.position, player.yaw, player.pitch)
    }

    /// Distance of `point` along the view direction.
    #[inline]
    pub fn depth(&self, point: Vec3) -> f32 {
        (point - self.position).dot(self.forward)
    }

    /// Project `point`, or `None` when it sits behind or too close to the camera.
    pub fn project(&self, point: Vec3) -> Option<Projection> {
        let rel = point - self.position;
        let z = rel.dot(self.forward);
        if z <= NEAR_PLANE {
            return None;
        }
        let x = rel.dot(self.right);
        let y = rel.dot(self.up);
        let scale = FOCAL / z;
        Some(Projection {
            x: SCREEN_WIDTH / 2.0 + x * scale,
            y: SCREEN_HEIGHT / 2.0 - y * scale,
            scale,
        })
    }
}

/// Centre of the virtual screen, where the crosshair sits.
pub fn screen_center() -> (f32, f32) {
    (SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0)
}

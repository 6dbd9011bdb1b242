use std::f32::consts::FRAC_PI_2;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use cube_shooter::camera::{screen_center, Camera, Projection};
use glam::Vec3;
use proptest::prelude::*;

fn level_camera() -> Camera {
    Camera::new(Vec3::ZERO, 0.0, 0.0)
}

// ── Basis ─────────────────────────────────────────────────────────────────────

#[test]
fn default_basis_looks_down_negative_z() {
    let cam = level_camera();
    assert_eq!(cam.forward, Vec3::new(0.0, 0.0, -1.0));
    assert_eq!(cam.right, Vec3::X);
    assert_eq!(cam.up, Vec3::Y);
}

#[test]
fn quarter_turn_yaw_looks_down_positive_x() {
    let cam = Camera::new(Vec3::ZERO, FRAC_PI_2, 0.0);
    assert_abs_diff_eq!(cam.forward.x, 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(cam.forward.y, 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(cam.forward.z, 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(cam.right.z, 1.0, epsilon = 1e-6);
}

#[test]
fn basis_stays_orthonormal_when_pitched() {
    let cam = Camera::new(Vec3::ZERO, 0.7, -0.4);
    assert_relative_eq!(cam.forward.length(), 1.0, epsilon = 1e-5);
    assert_relative_eq!(cam.up.length(), 1.0, epsilon = 1e-5);
    assert_abs_diff_eq!(cam.forward.dot(cam.right), 0.0, epsilon = 1e-5);
    assert_abs_diff_eq!(cam.forward.dot(cam.up), 0.0, epsilon = 1e-5);
    assert_abs_diff_eq!(cam.right.dot(cam.up), 0.0, epsilon = 1e-5);
}

// ── Projection ────────────────────────────────────────────────────────────────

#[test]
fn point_on_axis_lands_on_screen_center() {
    let p = level_camera().project(Vec3::new(0.0, 0.0, -10.0)).unwrap();
    assert_eq!((p.x, p.y), screen_center());
    assert_eq!(p.scale, 40.0);
}

#[test]
fn screen_y_grows_downward() {
    let p = level_camera().project(Vec3::new(1.0, 2.0, -10.0)).unwrap();
    assert_eq!(p.x, 440.0);
    assert_eq!(p.y, 220.0);
}

#[test]
fn near_plane_is_not_visible() {
    let cam = level_camera();
    assert!(cam.project(Vec3::new(0.0, 0.0, -0.1)).is_none());
    assert!(cam.project(Vec3::new(0.0, 0.0, 0.0)).is_none());
    assert!(cam.project(Vec3::new(3.0, 1.0, 5.0)).is_none());
}

#[test]
fn projection_is_relative_to_camera_position() {
    let cam = Camera::new(Vec3::new(5.0, 1.0, 2.0), 0.0, 0.0);
    let p = cam.project(Vec3::new(5.0, 1.0, -8.0)).unwrap();
    assert_eq!((p.x, p.y), screen_center());
    assert_eq!(cam.depth(Vec3::new(5.0, 1.0, -8.0)), 10.0);
}

#[test]
fn sprite_radius_is_truncated_with_floor_of_two() {
    let far = Projection { x: 0.0, y: 0.0, scale: 0.1 };
    assert_eq!(far.radius(3.0), 2.0);
    let near = Projection { x: 0.0, y: 0.0, scale: 2.5 };
    assert_eq!(near.radius(3.0), 7.0);
}

#[test]
fn normalizing_zero_vector_gives_zero() {
    assert_eq!(Vec3::ZERO.normalize_or_zero(), Vec3::ZERO);
}

proptest! {
    #[test]
    fn scale_is_focal_over_depth(
        x in -100.0f32..100.0,
        y in -100.0f32..100.0,
        z in 0.2f32..1000.0,
    ) {
        let p = level_camera().project(Vec3::new(x, y, -z)).unwrap();
        prop_assert!((p.scale - 400.0 / z).abs() <= 1e-6 * p.scale.max(1.0));
    }

    #[test]
    fn shallow_points_never_project(
        x in -100.0f32..100.0,
        y in -100.0f32..100.0,
        z in -1000.0f32..0.1,
    ) {
        prop_assert!(level_camera().project(Vec3::new(x, y, -z)).is_none());
    }

    #[test]
    fn normalized_vectors_have_unit_length(
        x in -1000.0f32..1000.0,
        y in -1000.0f32..1000.0,
        z in -1000.0f32..1000.0,
    ) {
        let v = Vec3::new(x, y, z);
        prop_assume!(v.length() > 1e-3);
        prop_assert!((v.normalize_or_zero().length() - 1.0).abs() < 1e-4);
    }
}

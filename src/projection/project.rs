//! Rigid rotation and perspective projection
//!
//! Yaw spins about the vertical axis, pitch then tilts about the horizontal
//! axis. Projection is a plain perspective divide with no near-plane clipping:
//! points whose divisor is exactly zero are dropped.

use super::camera::CameraState;
use super::math::{Vec2, Vec3};

/// Rotate a single point: yaw first, then pitch (angles in radians)
pub fn rotate_point(p: Vec3, yaw: f32, pitch: f32) -> Vec3 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    let (sin_pitch, cos_pitch) = pitch.sin_cos();

    let x1 = p.x * cos_yaw + p.z * sin_yaw;
    let z1 = -p.x * sin_yaw + p.z * cos_yaw;

    let y2 = p.y * cos_pitch - z1 * sin_pitch;
    let z2 = p.y * sin_pitch + z1 * cos_pitch;

    Vec3::new(x1, y2, z2)
}

/// Rotate every position (yaw then pitch, radians)
pub fn rotate(positions: &[Vec3], yaw: f32, pitch: f32) -> Vec<Vec3> {
    positions.iter().map(|&p| rotate_point(p, yaw, pitch)).collect()
}

/// Project one point to screen space.
///
/// Returns `None` when `z + view_distance` is exactly zero.
pub fn project_point(
    p: Vec3,
    screen_w: f32,
    screen_h: f32,
    camera: &CameraState,
) -> Option<Vec2> {
    let rel = p - camera.position;
    let denom = rel.z + camera.view_distance;
    if denom == 0.0 {
        return None;
    }

    let half_w = screen_w / 2.0;
    let half_h = screen_h / 2.0;
    Some(Vec2::new(
        rel.x / denom * half_w + half_w,
        -rel.y / denom * half_h + half_h,
    ))
}

/// Project positions, dropping points that fail the divisor guard.
///
/// Output keeps the relative order of the surviving points but can be
/// shorter than the input.
pub fn project(
    positions: &[Vec3],
    screen_w: f32,
    screen_h: f32,
    camera: &CameraState,
) -> Vec<Vec2> {
    positions
        .iter()
        .filter_map(|&p| project_point(p, screen_w, screen_h, camera))
        .collect()
}

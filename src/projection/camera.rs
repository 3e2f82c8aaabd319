//! Camera for the wireframe preview
//!
//! The preview camera never moves: the model rotates in front of it.

use serde::{Serialize, Deserialize};
use super::math::Vec3;

/// Fixed camera placement for a preview session
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraState {
    /// Camera position, subtracted from every rotated vertex before projection
    pub position: Vec3,
    /// Added to camera-space depth to form the perspective divisor
    pub view_distance: f32,
}

impl CameraState {
    pub fn new(position: Vec3, view_distance: f32) -> Self {
        Self { position, view_distance }
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 5000.0), 500.0)
    }
}

//! Projection engine for the wireframe preview
//!
//! # Module Organization
//!
//! - `math` - Vec3, Vec2 and small geometry helpers
//! - `camera` - Fixed preview camera
//! - `project` - Yaw/pitch rotation and perspective projection

pub mod camera;
pub mod math;
pub mod project;

pub use camera::CameraState;
pub use math::{Vec2, Vec3, centroid};
pub use project::{project, rotate};

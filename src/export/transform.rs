//! Authoring space to target space
//!
//! The authoring tool is Z-up. The target swaps Y and Z and negates the new
//! Y, so authoring "up" becomes target -Y. Output is quantized to hundredths.

use serde::{Serialize, Deserialize};
use crate::mesh::Bounds;
use crate::projection::Vec3;
use super::fixed::{quantize, OutOfRange, Position};

/// How raw positions are scaled into target units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScaleMode {
    /// Multiply by the caller's scale factor only
    #[default]
    Fixed,
    /// Center on the bounding box and fit the largest axis to the half extent
    NormalizeToBounds,
}

/// Precomputed per-model coordinate transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransformer {
    center: Vec3,
    scale: f32,
}

impl CoordinateTransformer {
    /// Build the transform for one model.
    ///
    /// `bounds` is the whole mesh's box, computed before any face is visited.
    pub fn new(mode: ScaleMode, bounds: &Bounds, scale_factor: f32, half_extent: f32) -> Self {
        match mode {
            ScaleMode::Fixed => Self {
                center: Vec3::ZERO,
                scale: scale_factor,
            },
            ScaleMode::NormalizeToBounds => {
                let max_half = bounds.max_half_extent();
                let fit = if max_half > 0.0 {
                    half_extent / max_half
                } else {
                    tracing::warn!("Mesh bounds have zero size, normalizing with a scale of 1");
                    1.0
                };
                Self {
                    center: bounds.center(),
                    scale: fit * scale_factor,
                }
            }
        }
    }

    /// Uniform scale applied after centering and remapping
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Map one raw position into quantized target space
    pub fn apply(&self, raw: Vec3) -> Result<Position, OutOfRange> {
        let p = raw - self.center;
        let s = self.scale as f64;
        quantize([p.x as f64 * s, -(p.z as f64) * s, p.y as f64 * s])
    }
}

//! Polygon to 4-slot face conversion
//!
//! The target draws everything as 4-corner primitives. Triangles repeat
//! their last corner so slots 3 and 4 match.

use serde::{Serialize, Deserialize};

/// Corner winding policy for exported faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WindingPolicy {
    /// Reverse authoring order (CCW -> CW), one face per polygon, one flat
    /// normal index per face
    #[default]
    Single,
    /// Keep authoring order, emit quads a second time fully reversed so they
    /// show from both sides; one normal index per corner
    DualSided,
}

/// Indices gathered for one polygon corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerIndices {
    pub vertex: u32,
    pub normal: u32,
    pub uv: u32,
}

/// Normal indices carried by a face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceNormals {
    /// One normal for the whole face (flat shading)
    Flat(u32),
    /// One normal per corner
    PerCorner([u32; 4]),
}

impl FaceNormals {
    pub fn as_slice(&self) -> &[u32] {
        match self {
            FaceNormals::Flat(n) => std::slice::from_ref(n),
            FaceNormals::PerCorner(ns) => ns,
        }
    }
}

/// One exported primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub vertices: [u32; 4],
    pub uvs: [u32; 4],
    pub normals: FaceNormals,
}

impl Face {
    /// Build a face from exactly four corners
    fn from_corners(corners: [CornerIndices; 4], flat: bool) -> Self {
        let normals = if flat {
            FaceNormals::Flat(corners[0].normal)
        } else {
            FaceNormals::PerCorner(corners.map(|c| c.normal))
        };
        Face {
            vertices: corners.map(|c| c.vertex),
            uvs: corners.map(|c| c.uv),
            normals,
        }
    }
}

/// Polygon had a corner count other than 3 or 4
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("polygon has {corners} corners, only triangles and quads are supported")]
pub struct UnsupportedArity {
    pub corners: usize,
}

/// Pad a tri to four corners by repeating the last one
fn pad(corners: &[CornerIndices]) -> Result<[CornerIndices; 4], UnsupportedArity> {
    match corners {
        &[a, b, c] => Ok([a, b, c, c]),
        &[a, b, c, d] => Ok([a, b, c, d]),
        _ => Err(UnsupportedArity { corners: corners.len() }),
    }
}

/// Convert one polygon's corners (authoring order) into faces
pub fn normalize_polygon(
    corners: &[CornerIndices],
    policy: WindingPolicy,
) -> Result<Vec<Face>, UnsupportedArity> {
    match policy {
        WindingPolicy::Single => {
            // Reversed as a whole so consecutive corners still share an edge
            let mut reversed = corners.to_vec();
            reversed.reverse();
            Ok(vec![Face::from_corners(pad(&reversed)?, true)])
        }
        WindingPolicy::DualSided => {
            let forward = pad(corners)?;
            let mut faces = vec![Face::from_corners(forward, false)];
            if corners.len() == 4 {
                let mut back = forward;
                back.reverse();
                faces.push(Face::from_corners(back, false));
            }
            Ok(faces)
        }
    }
}

//! Evaluated mesh data as handed over by an authoring tool

use crate::projection::{Vec2, Vec3};

/// One polygon corner: a vertex reference plus its loop normal and UV
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Loop {
    /// Index into `EvaluatedMesh::positions`
    pub vertex: usize,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// Polygon as an ordered loop of corners (authoring winding, CCW)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub loops: Vec<Loop>,
}

impl Polygon {
    pub fn new(loops: Vec<Loop>) -> Self {
        Self { loops }
    }
}

/// Read-only view of a mesh after modifiers have been applied.
///
/// Positions are in the authoring space (Z up).
pub trait EvaluatedMesh {
    /// Every vertex position of the mesh
    fn positions(&self) -> &[Vec3];
    /// Polygons in iteration order
    fn polygons(&self) -> &[Polygon];

    /// Axis-aligned bounds over all vertex positions
    fn bounds(&self) -> Bounds {
        Bounds::from_points(self.positions())
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    /// Bounds of a point set. An empty set gives a zero box at the origin.
    pub fn from_points(points: &[Vec3]) -> Self {
        let mut iter = points.iter();
        let first = match iter.next() {
            Some(&p) => p,
            None => return Self { min: Vec3::ZERO, max: Vec3::ZERO },
        };
        iter.fold(Self { min: first, max: first }, |b, &p| Self {
            min: b.min.min(p),
            max: b.max.max(p),
        })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Size along each axis
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Half of the largest axis size
    pub fn max_half_extent(&self) -> f32 {
        self.extent().max_component() * 0.5
    }
}

/// Simple in-memory mesh, used by importers and tests
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub polygons: Vec<Polygon>,
}

impl EvaluatedMesh for MeshData {
    fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }
}

/// Unit cube with 8 shared corners and 6 CCW quads, for tests
#[cfg(test)]
pub(crate) fn unit_cube() -> MeshData {
    let positions = vec![
        Vec3::new(-0.5, -0.5, -0.5),
        Vec3::new(0.5, -0.5, -0.5),
        Vec3::new(0.5, 0.5, -0.5),
        Vec3::new(-0.5, 0.5, -0.5),
        Vec3::new(-0.5, -0.5, 0.5),
        Vec3::new(0.5, -0.5, 0.5),
        Vec3::new(0.5, 0.5, 0.5),
        Vec3::new(-0.5, 0.5, 0.5),
    ];
    let quads: [([usize; 4], Vec3); 6] = [
        ([0, 3, 2, 1], Vec3::new(0.0, 0.0, -1.0)),
        ([4, 5, 6, 7], Vec3::new(0.0, 0.0, 1.0)),
        ([0, 1, 5, 4], Vec3::new(0.0, -1.0, 0.0)),
        ([2, 3, 7, 6], Vec3::new(0.0, 1.0, 0.0)),
        ([1, 2, 6, 5], Vec3::new(1.0, 0.0, 0.0)),
        ([0, 4, 7, 3], Vec3::new(-1.0, 0.0, 0.0)),
    ];
    let corner_uvs = [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ];
    let polygons = quads
        .iter()
        .map(|(verts, normal)| {
            Polygon::new(
                verts
                    .iter()
                    .zip(corner_uvs)
                    .map(|(&vertex, uv)| Loop { vertex, normal: *normal, uv })
                    .collect(),
            )
        })
        .collect();
    MeshData { positions, polygons }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_center_and_extent() {
        let b = Bounds::from_points(&[
            Vec3::new(-2.0, -1.0, -2.0),
            Vec3::new(2.0, 1.0, 2.0),
            Vec3::new(0.5, 0.0, 0.0),
        ]);
        assert_eq!(b.center(), Vec3::ZERO);
        assert_eq!(b.extent(), Vec3::new(4.0, 2.0, 4.0));
        assert_eq!(b.max_half_extent(), 2.0);
    }

    #[test]
    fn test_bounds_empty() {
        let b = Bounds::from_points(&[]);
        assert_eq!(b.max_half_extent(), 0.0);
    }
}

//! OBJ file import
//!
//! Reads vertices (v), texture coords (vt), normals (vn) and faces (f) into
//! a `MeshData` that the exporter consumes like any evaluated mesh.
//! Polygons are kept as authored: tris and quads pass through untouched,
//! anything larger is left for the exporter to reject.

use std::path::Path;
use crate::projection::{Vec2, Vec3};
use super::source::{Loop, MeshData, Polygon};

/// Error types for OBJ import
#[derive(Debug, thiserror::Error)]
pub enum ObjError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("Parse error: {0}")]
    Empty(&'static str),
}

/// OBJ file importer
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjImporter {
    /// Source file uses Y as up (the common OBJ export default)
    pub y_up: bool,
}

/// Partially resolved face corner: (position, tex coord, normal)
type CornerRef = (usize, Option<usize>, Option<usize>);

impl ObjImporter {
    pub fn new(y_up: bool) -> Self {
        Self { y_up }
    }

    /// Load an OBJ file
    pub fn load_from_file(&self, path: &Path) -> Result<MeshData, ObjError> {
        let contents = std::fs::read_to_string(path)?;
        let mesh = self.parse(&contents)?;
        tracing::info!(
            "Loaded {:?}: {} vertices, {} polygons",
            path,
            mesh.positions.len(),
            mesh.polygons.len()
        );
        Ok(mesh)
    }

    /// Parse OBJ file contents
    pub fn parse(&self, contents: &str) -> Result<MeshData, ObjError> {
        let mut positions: Vec<Vec3> = Vec::new();
        let mut tex_coords: Vec<Vec2> = Vec::new();
        let mut normals: Vec<Vec3> = Vec::new();
        let mut faces: Vec<Vec<CornerRef>> = Vec::new();

        for (line_num, line) in contents.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();

            match parts[0] {
                "v" => {
                    let [x, y, z] =
                        Self::parse_floats::<3>(&parts[1..], line_num, "vertex position")?;
                    positions.push(self.to_authoring_space(Vec3::new(x, y, z)));
                }

                "vt" => {
                    let [u, v] =
                        Self::parse_floats::<2>(&parts[1..], line_num, "texture coordinate")?;
                    tex_coords.push(Vec2::new(u, v));
                }

                "vn" => {
                    let [x, y, z] = Self::parse_floats::<3>(&parts[1..], line_num, "normal")?;
                    normals.push(self.to_authoring_space(Vec3::new(x, y, z)));
                }

                "f" => {
                    if parts.len() < 4 {
                        return Err(Self::error(line_num, "Face must have at least 3 vertices"));
                    }
                    let corners = parts[1..]
                        .iter()
                        .map(|spec| {
                            Self::parse_face_vertex(
                                spec,
                                line_num,
                                positions.len(),
                                tex_coords.len(),
                                normals.len(),
                            )
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    faces.push(corners);
                }

                _ => {
                    // Ignore other OBJ commands (o, g, s, usemtl, etc.)
                }
            }
        }

        if positions.is_empty() {
            return Err(ObjError::Empty("No vertices found in OBJ file"));
        }

        if faces.is_empty() {
            return Err(ObjError::Empty("No faces found in OBJ file"));
        }

        let polygons = faces
            .iter()
            .map(|corners| {
                let flat = Self::face_normal(&positions, corners);
                Polygon::new(
                    corners
                        .iter()
                        .map(|&(v, vt, vn)| Loop {
                            vertex: v,
                            uv: vt.map(|i| tex_coords[i]).unwrap_or_default(),
                            normal: vn.map(|i| normals[i]).unwrap_or(flat),
                        })
                        .collect(),
                )
            })
            .collect();

        Ok(MeshData { positions, polygons })
    }

    /// Y-up OBJ space to Z-up authoring space
    fn to_authoring_space(&self, v: Vec3) -> Vec3 {
        if self.y_up {
            Vec3::new(v.x, -v.z, v.y)
        } else {
            v
        }
    }

    /// Flat normal from the first three corners
    fn face_normal(positions: &[Vec3], corners: &[CornerRef]) -> Vec3 {
        let p0 = positions[corners[0].0];
        let p1 = positions[corners[1].0];
        let p2 = positions[corners[2].0];
        (p1 - p0).cross(p2 - p0).normalize()
    }

    fn error(line_num: usize, message: impl Into<String>) -> ObjError {
        ObjError::Parse {
            line: line_num + 1,
            message: message.into(),
        }
    }

    /// Parse a face vertex string like "1/2/3" or "1//3" or "1"
    fn parse_face_vertex(
        spec: &str,
        line_num: usize,
        position_count: usize,
        tex_coord_count: usize,
        normal_count: usize,
    ) -> Result<CornerRef, ObjError> {
        let parts: Vec<&str> = spec.split('/').collect();

        // Position index is required
        if parts[0].is_empty() {
            return Err(Self::error(line_num, "Missing position index in face"));
        }
        let pos_idx = Self::parse_index(parts[0], position_count, line_num)?;

        let tc_idx = match parts.get(1) {
            Some(s) if !s.is_empty() => Some(Self::parse_index(s, tex_coord_count, line_num)?),
            _ => None,
        };

        let norm_idx = match parts.get(2) {
            Some(s) if !s.is_empty() => Some(Self::parse_index(s, normal_count, line_num)?),
            _ => None,
        };

        Ok((pos_idx, tc_idx, norm_idx))
    }

    fn parse_floats<const N: usize>(
        values: &[&str],
        line_num: usize,
        what: &str,
    ) -> Result<[f32; N], ObjError> {
        if values.len() < N {
            return Err(Self::error(
                line_num,
                format!("Invalid {} (expected {} values)", what, N),
            ));
        }
        let mut out = [0.0; N];
        for (slot, s) in out.iter_mut().zip(values) {
            *slot = s
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| Self::error(line_num, format!("Invalid float value '{}'", s)))?;
        }
        Ok(out)
    }

    /// Parse an index (handles negative indices for relative indexing)
    fn parse_index(s: &str, count: usize, line_num: usize) -> Result<usize, ObjError> {
        let idx: i64 = s
            .parse()
            .map_err(|_| Self::error(line_num, format!("Invalid index '{}'", s)))?;

        let result = if idx > 0 {
            // Positive index (1-based)
            idx - 1
        } else if idx < 0 {
            // Negative index (relative to current count)
            count as i64 + idx
        } else {
            return Err(Self::error(line_num, "Index cannot be 0"));
        };

        if result < 0 || result as usize >= count {
            return Err(Self::error(
                line_num,
                format!("Index {} out of range (have {} elements)", idx, count),
            ));
        }

        Ok(result as usize)
    }
}

//! Mesh export pipeline
//!
//! raw mesh -> coordinate transform -> attribute interning -> face
//! normalization -> `Model`, which `format::write` turns into text.
//!
//! # Module Organization
//!
//! - `fixed` - Two-decimal quantization shared by every table
//! - `dedup` - Append-only value-to-index tables
//! - `transform` - Centering, axis remap and scale
//! - `faces` - Winding policies and 4-slot faces
//! - `model` - The finished model

mod dedup;
mod faces;
mod fixed;
mod model;
mod transform;

pub use faces::WindingPolicy;
pub use fixed::{format_tuple, Fixed2, Normal, Position, Uv};
pub use model::Model;
pub use transform::ScaleMode;

use std::path::Path;
use serde::{Serialize, Deserialize};
use crate::format::{self, ModelFileError};
use crate::mesh::EvaluatedMesh;
use crate::projection::{Vec2, Vec3};
use faces::{normalize_polygon, CornerIndices, UnsupportedArity};
use fixed::{quantize, OutOfRange};
use transform::CoordinateTransformer;

/// Space the exported texture coordinates live in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum UvSpace {
    /// 0..1, as authored
    #[default]
    Normalized,
    /// Texel coordinates on a texture page with a top-left origin
    Pixels { width: u32, height: u32 },
}

impl UvSpace {
    fn apply(self, uv: Vec2) -> Result<Uv, OutOfRange> {
        let (u, v) = (uv.x as f64, uv.y as f64);
        match self {
            UvSpace::Normalized => quantize([u, v]),
            UvSpace::Pixels { width, height } => {
                quantize([u * width as f64, (1.0 - v) * height as f64])
            }
        }
    }
}

fn quantize_normal(n: Vec3) -> Result<Normal, OutOfRange> {
    quantize([n.x as f64, n.y as f64, n.z as f64])
}

/// Export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Fixed mode: units per authoring unit. Normalize mode: extra multiplier.
    pub scale_factor: f32,
    pub scale_mode: ScaleMode,
    pub winding: WindingPolicy,
    /// Half of the target's symmetric coordinate range
    pub half_extent: f32,
    pub uv_space: UvSpace,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            scale_factor: 200.0,
            scale_mode: ScaleMode::Fixed,
            winding: WindingPolicy::Single,
            half_extent: 128.0,
            uv_space: UvSpace::Normalized,
        }
    }
}

/// Error type for model export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("invalid model name '{0}' (use ASCII letters, digits and '_')")]
    InvalidModelName(String),
    #[error("polygon {polygon}: {source}")]
    UnsupportedPolygon {
        polygon: usize,
        #[source]
        source: UnsupportedArity,
    },
    #[error("polygon {polygon}: {source}")]
    Unquantizable {
        polygon: usize,
        #[source]
        source: OutOfRange,
    },
    #[error("polygon {polygon} references missing vertex {vertex}")]
    MissingVertex { polygon: usize, vertex: usize },
    #[error("Error while saving the file: {0}")]
    Write(#[from] ModelFileError),
}

/// Model names become C identifiers in the output
pub fn validate_model_name(name: &str) -> Result<(), ExportError> {
    let valid = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ExportError::InvalidModelName(name.to_string()))
    }
}

/// Builds `Model`s from evaluated meshes
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    pub settings: ExportSettings,
}

impl Exporter {
    pub fn new(settings: ExportSettings) -> Self {
        Self { settings }
    }

    /// Run the whole pipeline for one mesh
    pub fn export(&self, mesh: &dyn EvaluatedMesh, name: &str) -> Result<Model, ExportError> {
        validate_model_name(name)?;

        let settings = &self.settings;
        let transformer = CoordinateTransformer::new(
            settings.scale_mode,
            &mesh.bounds(),
            settings.scale_factor,
            settings.half_extent,
        );
        tracing::debug!("{:?} scaling, factor {}", settings.scale_mode, transformer.scale());
        let positions = mesh.positions();

        let mut model = Model::new(name);
        let mut corners = Vec::with_capacity(4);

        for (poly_idx, polygon) in mesh.polygons().iter().enumerate() {
            corners.clear();
            for l in &polygon.loops {
                let raw = positions.get(l.vertex).copied().ok_or(ExportError::MissingVertex {
                    polygon: poly_idx,
                    vertex: l.vertex,
                })?;

                let unquantizable = |source: OutOfRange| ExportError::Unquantizable {
                    polygon: poly_idx,
                    source,
                };
                let position = transformer.apply(raw).map_err(unquantizable)?;
                let normal = quantize_normal(l.normal).map_err(unquantizable)?;
                let uv = settings.uv_space.apply(l.uv).map_err(unquantizable)?;

                corners.push(CornerIndices {
                    vertex: model.vertices.intern(position),
                    normal: model.normals.intern(normal),
                    uv: model.uvs.intern(uv),
                });
            }

            let faces = normalize_polygon(&corners, settings.winding).map_err(|source| {
                ExportError::UnsupportedPolygon {
                    polygon: poly_idx,
                    source,
                }
            })?;
            model.faces.extend(faces);
        }

        if model.vertices.is_empty() {
            tracing::warn!("'{}' has no polygons, the model will be empty", name);
        }

        tracing::info!(
            "Exported '{}': {} verts, {} normals, {} uvs, {} faces",
            name,
            model.vertices.len(),
            model.normals.len(),
            model.uvs.len(),
            model.faces.len()
        );

        Ok(model)
    }

    /// Export a mesh and write it to `path` in one go
    pub fn export_to_file(
        &self,
        mesh: &dyn EvaluatedMesh,
        path: &Path,
        name: &str,
    ) -> Result<Model, ExportError> {
        let model = self.export(mesh, name)?;
        format::save_model(&model, path)?;
        tracing::info!("Model exported successfully to {:?}", path);
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{unit_cube, Loop, MeshData, Polygon};

    fn exporter(winding: WindingPolicy) -> Exporter {
        Exporter::new(ExportSettings {
            winding,
            ..ExportSettings::default()
        })
    }

    #[test]
    fn test_cube_single_winding() {
        let model = exporter(WindingPolicy::Single).export(&unit_cube(), "cube").unwrap();
        assert_eq!(model.vertices.len(), 8);
        assert_eq!(model.normals.len(), 6);
        assert_eq!(model.uvs.len(), 4);
        assert_eq!(model.face_count(), 6);
        assert_eq!(model.normal_indices().count(), 6);
    }

    #[test]
    fn test_cube_dual_sided() {
        let model = exporter(WindingPolicy::DualSided).export(&unit_cube(), "cube").unwrap();
        assert_eq!(model.vertices.len(), 8);
        assert_eq!(model.face_count(), 12);
        assert_eq!(model.normal_indices().count(), 48);
        for pair in model.faces.chunks(2) {
            let mut back = pair[0].vertices;
            back.reverse();
            assert_eq!(pair[1].vertices, back);
        }
    }

    #[test]
    fn test_indices_stay_in_table_bounds() {
        for winding in [WindingPolicy::Single, WindingPolicy::DualSided] {
            let model = exporter(winding).export(&unit_cube(), "cube").unwrap();
            for face in &model.faces {
                assert!(face.vertices.iter().all(|&i| (i as usize) < model.vertices.len()));
                assert!(face.uvs.iter().all(|&i| (i as usize) < model.uvs.len()));
                let normals = face.normals.as_slice();
                assert!(normals.iter().all(|&i| (i as usize) < model.normals.len()));
            }
        }
    }

    #[test]
    fn test_cube_fixed_scale_values() {
        let model = exporter(WindingPolicy::Single).export(&unit_cube(), "cube").unwrap();
        // First corner (-0.5,-0.5,-0.5) * 200 with Y/Z swapped and new Y negated
        let first = model.vertices.entries()[0];
        assert_eq!(first, [Fixed2(-10000), Fixed2(10000), Fixed2(-10000)]);
    }

    #[test]
    fn test_normalize_mode_fits_range() {
        let settings = ExportSettings {
            scale_mode: ScaleMode::NormalizeToBounds,
            scale_factor: 1.0,
            ..ExportSettings::default()
        };
        let model = Exporter::new(settings).export(&unit_cube(), "cube").unwrap();
        for v in model.vertices.entries() {
            for c in v {
                assert_eq!(c.0.abs(), 12800);
            }
        }
    }

    #[test]
    fn test_pixel_uvs_flip_v() {
        let settings = ExportSettings {
            uv_space: UvSpace::Pixels { width: 64, height: 32 },
            ..ExportSettings::default()
        };
        let model = Exporter::new(settings).export(&unit_cube(), "cube").unwrap();
        assert_eq!(model.uvs.entries()[0], [Fixed2(0), Fixed2(3200)]);
        assert!(model.uvs.index_of(&[Fixed2(6400), Fixed2(0)]).is_some());
    }

    #[test]
    fn test_rejects_ngon() {
        let mut mesh = unit_cube();
        let extra = mesh.polygons[0].loops[0];
        mesh.polygons[2].loops.push(extra);
        match exporter(WindingPolicy::Single).export(&mesh, "cube") {
            Err(ExportError::UnsupportedPolygon { polygon, source }) => {
                assert_eq!(polygon, 2);
                assert_eq!(source.corners, 5);
            }
            other => panic!("expected arity error, got {:?}", other.map(|m| m.face_count())),
        }
    }

    #[test]
    fn test_rejects_missing_vertex() {
        let mesh = MeshData {
            positions: vec![Vec3::ZERO],
            polygons: vec![Polygon::new(vec![
                Loop { vertex: 0, normal: Vec3::ZERO, uv: Vec2::default() },
                Loop { vertex: 0, normal: Vec3::ZERO, uv: Vec2::default() },
                Loop { vertex: 4, normal: Vec3::ZERO, uv: Vec2::default() },
            ])],
        };
        assert!(matches!(
            exporter(WindingPolicy::Single).export(&mesh, "tri"),
            Err(ExportError::MissingVertex { polygon: 0, vertex: 4 })
        ));
    }

    #[test]
    fn test_rejects_values_outside_fixed_range() {
        let mut huge = unit_cube();
        huge.positions[5].x = 1e9;
        match exporter(WindingPolicy::Single).export(&huge, "cube") {
            Err(ExportError::Unquantizable { source, .. }) => {
                assert_eq!(source.value, 1e9 * 200.0);
            }
            other => panic!("expected range error, got {:?}", other.map(|m| m.face_count())),
        }

        let mut bad_normal = unit_cube();
        bad_normal.polygons[3].loops[1].normal.y = f32::NAN;
        assert!(matches!(
            exporter(WindingPolicy::DualSided).export(&bad_normal, "cube"),
            Err(ExportError::Unquantizable { polygon: 3, .. })
        ));
    }

    #[test]
    fn test_model_name_validation() {
        assert!(validate_model_name("crate_01").is_ok());
        assert!(validate_model_name("").is_err());
        assert!(validate_model_name("my model").is_err());
        assert!(validate_model_name("a-b").is_err());
    }
}

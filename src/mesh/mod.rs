//! Mesh sources for the exporter
//!
//! The exporter only sees the `EvaluatedMesh` trait. `ObjImporter` is the
//! bundled provider for meshes saved as Wavefront OBJ.

mod obj_import;
mod source;

pub use obj_import::ObjImporter;
pub use source::{Bounds, EvaluatedMesh};

#[cfg(test)]
pub(crate) use source::{unit_cube, Loop, MeshData, Polygon};

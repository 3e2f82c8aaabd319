//! Exported model: deduplicated tables plus face records

use super::dedup::AttributeTable;
use super::faces::Face;
use super::fixed::{Normal, Position, Uv};

/// Everything written to one model file
#[derive(Debug, Clone)]
pub struct Model {
    /// Prefix for every array name in the output
    pub name: String,
    pub vertices: AttributeTable<Position>,
    pub normals: AttributeTable<Normal>,
    pub uvs: AttributeTable<Uv>,
    pub faces: Vec<Face>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vertices: AttributeTable::new(),
            normals: AttributeTable::new(),
            uvs: AttributeTable::new(),
            faces: Vec::new(),
        }
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn vertex_indices(&self) -> impl Iterator<Item = [u32; 4]> + '_ {
        self.faces.iter().map(|f| f.vertices)
    }

    pub fn uv_indices(&self) -> impl Iterator<Item = [u32; 4]> + '_ {
        self.faces.iter().map(|f| f.uvs)
    }

    /// Normal indices of all faces, concatenated in face order
    pub fn normal_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.faces.iter().flat_map(|f| f.normals.as_slice().iter().copied())
    }
}

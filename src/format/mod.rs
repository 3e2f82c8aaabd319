//! Model file format
//!
//! A model file is C source for the target toolchain: a face-count constant
//! followed by six named arrays, each opened by
//! `<TYPE> <model>_<suffix>[] = {` and closed by `};`, one entry per line.
//! It is the only thing the exporter and the previewer share.

mod parse;
mod write;

pub use parse::{load_model, ParsedModel};
pub use write::save_model;

#[cfg(test)]
pub(crate) use write::write_model;

use std::path::{Path, PathBuf};

/// Directory, relative to a project root, where model files live
pub const MODEL_DIR: &str = "cout";
/// Model file extension
pub const MODEL_EXT: &str = "c";

/// Lines written before the arrays
pub const PREAMBLE: [&str; 2] = ["#include <psxgte.h>", "#include \"../display.h\""];

/// Error type for reading and writing model files
#[derive(Debug, thiserror::Error)]
pub enum ModelFileError {
    #[error("Could not find {0:?}")]
    NotFound(PathBuf),
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ModelFileError {
    fn io(path: &Path) -> impl FnOnce(std::io::Error) -> ModelFileError + '_ {
        move |source| ModelFileError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Location of a model file: `<base>/cout/<model>.c`
pub fn model_path(base_dir: &Path, model_id: &str, subdir: &str) -> PathBuf {
    base_dir.join(subdir).join(format!("{}.{}", model_id, MODEL_EXT))
}

/// The six arrays, in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Verts,
    Norms,
    VertexIndices,
    UvIndices,
    NormalIndices,
    Uvs,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Verts,
        Section::Norms,
        Section::VertexIndices,
        Section::UvIndices,
        Section::NormalIndices,
        Section::Uvs,
    ];

    /// C type of the array
    pub fn type_name(self) -> &'static str {
        match self {
            Section::Verts | Section::Norms | Section::Uvs => "SVECTOR",
            Section::VertexIndices | Section::UvIndices => "INDEX",
            Section::NormalIndices => "int",
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Section::Verts => "verts",
            Section::Norms => "norms",
            Section::VertexIndices => "vertex_indices",
            Section::UvIndices => "uv_indices",
            Section::NormalIndices => "normal_indices",
            Section::Uvs => "uv",
        }
    }

    /// Opening line, e.g. `SVECTOR cube_verts[] = {`
    pub fn header(self, model_id: &str) -> String {
        format!("{} {}_{}[] = {{", self.type_name(), model_id, self.suffix())
    }
}

/// Face count declaration prefix, e.g. `int cube_num_faces = `
fn face_count_prefix(model_id: &str) -> String {
    format!("int {}_num_faces = ", model_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers() {
        assert_eq!(Section::Verts.header("cube"), "SVECTOR cube_verts[] = {");
        assert_eq!(Section::UvIndices.header("cube"), "INDEX cube_uv_indices[] = {");
        assert_eq!(Section::NormalIndices.header("cube"), "int cube_normal_indices[] = {");
    }

    #[test]
    fn test_model_path() {
        let p = model_path(Path::new("/proj"), "ship", MODEL_DIR);
        assert_eq!(p, PathBuf::from("/proj/cout/ship.c"));
    }
}

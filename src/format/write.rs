//! Model serialization

use std::fs;
use std::path::Path;
use crate::export::{format_tuple, Model};
use super::{face_count_prefix, ModelFileError, Section, PREAMBLE};

fn index_quad(q: [u32; 4]) -> String {
    format!("{{{},{},{},{}}}", q[0], q[1], q[2], q[3])
}

/// Entries of one array, already formatted
fn section_entries(model: &Model, section: Section) -> Vec<String> {
    match section {
        Section::Verts => model.vertices.entries().iter().map(|v| format_tuple(v)).collect(),
        Section::Norms => model.normals.entries().iter().map(|n| format_tuple(n)).collect(),
        Section::Uvs => model.uvs.entries().iter().map(|uv| format_tuple(uv)).collect(),
        Section::VertexIndices => model.vertex_indices().map(index_quad).collect(),
        Section::UvIndices => model.uv_indices().map(index_quad).collect(),
        Section::NormalIndices => model.normal_indices().map(|n| n.to_string()).collect(),
    }
}

/// Render a model as file text. Output is deterministic.
pub fn write_model(model: &Model) -> String {
    let name = &model.name;
    let mut out = String::new();

    for line in PREAMBLE {
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');

    out.push_str(&format!(
        "{}{};  // {} face count\n",
        face_count_prefix(name),
        model.face_count(),
        name
    ));

    for section in Section::ALL {
        out.push('\n');
        out.push_str(&section.header(name));
        out.push('\n');
        let entries = section_entries(model, section);
        if !entries.is_empty() {
            out.push_str("  ");
            out.push_str(&entries.join(",\n  "));
            out.push('\n');
        }
        out.push_str("};\n");
    }

    out
}

/// Write a model file.
///
/// The text goes to a sibling `.tmp` file first and is then renamed over
/// `path`. A failed write leaves the temporary file behind.
pub fn save_model(model: &Model, path: &Path) -> Result<(), ModelFileError> {
    let text = write_model(model);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(ModelFileError::io(parent))?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp = Path::new(&tmp_name);

    fs::write(tmp, text).map_err(ModelFileError::io(tmp))?;
    fs::rename(tmp, path).map_err(ModelFileError::io(path))?;
    Ok(())
}

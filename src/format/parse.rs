//! Model file parsing
//!
//! Single pass over lines. A section opens only on its exact header line
//! for the requested model, so one model name containing another's suffix
//! can't be confused. Bad records are skipped with a warning and the rest
//! of the file still loads.

use std::fs;
use std::path::Path;
use crate::export::{Fixed2, Normal, Position, Uv};
use super::{face_count_prefix, model_path, ModelFileError, Section};

/// Tables and index lists read back from a model file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedModel {
    pub vertices: Vec<Position>,
    pub normals: Vec<Normal>,
    pub uvs: Vec<Uv>,
    pub vertex_indices: Vec<[u32; 4]>,
    pub uv_indices: Vec<[u32; 4]>,
    pub normal_indices: Vec<u32>,
    /// Value of the `_num_faces` declaration, if present
    pub face_count: Option<usize>,
    /// Record lines that were dropped as malformed
    pub skipped_lines: usize,
}

impl ParsedModel {
    /// Normal indices per face implied by the list lengths (1 or 4)
    pub fn normals_per_face(&self) -> Option<usize> {
        let faces = self.vertex_indices.len();
        if faces == 0 {
            return None;
        }
        match self.normal_indices.len() {
            n if n == faces => Some(1),
            n if n == faces * 4 => Some(4),
            _ => None,
        }
    }

    /// Faces whose vertex indices point past the vertex table
    pub fn out_of_range_faces(&self) -> usize {
        let count = self.vertices.len();
        self.vertex_indices
            .iter()
            .filter(|q| q.iter().any(|&i| i as usize >= count))
            .count()
    }
}

/// Read `<base>/<subdir>/<model>.c`
pub fn load_model(
    base_dir: &Path,
    subdir: &str,
    model_id: &str,
) -> Result<ParsedModel, ModelFileError> {
    let path = model_path(base_dir, model_id, subdir);
    if !path.exists() {
        return Err(ModelFileError::NotFound(path));
    }
    let text = fs::read_to_string(&path).map_err(ModelFileError::io(&path))?;
    let model = parse_model(&text, model_id);
    tracing::info!(
        "Loaded {:?}: {} verts, {} faces ({} lines skipped)",
        path,
        model.vertices.len(),
        model.vertex_indices.len(),
        model.skipped_lines
    );
    Ok(model)
}

/// Parse model file text for `model_id`
pub fn parse_model(text: &str, model_id: &str) -> ParsedModel {
    let headers: Vec<(Section, String)> = Section::ALL
        .iter()
        .map(|&s| (s, s.header(model_id)))
        .collect();
    let count_prefix = face_count_prefix(model_id);

    let mut model = ParsedModel::default();
    let mut seen = [false; 6];
    let mut current: Option<Section> = None;

    for (line_num, raw) in text.lines().enumerate() {
        let line = raw.trim();

        let Some(section) = current else {
            if let Some(pos) = headers.iter().position(|(_, h)| h == line) {
                current = Some(headers[pos].0);
                seen[pos] = true;
            } else if let Some(rest) = line.strip_prefix(&count_prefix) {
                match parse_face_count(rest) {
                    Some(n) => model.face_count = Some(n),
                    None => tracing::warn!("Line {}: invalid face count '{}'", line_num + 1, line),
                }
            }
            continue;
        };

        if line.starts_with("};") {
            current = None;
            continue;
        }
        if line.is_empty() {
            continue;
        }

        if let Err(reason) = parse_record(&mut model, section, line) {
            tracing::warn!(
                "Line {}: skipping invalid line in {}: {} ({})",
                line_num + 1,
                section.suffix(),
                line,
                reason
            );
            model.skipped_lines += 1;
        }
    }

    if let Some(section) = current {
        tracing::warn!("Section {} is never closed", section.suffix());
    }
    for (i, section) in Section::ALL.iter().enumerate() {
        if !seen[i] {
            tracing::warn!("Missing section {}_{}", model_id, section.suffix());
        }
    }
    if let Some(n) = model.face_count {
        if n != model.vertex_indices.len() {
            tracing::warn!(
                "Face count says {} but {} vertex index quads were read",
                n,
                model.vertex_indices.len()
            );
        }
    }

    model
}

/// `6;  // comment` -> 6
fn parse_face_count(rest: &str) -> Option<usize> {
    let (value, _) = rest.split_once(';')?;
    value.trim().parse().ok()
}

/// Strip one trailing comma and the surrounding braces of `{a,b,c}`
fn braced(line: &str) -> Option<&str> {
    let line = line.strip_suffix(',').unwrap_or(line).trim_end();
    line.strip_prefix('{')?.strip_suffix('}')
}

fn fields<'a>(line: &'a str) -> Result<Vec<&'a str>, String> {
    let inner = braced(line).ok_or_else(|| "expected {...}".to_string())?;
    Ok(inner.split(',').map(str::trim).collect())
}

fn parse_numbers<const N: usize>(line: &str) -> Result<[Fixed2; N], String> {
    let parts = fields(line)?;
    if parts.len() != N {
        return Err(format!("expected {} values, found {}", N, parts.len()));
    }
    let mut out = [Fixed2::ZERO; N];
    for (slot, s) in out.iter_mut().zip(&parts) {
        let v: f64 = s.parse().map_err(|_| format!("invalid number '{}'", s))?;
        *slot = Fixed2::try_from_f64(v).map_err(|e| e.to_string())?;
    }
    Ok(out)
}

fn parse_index(s: &str) -> Result<u32, String> {
    s.parse().map_err(|_| format!("invalid index '{}'", s))
}

fn parse_quad(line: &str) -> Result<[u32; 4], String> {
    let parts = fields(line)?;
    if parts.len() != 4 {
        return Err(format!("expected 4 indices, found {}", parts.len()));
    }
    let mut out = [0; 4];
    for (slot, s) in out.iter_mut().zip(&parts) {
        *slot = parse_index(s)?;
    }
    Ok(out)
}

/// Bare `n` or `n,`; a braced `{n,...}` list is accepted too
fn parse_normal_indices(line: &str) -> Result<Vec<u32>, String> {
    if line.starts_with('{') {
        return fields(line)?.into_iter().map(parse_index).collect();
    }
    let value = line.strip_suffix(',').unwrap_or(line).trim_end();
    Ok(vec![parse_index(value)?])
}

fn parse_record(model: &mut ParsedModel, section: Section, line: &str) -> Result<(), String> {
    match section {
        Section::Verts => model.vertices.push(parse_numbers::<3>(line)?),
        Section::Norms => model.normals.push(parse_numbers::<3>(line)?),
        Section::Uvs => model.uvs.push(parse_numbers::<2>(line)?),
        Section::VertexIndices => model.vertex_indices.push(parse_quad(line)?),
        Section::UvIndices => model.uv_indices.push(parse_quad(line)?),
        Section::NormalIndices => model.normal_indices.extend(parse_normal_indices(line)?),
    }
    Ok(())
}

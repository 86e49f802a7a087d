use log::{debug, trace};

use super::{ImportError, ImportOptions, ImportResult};
use crate::mesh::Mesh;

/// How a source line is handled, decided by its first character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    Comment,
    Vertex,
    Face,
    /// Recognized but carries no geometry (`vt`, `vn`, `o`, `g`, `mtllib`, `usemtl`)
    Ignored,
    Unknown,
}

fn classify(line: &str) -> Directive {
    match line.chars().next() {
        Some('#') => Directive::Comment,
        Some('v') if line.starts_with("v ") => Directive::Vertex,
        Some('v') => Directive::Ignored,
        Some('f') => Directive::Face,
        Some('o' | 'g') => Directive::Ignored,
        Some('m') if line.starts_with("mtllib") => Directive::Ignored,
        Some('u') if line.starts_with("usemtl") => Directive::Ignored,
        _ => Directive::Unknown,
    }
}

/// Import OBJ text with the default (lenient) options
pub fn import(source: &str) -> ImportResult<Mesh> {
    import_with(source, &ImportOptions::default())
}

/// Import OBJ text into a triangle mesh
///
/// # Algorithm
/// 1. Strip carriage returns and walk the lines in file order
/// 2. `v x y z` appends a vertex; fewer than three coordinates aborts the import
/// 3. `f i j k ...` resolves 1-based references against the vertices declared
///    so far and fan-triangulates from the first reference
/// 4. Triangles with any out-of-range index are dropped
/// 5. One face normal is computed per surviving triangle
///
/// Unknown directives are logged and skipped, or rejected when
/// `options.strict` is set.
pub fn import_with(source: &str, options: &ImportOptions) -> ImportResult<Mesh> {
    let source = source.replace('\r', "");

    let mut vertices: Vec<[f32; 3]> = Vec::new();
    let mut triangles: Vec<i32> = Vec::new();

    for (number, line) in source.split('\n').enumerate() {
        let number = number + 1;
        if line.trim().is_empty() {
            continue;
        }

        match classify(line) {
            Directive::Comment | Directive::Ignored => {}
            Directive::Vertex => {
                let vertex =
                    parse_vertex(line).ok_or(ImportError::InvalidFormat { line: number })?;
                vertices.push(vertex);
            }
            Directive::Face => {
                let vertex_count = i32::try_from(vertices.len()).unwrap_or(i32::MAX);
                let face = parse_face(line, vertex_count);

                if face.len() < 3 {
                    trace!("Line {}: face with {} vertices skipped", number, face.len());
                    continue;
                }

                let dropped = triangulate_fan(&face, vertex_count, &mut triangles);
                if dropped > 0 {
                    trace!(
                        "Line {}: dropped {} triangles with out-of-range indices",
                        number, dropped
                    );
                }
            }
            Directive::Unknown => {
                let name = directive_name(line);
                if options.strict {
                    return Err(ImportError::UnsupportedFeature(name.to_string()));
                }
                debug!("Line {}: skipping unsupported directive: {}", number, line);
            }
        }
    }

    let mesh = Mesh::from_parts(vertices, triangles);
    debug!(
        "Imported {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    Ok(mesh)
}

/// Parse a `v x y z` line; coordinates that fail to parse become 0.0
///
/// Returns `None` when fewer than three coordinates are present. Extra
/// tokens (e.g. a `w` component or vertex colors) are ignored.
fn parse_vertex(line: &str) -> Option<[f32; 3]> {
    let tokens: Vec<&str> = line.split(' ').filter(|t| !t.is_empty()).collect();
    if tokens.len() < 4 {
        return None;
    }

    let coord = |token: &str| token.parse::<f32>().unwrap_or(0.0);
    Some([coord(tokens[1]), coord(tokens[2]), coord(tokens[3])])
}

/// Resolve the vertex references of an `f` line to 0-based indices
///
/// Only the part before the first `/` is used. Unparseable references become
/// 0, which resolves to -1 and is later dropped as out of range.
fn parse_face(line: &str, vertex_count: i32) -> Vec<i32> {
    line.split_whitespace()
        .skip(1)
        .map(|reference| {
            let index = reference.split('/').next().unwrap_or_default();
            resolve_index(index.parse::<i32>().unwrap_or(0), vertex_count)
        })
        .collect()
}

/// Convert a 1-based OBJ reference to a 0-based index
///
/// Negative (relative) references map to `vertex_count`, which is always out
/// of range, so triangles using them are dropped.
fn resolve_index(reference: i32, vertex_count: i32) -> i32 {
    if reference < 0 {
        vertex_count
    } else {
        reference - 1
    }
}

/// Fan-triangulate a face from its first vertex, appending to `triangles`
///
/// Assumes a convex, planar polygon. Returns the number of triangles dropped
/// because an index fell outside `[0, vertex_count)`.
fn triangulate_fan(face: &[i32], vertex_count: i32, triangles: &mut Vec<i32>) -> usize {
    let in_range = |index: i32| (0..vertex_count).contains(&index);

    let a = face[0];
    let mut dropped = 0;
    for i in 2..face.len() {
        let b = face[i - 1];
        let c = face[i];
        if !(in_range(a) && in_range(b) && in_range(c)) {
            dropped += 1;
            continue;
        }
        triangles.extend_from_slice(&[a, b, c]);
    }

    dropped
}

fn directive_name(line: &str) -> &str {
    line.split_whitespace().next().unwrap_or(line)
}

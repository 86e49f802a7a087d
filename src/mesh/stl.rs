use super::Mesh;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a mesh to a binary STL file
///
/// Each triangle is written with the normal computed at import time, so
/// degenerate triangles keep their zero normal.
///
/// # Arguments
/// * `path` - Output file path
/// * `mesh` - Mesh to export
pub fn write_stl(path: &Path, mesh: &Mesh) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create STL file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let triangles: Vec<stl_io::Triangle> = mesh
        .triangles()
        .chunks_exact(3)
        .zip(mesh.normals())
        .map(|(tri, normal)| stl_io::Triangle {
            normal: stl_io::Normal::new(*normal),
            vertices: [
                stl_io::Vertex::new(mesh.vertices()[tri[0] as usize]),
                stl_io::Vertex::new(mesh.vertices()[tri[1] as usize]),
                stl_io::Vertex::new(mesh.vertices()[tri[2] as usize]),
            ],
        })
        .collect();

    stl_io::write_stl(&mut writer, triangles.iter())
        .with_context(|| format!("Failed to write STL file: {}", path.display()))?;
    writer.flush()?;

    Ok(())
}

/// Header block followed by the little-endian `u32` triangle count
const STL_PREAMBLE_BYTES: usize = 80 + 4;

/// Normal, three corners and the attribute word of one record
const STL_RECORD_BYTES: usize = 4 * 3 + 4 * 9 + 2;

/// Size in bytes of the STL that `write_stl` produces for a mesh
pub fn estimate_stl_size(triangle_count: usize) -> usize {
    STL_PREAMBLE_BYTES + triangle_count * STL_RECORD_BYTES
}

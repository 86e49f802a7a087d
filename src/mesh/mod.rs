pub mod bounds;
pub mod stl;
pub mod validation;

pub use bounds::Bounds;
pub use stl::{estimate_stl_size, write_stl};
pub use validation::{ValidationResult, validate_mesh};

use serde::Serialize;

use crate::rng::DeterministicRng;

/// Indexed triangle mesh with one normal per triangle
///
/// Built once by the importer and never mutated afterwards. Triangle indices
/// are stored flat, three per triangle, and always address a valid vertex.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Mesh {
    vertices: Vec<[f32; 3]>,
    triangles: Vec<i32>,
    normals: Vec<[f32; 3]>,
}

impl Mesh {
    /// Build a mesh from vertices and bounds-checked triangle indices,
    /// computing the per-triangle normals
    pub(crate) fn from_parts(vertices: Vec<[f32; 3]>, triangles: Vec<i32>) -> Self {
        debug_assert_eq!(triangles.len() % 3, 0);

        let normals = triangles
            .chunks_exact(3)
            .map(|tri| {
                face_normal(
                    vertices[tri[0] as usize],
                    vertices[tri[1] as usize],
                    vertices[tri[2] as usize],
                )
            })
            .collect();

        Self {
            vertices,
            triangles,
            normals,
        }
    }

    /// Vertex positions in declaration order
    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.vertices
    }

    /// Flat triangle vertex indices, stride 3
    pub fn triangles(&self) -> &[i32] {
        &self.triangles
    }

    /// One normal per triangle, unit length or zero for degenerate triangles
    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.triangles.is_empty()
    }

    /// Get the three vertex indices of a triangle
    pub fn triangle(&self, index: usize) -> Option<[i32; 3]> {
        let start = index.checked_mul(3)?;
        match self.triangles.get(start..start.checked_add(3)?) {
            Some(&[a, b, c]) => Some([a, b, c]),
            _ => None,
        }
    }

    /// Get the three corner positions of a triangle
    pub fn triangle_positions(&self, index: usize) -> Option<[[f32; 3]; 3]> {
        let [a, b, c] = self.triangle(index)?;
        Some([
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ])
    }

    /// Axis-aligned bounds of all vertices, `None` for a mesh without vertices
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.vertices)
    }

    /// Pick a reproducible point on the mesh surface
    ///
    /// Consumes three values from `rng`: one selects the triangle, two place
    /// the point inside it. Returns `None` when there are no triangles.
    pub fn sample_point(&self, rng: &mut DeterministicRng) -> Option<[f32; 3]> {
        let count = self.triangle_count();
        if count == 0 {
            return None;
        }

        let pick = ((rng.next_f32() * count as f32) as usize).min(count - 1);
        let [p0, p1, p2] = self.triangle_positions(pick)?;

        let mut u = rng.next_f32();
        let mut v = rng.next_f32();
        // Fold the far half of the parallelogram back into the triangle
        if u + v > 1.0 {
            u = 1.0 - u;
            v = 1.0 - v;
        }

        Some([
            p0[0] + u * (p1[0] - p0[0]) + v * (p2[0] - p0[0]),
            p0[1] + u * (p1[1] - p0[1]) + v * (p2[1] - p0[1]),
            p0[2] + u * (p1[2] - p0[2]) + v * (p2[2] - p0[2]),
        ])
    }
}

/// Calculate the face normal of a triangle using the cross product
///
/// Degenerate triangles keep their zero-length cross product instead of
/// being assigned an arbitrary direction.
pub fn face_normal(v0: [f32; 3], v1: [f32; 3], v2: [f32; 3]) -> [f32; 3] {
    // Edge vectors
    let e0 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
    let e1 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];

    let n = [
        e0[1] * e1[2] - e0[2] * e1[1],
        e0[2] * e1[0] - e0[0] * e1[2],
        e0[0] * e1[1] - e0[1] * e1[0],
    ];

    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    if len > 0.0 {
        let inv = 1.0 / len;
        [n[0] * inv, n[1] * inv, n[2] * inv]
    } else {
        n
    }
}

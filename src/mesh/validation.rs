//! Mesh quality report
//!
//! Inspects an imported mesh before it is handed to a navmesh builder:
//! - Degenerate triangles (zero normal)
//! - NaN/Inf vertex coordinates
//! - Vertices no triangle refers to
//!
//! The report is diagnostic only; the mesh is never modified.

use super::Mesh;

/// Result of mesh validation
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Total number of triangles validated
    pub total: usize,
    /// Number of degenerate triangles (collinear or coincident corners)
    pub degenerate: usize,
    /// Number of triangles touching a vertex with NaN/Inf coordinates
    pub invalid_coords: usize,
    /// Number of vertices not used by any triangle
    pub unreferenced_vertices: usize,
    /// Warning messages for issues found
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Check if the mesh can be fed to a navmesh builder
    pub fn is_valid(&self) -> bool {
        self.invalid_coords == 0
    }

    /// Check if the mesh has any issues at all
    pub fn has_issues(&self) -> bool {
        self.degenerate > 0 || self.invalid_coords > 0 || self.unreferenced_vertices > 0
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        if !self.has_issues() {
            format!("Mesh valid: {} triangles, no issues", self.total)
        } else {
            format!(
                "Mesh issues: {} total, {} degenerate, {} invalid coords, {} unreferenced vertices",
                self.total, self.degenerate, self.invalid_coords, self.unreferenced_vertices
            )
        }
    }
}

/// Validate a mesh and return a detailed report
pub fn validate_mesh(mesh: &Mesh) -> ValidationResult {
    let mut result = ValidationResult {
        total: mesh.triangle_count(),
        ..Default::default()
    };

    let mut referenced = vec![false; mesh.vertex_count()];

    for (i, (tri, normal)) in mesh
        .triangles()
        .chunks_exact(3)
        .zip(mesh.normals())
        .enumerate()
    {
        for &index in tri {
            referenced[index as usize] = true;
        }

        if tri
            .iter()
            .any(|&index| has_invalid_coords(&mesh.vertices()[index as usize]))
        {
            result.invalid_coords += 1;
            result
                .warnings
                .push(format!("Triangle {} has NaN/Inf coordinates", i));
            continue;
        }

        if is_zero(normal) {
            result.degenerate += 1;
        }
    }

    result.unreferenced_vertices = referenced.iter().filter(|&&used| !used).count();

    if result.degenerate > 0 {
        result.warnings.push(format!(
            "{} degenerate triangles detected (zero normals)",
            result.degenerate
        ));
    }
    if result.unreferenced_vertices > 0 {
        result.warnings.push(format!(
            "{} vertices are not used by any triangle",
            result.unreferenced_vertices
        ));
    }

    result
}

fn has_invalid_coords(vertex: &[f32; 3]) -> bool {
    vertex.iter().any(|coord| !coord.is_finite())
}

fn is_zero(normal: &[f32; 3]) -> bool {
    normal.iter().all(|&c| c == 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_mesh() {
        let mesh = Mesh::from_parts(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![0, 1, 2],
        );

        let result = validate_mesh(&mesh);

        assert_eq!(result.total, 1);
        assert!(result.is_valid());
        assert!(!result.has_issues());
        assert_eq!(result.summary(), "Mesh valid: 1 triangles, no issues");
    }

    #[test]
    fn test_degenerate_triangle_collinear() {
        let mesh = Mesh::from_parts(
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [2.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
            ],
            vec![0, 1, 2, 0, 1, 3],
        );

        let result = validate_mesh(&mesh);

        assert_eq!(result.total, 2);
        assert_eq!(result.degenerate, 1);
        assert!(result.is_valid());
        assert!(result.has_issues());
    }

    #[test]
    fn test_invalid_coords_nan() {
        let mesh = Mesh::from_parts(
            vec![[f32::NAN, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![0, 1, 2],
        );

        let result = validate_mesh(&mesh);

        assert_eq!(result.invalid_coords, 1);
        assert_eq!(result.degenerate, 0);
        assert!(!result.is_valid());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_invalid_coords_inf() {
        let mesh = Mesh::from_parts(
            vec![[f32::INFINITY, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![0, 1, 2],
        );

        assert!(!validate_mesh(&mesh).is_valid());
    }

    #[test]
    fn test_unreferenced_vertices() {
        let mesh = Mesh::from_parts(
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [5.0, 5.0, 5.0],
            ],
            vec![0, 1, 2],
        );

        let result = validate_mesh(&mesh);

        assert_eq!(result.unreferenced_vertices, 1);
        assert!(result.summary().contains("1 unreferenced vertices"));
    }

    #[test]
    fn test_empty_mesh() {
        let result = validate_mesh(&Mesh::default());
        assert_eq!(result.total, 0);
        assert!(!result.has_issues());
    }
}

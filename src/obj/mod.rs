pub mod error;
pub mod importer;

pub use error::{ImportError, ImportResult};
pub use importer::{import, import_with};

use anyhow::{Context, Result};
use std::path::Path;

use crate::mesh::Mesh;

/// Options controlling how strictly OBJ text is interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOptions {
    /// Reject unknown directives with `ImportError::UnsupportedFeature`
    /// instead of logging and skipping them
    pub strict: bool,
}

impl ImportOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// Read an OBJ file from disk and import it
///
/// The underlying `ImportError` stays reachable through
/// `anyhow::Error::downcast_ref`.
pub fn load_file(path: &Path, options: &ImportOptions) -> Result<Mesh> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read OBJ file: {}", path.display()))?;

    let mesh = import_with(&contents, options)
        .with_context(|| format!("Failed to import OBJ file: {}", path.display()))?;

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tri.obj");
        fs::write(&path, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();

        let mesh = load_file(&path, &ImportOptions::default()).unwrap();

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.obj");

        let err = load_file(&path, &ImportOptions::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to read OBJ file"));
    }

    #[test]
    fn test_load_file_keeps_import_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.obj");
        fs::write(&path, "v 1.0 2.0\n").unwrap();

        let err = load_file(&path, &ImportOptions::default()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ImportError>(),
            Some(&ImportError::InvalidFormat { line: 1 })
        );
    }

    #[test]
    fn test_load_file_strict() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("smooth.obj");
        fs::write(&path, "v 0 0 0\ns 1\n").unwrap();

        assert!(load_file(&path, &ImportOptions::default()).is_ok());

        let err = load_file(&path, &ImportOptions::strict()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ImportError>(),
            Some(ImportError::UnsupportedFeature(name)) if name == "s"
        ));
    }
}

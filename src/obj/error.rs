use thiserror::Error;

/// Errors that abort an OBJ import
///
/// Malformed tokens inside an otherwise well-formed line never end up here;
/// they are defaulted or the affected triangle is dropped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// A `v` directive with fewer than three coordinates
    #[error("Invalid Format (line {line})")]
    InvalidFormat { line: usize },

    /// A directive rejected by strict mode
    #[error("Unsupported format feature: {0}")]
    UnsupportedFeature(String),
}

/// Result type for import operations
pub type ImportResult<T> = Result<T, ImportError>;

use std::path::PathBuf;

/// Error taxonomy for the conversion pipeline.
///
/// Reader-side failures (unreadable or structurally invalid source files)
/// surface as [`Format`](VariantDbError::Format); sink-side I/O failures as
/// [`Write`](VariantDbError::Write). Dropping a record with no ALT alleles
/// is normal, logged control flow and never produces an error.
#[derive(Debug, thiserror::Error)]
pub enum VariantDbError {
    /// The input file does not exist.
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    /// The input file could not be opened or is structurally invalid.
    #[error("Invalid variant file: {0}")]
    Format(String),

    /// The output file could not be written or closed.
    #[error("Error writing output: {0}")]
    Write(String),

    /// Path resolution failure.
    #[error("{0}")]
    PathAbs(#[from] path_abs::Error),

    /// JSON serialization failure.
    #[error("{0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Catch-all for anything not classified above.
    #[error("{0}")]
    Other(String),
}

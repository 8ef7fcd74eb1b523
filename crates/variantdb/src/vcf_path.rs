//! Input path validation for VCF file processing.
//!
//! [`VcfPath`] validates the input file path: it must exist and carry one of
//! the supported extensions (`vcf` for flat files, `gz`/`bgz` for
//! bgzip-compressed files).

use path_abs::{PathAbs, PathInfo};
use std::path::{Path, PathBuf};

use crate::err::VariantDbError;

const IN_EXTENSIONS: &[&str] = &["vcf", "gz", "bgz"];

/// Validated path to an input VCF file.
///
/// The path is resolved to an absolute path and checked for existence and a
/// supported extension at construction. A missing file is reported as
/// [`VariantDbError::InputNotFound`].
#[derive(Debug, Clone)]
pub struct VcfPath {
    /// Absolute path to the input VCF file.
    pub path: PathBuf,
    /// File extension of the input file (e.g. `"vcf"` or `"gz"`).
    pub extension: String,
}

impl VcfPath {
    /// Creates a new `VcfPath` after validating existence and extension.
    pub fn new(path: PathBuf) -> Result<Self, VariantDbError> {
        let p = Self::validate_path(path)?;
        let ext = Self::validate_in_extension(&p)?;
        Ok(Self { path: p, extension: ext })
    }

    /// Whether the file is bgzip/gzip-compressed, judged by extension.
    pub fn is_compressed(&self) -> bool {
        matches!(self.extension.as_str(), "gz" | "bgz")
    }

    fn validate_path(path: PathBuf) -> Result<PathBuf, VariantDbError> {
        let abs_path = PathAbs::new(path)?;

        if abs_path.exists() {
            Ok(abs_path.as_path().to_path_buf())
        } else {
            Err(VariantDbError::InputNotFound(
                abs_path.as_path().to_path_buf(),
            ))
        }
    }

    fn validate_in_extension(path: &Path) -> Result<String, VariantDbError> {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_owned())
            .map_or(
                Err(VariantDbError::Format(format!(
                    "File {} does not have an extension! Expecting one of: {}.",
                    path.to_string_lossy(),
                    IN_EXTENSIONS.join(", ")
                ))),
                |e| {
                    if IN_EXTENSIONS.iter().any(|&ext| ext == e) {
                        Ok(e)
                    } else {
                        Err(VariantDbError::Format(format!(
                            "Expecting extension {}. File {} does not have an expected extension!",
                            IN_EXTENSIONS.join(" or "),
                            path.to_string_lossy()
                        )))
                    }
                },
            )
    }
}

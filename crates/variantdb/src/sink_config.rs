//! Output configuration for the Parquet sink.
//!
//! [`SinkConfig`] captures the output file path, compression settings, and
//! overwrite behavior, decoupled from input path validation
//! ([`VcfPath`](crate::VcfPath)).

use log::warn;
use parquet::basic::{Compression as ParquetCompressionCodec, GzipLevel, ZstdLevel};
use std::path::{Path, PathBuf};

use crate::err::VariantDbError;

/// Parquet compression algorithm.
#[derive(Debug, Clone, Copy)]
pub enum ParquetCompression {
    /// No compression.
    Uncompressed,
    /// Snappy compression (fast, moderate ratio).
    Snappy,
    /// Gzip compression (levels 0-9).
    Gzip,
    /// Zstandard compression (levels 0-22).
    Zstd,
}

impl std::fmt::Display for ParquetCompression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uncompressed => f.write_str("uncompressed"),
            Self::Snappy => f.write_str("snappy"),
            Self::Gzip => f.write_str("gzip"),
            Self::Zstd => f.write_str("zstd"),
        }
    }
}

/// Validated output path and Parquet writer settings.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Output file path (`.parquet`).
    pub out_path: PathBuf,
    /// Whether to overwrite an existing output file.
    pub overwrite: bool,
    /// Optional Parquet compression algorithm (defaults to Snappy).
    pub compression: Option<ParquetCompression>,
    /// Optional Parquet compression level.
    pub compression_level: Option<u32>,
}

impl SinkConfig {
    /// Creates a new `SinkConfig` after validating the output path,
    /// extension, and compression settings.
    pub fn new(
        out_path: PathBuf,
        overwrite: bool,
        compression: Option<ParquetCompression>,
        compression_level: Option<u32>,
    ) -> Result<Self, VariantDbError> {
        let op = Self::validate_out_path(out_path, overwrite)?;
        let op = Self::validate_out_extension(&op)?;
        let cl = match compression {
            None => match compression_level {
                None => None,
                Some(_) => {
                    warn!("Ignoring value of --compression-level as --compression was not set");
                    None
                }
            },
            Some(pc) => Self::validate_compression_level(pc, compression_level)?,
        };

        Ok(Self {
            out_path: op,
            overwrite,
            compression,
            compression_level: cl,
        })
    }

    fn validate_out_extension(path: &Path) -> Result<PathBuf, VariantDbError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("parquet") => Ok(path.to_owned()),
            Some(e) => Err(VariantDbError::Other(format!(
                "Expecting extension parquet. Instead, file {} has extension {}.",
                path.to_string_lossy(),
                e
            ))),
            None => Err(VariantDbError::Other(format!(
                "File {} does not have an extension! Expecting extension parquet.",
                path.to_string_lossy()
            ))),
        }
    }

    /// Validates the output path's parent exists and handles overwrite logic.
    fn validate_out_path(path: PathBuf, overwrite: bool) -> Result<PathBuf, VariantDbError> {
        let abs_path = std::path::absolute(&path)
            .map_err(|e| VariantDbError::Other(format!("Failed to resolve path: {e}")))?;

        match abs_path.parent() {
            None => Err(VariantDbError::Other(format!(
                "The parent directory of the output path ({}) does not exist",
                abs_path.to_string_lossy()
            ))),
            Some(parent) => {
                if !parent.exists() {
                    return Err(VariantDbError::Other(format!(
                        "The parent directory of the output path ({}) does not exist",
                        parent.to_string_lossy()
                    )));
                }
                if abs_path.exists() && !overwrite {
                    return Err(VariantDbError::Other(format!(
                        "The output file - {} - already exists! To overwrite the file, utilize the --overwrite parameter",
                        abs_path.to_string_lossy()
                    )));
                }
                Ok(abs_path)
            }
        }
    }

    /// Validates the compression level is valid for the given algorithm.
    fn validate_compression_level(
        compression: ParquetCompression,
        compression_level: Option<u32>,
    ) -> Result<Option<u32>, VariantDbError> {
        let (name, max_level): (&str, Option<u32>) = match compression {
            ParquetCompression::Uncompressed => ("uncompressed", None),
            ParquetCompression::Snappy => ("snappy", None),
            ParquetCompression::Gzip => ("gzip", Some(9)),
            ParquetCompression::Zstd => ("zstd", Some(22)),
        };

        match (max_level, compression_level) {
            (None, None) => Ok(None),
            (None, Some(_)) => {
                warn!(
                    "Compression level is not required for compression={name}, ignoring value of --compression-level"
                );
                Ok(None)
            }
            (Some(_), None) => Ok(None),
            (Some(max), Some(c)) => {
                if c <= max {
                    Ok(Some(c))
                } else {
                    Err(VariantDbError::Other(format!(
                        "The compression level of {c} is not a valid level for {name} compression. \
                         Instead, please use values between 0-{max}."
                    )))
                }
            }
        }
    }
}

/// Resolves [`ParquetCompression`] and an optional level into a Parquet
/// compression codec. Defaults to Snappy when no compression is specified.
pub(crate) fn resolve_parquet_compression(
    compression: Option<ParquetCompression>,
    compression_level: Option<u32>,
) -> Result<ParquetCompressionCodec, VariantDbError> {
    let codec = match compression {
        Some(ParquetCompression::Uncompressed) => ParquetCompressionCodec::UNCOMPRESSED,
        Some(ParquetCompression::Snappy) => ParquetCompressionCodec::SNAPPY,
        Some(ParquetCompression::Gzip) => {
            if let Some(level) = compression_level {
                let gzip_level = GzipLevel::try_new(level).map_err(|e| {
                    VariantDbError::Other(format!("Invalid Gzip compression level: {e}"))
                })?;
                ParquetCompressionCodec::GZIP(gzip_level)
            } else {
                ParquetCompressionCodec::GZIP(GzipLevel::default())
            }
        }
        Some(ParquetCompression::Zstd) => {
            if let Some(level) = compression_level {
                let zstd_level = ZstdLevel::try_new(level as i32).map_err(|e| {
                    VariantDbError::Other(format!("Invalid Zstd compression level: {e}"))
                })?;
                ParquetCompressionCodec::ZSTD(zstd_level)
            } else {
                ParquetCompressionCodec::ZSTD(ZstdLevel::default())
            }
        }
        None => ParquetCompressionCodec::SNAPPY,
    };
    Ok(codec)
}

//! CLI argument types for the variantdb binary.

use clap::{Parser, Subcommand, ValueEnum, ValueHint};
use std::fmt;
use std::path::PathBuf;
use variantdb::ParquetCompression;

/// 🧬 Command-line tool for converting genomic variant files to Parquet
/// lookup tables
#[derive(Parser, Debug)]
#[command(version)]
#[command(propagate_version = true)]
pub struct VariantDbCli {
    /// Enable debug logging and a full diagnostic trace on failure
    #[arg(action, global = true, long, short = 'd')]
    pub debug: bool,

    #[command(subcommand)]
    pub command: VariantDbCommands,
}

/// CLI subcommands for variantdb.
#[derive(Debug, Subcommand)]
pub enum VariantDbCommands {
    /// Convert VCF variant data to a Parquet lookup table
    Convert {
        /// Path to input VCF file (flat or bgzip-compressed)
        #[arg(value_hint = ValueHint::FilePath, value_parser)]
        input: PathBuf,
        /// Path to output Parquet file
        #[arg(value_hint = ValueHint::FilePath, value_parser)]
        output: PathBuf,
        /// Number of qualifying rows per batch{n}↑ rows = ↑ memory usage{n}Defaults to 500,000 rows
        #[arg(long, short = 'b', value_parser = clap::value_parser!(u64).range(1..), default_value = "500000")]
        batch_size: u64,
        /// Overwrite output file if it already exists
        #[arg(action, long)]
        overwrite: bool,
        /// Parquet compression algorithm
        #[arg(long, value_enum, value_parser)]
        compression: Option<CliParquetCompression>,
        /// Parquet compression level (if applicable)
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=22))]
        compression_level: Option<u32>,
        /// Do not display progress bar
        #[arg(action, long)]
        no_progress: bool,
    },
    /// Display VCF header metadata
    Metadata {
        /// Path to VCF file (flat or bgzip-compressed)
        #[arg(value_hint = ValueHint::FilePath, value_parser)]
        input: PathBuf,
        /// Display metadata as json
        #[arg(action, long)]
        as_json: bool,
    },
}

/// CLI Parquet compression algorithm (with clap `ValueEnum` derive).
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliParquetCompression {
    /// No compression.
    Uncompressed,
    /// Snappy compression (fast, moderate ratio).
    Snappy,
    /// Gzip compression (levels 0-9).
    Gzip,
    /// Zstandard compression (levels 0-22).
    Zstd,
}

impl From<CliParquetCompression> for ParquetCompression {
    fn from(c: CliParquetCompression) -> Self {
        match c {
            CliParquetCompression::Uncompressed => ParquetCompression::Uncompressed,
            CliParquetCompression::Snappy => ParquetCompression::Snappy,
            CliParquetCompression::Gzip => ParquetCompression::Gzip,
            CliParquetCompression::Zstd => ParquetCompression::Zstd,
        }
    }
}

impl fmt::Display for CliParquetCompression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uncompressed => f.write_str("uncompressed"),
            Self::Snappy => f.write_str("snappy"),
            Self::Gzip => f.write_str("gzip"),
            Self::Zstd => f.write_str("zstd"),
        }
    }
}

//! Convert genomic variant files (VCF) into Parquet lookup tables.
//!
//! This crate provides both a CLI tool and a library for streaming variant
//! records out of a VCF file (flat or bgzip-compressed) and into an Apache
//! Parquet file with a fixed two-column lookup schema (`RSID`, `ID`). It is
//! built for very large sources, such as a full dbSNP release with hundreds
//! of millions of records, and keeps memory bounded by accumulating rows
//! into batches of a configured size before handing them to the writer.
//!
//! # Data Pipeline
//!
//! ```text
//! .vcf / .vcf.gz file
//!     → VcfReader (lazy, forward-only record iterator)
//!         → row_from_record (filter + map to RSID/ID rows)
//!             → BatchAccumulator (Arrow string builders)
//!                 → ParquetSink (one row group per batch)
//! ```
//!
//! # Quick Start
//!
//! ```no_run
//! use variantdb::{ConvertOptions, SinkConfig, VcfPath, convert};
//!
//! # fn main() -> Result<(), variantdb::VariantDbError> {
//! let input = VcfPath::new("dbsnp.vcf.gz".into())?;
//! let sink = SinkConfig::new("dbsnp.parquet".into(), false, None, None)?;
//!
//! let summary = convert(&input, &sink, &ConvertOptions::default(), None)?;
//! println!("wrote {} rows", summary.rows_written);
//! # Ok(())
//! # }
//! ```
//!
//! # Key Types
//!
//! - [`VcfPath`] — Validated input path (existence, extension, compression)
//! - [`VcfReader`] — Lazy iterator of [`VariantRecord`]s, handle released on drop
//! - [`BatchAccumulator`] — Buffers rows into Arrow [`RecordBatch`](arrow_array::RecordBatch)es
//! - [`ParquetSink`] — Owns the output file handle; closed exactly once
//! - [`ConvertSummary`] — Row/batch accounting for a completed run
//!
//! # Resource Safety
//!
//! The pipeline is single-threaded and synchronous. The sink is always
//! closed before [`convert`] returns, on success and on error alike, so the
//! output file is left structurally valid (possibly with fewer rows than
//! expected) rather than truncated mid-write.

#![warn(missing_docs)]

pub use batch::{BatchAccumulator, lookup_schema};
pub use common::format_with_commas;
pub use convert::{
    ConvertOptions, ConvertSummary, DEFAULT_BATCH_SIZE, PROGRESS_INTERVAL, convert,
    convert_with_sink,
};
pub use err::VariantDbError;
pub use progress::ProgressCallback;
pub use sink::{BatchSink, ParquetSink};
pub use sink_config::{ParquetCompression, SinkConfig};
pub use transform::{Row, row_from_record};
pub use vcf_metadata::VcfMetadata;
pub use vcf_path::VcfPath;
pub use vcf_reader::VcfReader;
pub use vcf_record::VariantRecord;

mod batch;
mod common;
mod convert;
mod err;
mod progress;
mod sink;
mod sink_config;
mod transform;
mod vcf_metadata;
mod vcf_path;
mod vcf_reader;
mod vcf_record;

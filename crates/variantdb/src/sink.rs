//! The columnar sink: an append-only Parquet writer with a strict
//! `Open → Writing → Closed` lifecycle.

use arrow_array::RecordBatch;
use arrow_schema::SchemaRef;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::{EnabledStatistics, WriterProperties, WriterVersion};
use std::fs::{File, OpenOptions};
use std::io::BufWriter;

use crate::err::VariantDbError;
use crate::sink_config::{SinkConfig, resolve_parquet_compression};

/// Destination for the batches produced by the conversion pipeline.
///
/// Batches must be written strictly in the order they are produced; there is
/// one sink instance per conversion and no concurrent writers. The pipeline
/// invokes `close` on every exit path before the instance is discarded, so
/// the on-disk file is always left in a structurally valid state.
pub trait BatchSink {
    /// Appends one batch to the output. Invalid after [`close`](Self::close).
    fn write_batch(&mut self, batch: &RecordBatch) -> Result<(), VariantDbError>;

    /// Finalizes the output. Safe to call more than once; only the first
    /// call does work.
    fn close(&mut self) -> Result<(), VariantDbError>;
}

/// [`BatchSink`] backed by a Parquet file.
///
/// The inner writer lives in an `Option` so that `close` can transfer
/// ownership out exactly once; the file handle is owned exclusively by this
/// sink for the duration of the conversion.
pub struct ParquetSink {
    wtr: Option<ArrowWriter<BufWriter<File>>>,
}

impl ParquetSink {
    /// Creates (or truncates) the output file and binds the schema to it.
    pub fn new(config: &SinkConfig, schema: SchemaRef) -> Result<Self, VariantDbError> {
        let f = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&config.out_path)
            .map_err(|e| {
                VariantDbError::Write(format!(
                    "failed to create {}: {e}",
                    config.out_path.display()
                ))
            })?;

        let codec = resolve_parquet_compression(config.compression, config.compression_level)?;
        let props = WriterProperties::builder()
            .set_compression(codec)
            .set_statistics_enabled(EnabledStatistics::Page)
            .set_writer_version(WriterVersion::PARQUET_2_0)
            .build();

        let wtr = ArrowWriter::try_new(BufWriter::new(f), schema, Some(props))
            .map_err(|e| VariantDbError::Write(e.to_string()))?;

        Ok(Self { wtr: Some(wtr) })
    }
}

impl BatchSink for ParquetSink {
    fn write_batch(&mut self, batch: &RecordBatch) -> Result<(), VariantDbError> {
        let Some(wtr) = self.wtr.as_mut() else {
            return Err(VariantDbError::Write(
                "parquet writer is already closed".to_string(),
            ));
        };
        wtr.write(batch)
            .map_err(|e| VariantDbError::Write(e.to_string()))?;
        // Flush each batch as its own row group so the batch boundaries
        // remain observable in the output file.
        wtr.flush().map_err(|e| VariantDbError::Write(e.to_string()))
    }

    fn close(&mut self) -> Result<(), VariantDbError> {
        if let Some(wtr) = self.wtr.take() {
            wtr.close().map_err(|e| VariantDbError::Write(e.to_string()))?;
        }
        Ok(())
    }
}

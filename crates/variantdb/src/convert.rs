//! The streaming conversion pipeline: read, transform, accumulate, write.

use log::info;
use std::sync::Arc;

use crate::batch::{BatchAccumulator, lookup_schema};
use crate::common::format_with_commas;
use crate::err::VariantDbError;
use crate::progress::ProgressCallback;
use crate::sink::{BatchSink, ParquetSink};
use crate::sink_config::SinkConfig;
use crate::transform::row_from_record;
use crate::vcf_path::VcfPath;
use crate::vcf_reader::VcfReader;
use crate::vcf_record::VariantRecord;

/// Default number of qualifying rows per output batch.
pub const DEFAULT_BATCH_SIZE: usize = 500_000;

/// Number of qualifying rows between progress events.
pub const PROGRESS_INTERVAL: u64 = 100_000;

/// Tunable parameters for a conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Number of qualifying rows per batch; must be at least 1.
    pub batch_size: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Row and batch accounting for a completed conversion.
///
/// Invariant: `rows_written == records_seen - records_dropped`. Every
/// qualifying record yields exactly one row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Total variant records read from the source.
    pub records_seen: u64,
    /// Records dropped for having no ALT alleles.
    pub records_dropped: u64,
    /// Rows handed to the sink.
    pub rows_written: u64,
    /// Batches handed to the sink.
    pub batches_written: u64,
}

/// Converts the VCF file at `input` into a Parquet file per `sink_config`.
///
/// Single-threaded and synchronous: one logical thread drives reading,
/// transforming, accumulating, and writing in lockstep. The sink is closed
/// before this function returns on every path, success or error.
pub fn convert(
    input: &VcfPath,
    sink_config: &SinkConfig,
    options: &ConvertOptions,
    progress: Option<Arc<dyn ProgressCallback>>,
) -> Result<ConvertSummary, VariantDbError> {
    let reader = VcfReader::from_path(input)?;
    let sink = ParquetSink::new(sink_config, lookup_schema())?;

    if let Some(ref p) = progress {
        p.conversion_started(&input.path.to_string_lossy());
    }
    info!(
        "Starting conversion of {} to {}",
        input.path.display(),
        sink_config.out_path.display()
    );
    info!("Batch size: {}", format_with_commas(options.batch_size as u64));

    convert_with_sink(reader, sink, options, progress)
}

/// Drives the pipeline over any record source and any [`BatchSink`].
///
/// The sink is always closed before returning: on success a close failure
/// surfaces as the run's error; on failure the close is best-effort and the
/// original error wins.
pub fn convert_with_sink<S: BatchSink>(
    reader: impl IntoIterator<Item = Result<VariantRecord, VariantDbError>>,
    mut sink: S,
    options: &ConvertOptions,
    progress: Option<Arc<dyn ProgressCallback>>,
) -> Result<ConvertSummary, VariantDbError> {
    let result = drive(reader, &mut sink, options, progress);

    match result {
        Ok(summary) => {
            sink.close()?;
            info!(
                "Conversion completed successfully: {} rows in {} batches",
                format_with_commas(summary.rows_written),
                summary.batches_written
            );
            Ok(summary)
        }
        Err(e) => {
            let _ = sink.close();
            Err(e)
        }
    }
}

fn drive<S: BatchSink>(
    reader: impl IntoIterator<Item = Result<VariantRecord, VariantDbError>>,
    sink: &mut S,
    options: &ConvertOptions,
    progress: Option<Arc<dyn ProgressCallback>>,
) -> Result<ConvertSummary, VariantDbError> {
    if options.batch_size == 0 {
        return Err(VariantDbError::Other(
            "batch size must be at least 1".to_string(),
        ));
    }
    let batch_size = options.batch_size as u64;

    let mut acc = BatchAccumulator::new();
    let mut summary = ConvertSummary::default();

    for record in reader {
        let record = record?;
        summary.records_seen += 1;

        let Some(row) = row_from_record(&record) else {
            summary.records_dropped += 1;
            continue;
        };
        acc.append(&row);
        summary.rows_written += 1;

        // The trigger is the global qualifying-row counter modulo batch
        // size, not the buffer length.
        if summary.rows_written % batch_size == 0 {
            let batch = acc.flush()?;
            sink.write_batch(&batch)?;
            summary.batches_written += 1;
            info!(
                "Processed {} variants | batch of {} rows written",
                format_with_commas(summary.rows_written),
                batch.num_rows()
            );
            drop(batch);
        }

        if summary.rows_written % PROGRESS_INTERVAL == 0 {
            info!(
                "Progress: {} variants processed",
                format_with_commas(summary.rows_written)
            );
            if let Some(ref p) = progress {
                p.inc(PROGRESS_INTERVAL);
            }
        }
    }

    if !acc.is_empty() {
        let batch = acc.flush()?;
        sink.write_batch(&batch)?;
        summary.batches_written += 1;
        info!(
            "Final batch of {} rows written ({} total variants)",
            batch.num_rows(),
            format_with_commas(summary.rows_written)
        );
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow_array::RecordBatch;
    use arrow_array::cast::AsArray;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn record(n: u64, alts: &[&str]) -> Result<VariantRecord, VariantDbError> {
        Ok(VariantRecord {
            chrom: "chr1".to_string(),
            id: Some(format!("rs{n}")),
            ref_allele: "A".to_string(),
            alt_alleles: alts.iter().map(|s| s.to_string()).collect(),
            end: n,
        })
    }

    /// Sink that records batch sizes and close calls in memory.
    #[derive(Default)]
    struct RecordingSink {
        batch_sizes: Arc<Mutex<Vec<usize>>>,
        ids: Arc<Mutex<Vec<String>>>,
        closes: Arc<AtomicUsize>,
        fail_on_batch: Option<usize>,
        batches_seen: usize,
    }

    impl BatchSink for RecordingSink {
        fn write_batch(&mut self, batch: &RecordBatch) -> Result<(), VariantDbError> {
            self.batches_seen += 1;
            if self.fail_on_batch == Some(self.batches_seen) {
                return Err(VariantDbError::Write("injected write failure".to_string()));
            }
            self.batch_sizes.lock().unwrap().push(batch.num_rows());
            let ids = batch.column(1).as_string::<i32>();
            self.ids
                .lock()
                .unwrap()
                .extend(ids.iter().map(|v| v.unwrap().to_string()));
            Ok(())
        }

        fn close(&mut self) -> Result<(), VariantDbError> {
            self.closes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn batch_boundary_law() {
        // Batch size 2 over 5 qualifying records: exactly [2, 2, 1].
        let records: Vec<_> = (1..=5).map(|n| record(n, &["G"])).collect();
        let sink = RecordingSink::default();
        let sizes = sink.batch_sizes.clone();
        let ids = sink.ids.clone();

        let summary =
            convert_with_sink(records, sink, &ConvertOptions { batch_size: 2 }, None).unwrap();

        assert_eq!(summary.batches_written, 3);
        assert_eq!(summary.rows_written, 5);
        assert_eq!(*sizes.lock().unwrap(), vec![2, 2, 1]);
        assert_eq!(
            *ids.lock().unwrap(),
            vec![
                "chr1_1_A_G",
                "chr1_2_A_G",
                "chr1_3_A_G",
                "chr1_4_A_G",
                "chr1_5_A_G"
            ]
        );
    }

    #[test]
    fn dropped_records_do_not_count_toward_batches() {
        let records = vec![
            record(1, &["G"]),
            record(2, &[]),
            record(3, &["T"]),
            record(4, &[]),
            record(5, &["C"]),
        ];
        let sink = RecordingSink::default();
        let sizes = sink.batch_sizes.clone();

        let summary =
            convert_with_sink(records, sink, &ConvertOptions { batch_size: 2 }, None).unwrap();

        assert_eq!(summary.records_seen, 5);
        assert_eq!(summary.records_dropped, 2);
        assert_eq!(summary.rows_written, 3);
        assert_eq!(summary.rows_written, summary.records_seen - summary.records_dropped);
        assert_eq!(*sizes.lock().unwrap(), vec![2, 1]);
    }

    #[test]
    fn exact_multiple_produces_no_trailing_batch() {
        let records: Vec<_> = (1..=4).map(|n| record(n, &["G"])).collect();
        let sink = RecordingSink::default();
        let sizes = sink.batch_sizes.clone();

        let summary =
            convert_with_sink(records, sink, &ConvertOptions { batch_size: 2 }, None).unwrap();

        assert_eq!(summary.batches_written, 2);
        assert_eq!(*sizes.lock().unwrap(), vec![2, 2]);
    }

    #[test]
    fn empty_source_writes_no_batches_and_closes() {
        let sink = RecordingSink::default();
        let closes = sink.closes.clone();

        let summary =
            convert_with_sink(Vec::new(), sink, &ConvertOptions::default(), None).unwrap();

        assert_eq!(summary, ConvertSummary::default());
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn sink_failure_still_closes_and_surfaces_write_error() {
        let records: Vec<_> = (1..=5).map(|n| record(n, &["G"])).collect();
        let sink = RecordingSink {
            fail_on_batch: Some(2),
            ..Default::default()
        };
        let closes = sink.closes.clone();

        let err = convert_with_sink(records, sink, &ConvertOptions { batch_size: 2 }, None)
            .unwrap_err();

        assert!(matches!(err, VariantDbError::Write(_)));
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn reader_failure_still_closes_the_sink() {
        let records = vec![
            record(1, &["G"]),
            Err(VariantDbError::Format("bad line".to_string())),
        ];
        let sink = RecordingSink::default();
        let closes = sink.closes.clone();

        let err =
            convert_with_sink(records, sink, &ConvertOptions::default(), None).unwrap_err();

        assert!(matches!(err, VariantDbError::Format(_)));
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let sink = RecordingSink::default();
        let err = convert_with_sink(Vec::new(), sink, &ConvertOptions { batch_size: 0 }, None)
            .unwrap_err();
        assert!(matches!(err, VariantDbError::Other(_)));
    }
}

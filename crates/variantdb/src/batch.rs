//! In-memory accumulation of rows into Arrow record batches.

use arrow_array::builder::StringBuilder;
use arrow_array::{ArrayRef, RecordBatch};
use arrow_schema::{DataType, Field, Schema, SchemaRef};
use std::sync::Arc;

use crate::err::VariantDbError;
use crate::transform::Row;

/// The fixed two-column output schema: `RSID` (nullable) and `ID`.
///
/// Column names are uppercase to match the lookup tables that downstream
/// consumers already read.
pub fn lookup_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("RSID", DataType::Utf8, true),
        Field::new("ID", DataType::Utf8, false),
    ]))
}

/// Buffers rows into Arrow string builders until the pipeline flushes.
///
/// The accumulator exclusively owns its in-flight buffer; `flush` hands the
/// buffered rows off as an immutable [`RecordBatch`] and resets the
/// builders, so no partial batch can ever be handed off twice.
pub struct BatchAccumulator {
    schema: SchemaRef,
    rsid: StringBuilder,
    id: StringBuilder,
    len: usize,
}

impl BatchAccumulator {
    /// Creates an empty accumulator over [`lookup_schema`].
    pub fn new() -> Self {
        Self {
            schema: lookup_schema(),
            rsid: StringBuilder::new(),
            id: StringBuilder::new(),
            len: 0,
        }
    }

    /// Appends one row to the in-flight buffer.
    pub fn append(&mut self, row: &Row) {
        match &row.rsid {
            Some(rsid) => self.rsid.append_value(rsid),
            None => self.rsid.append_null(),
        }
        self.id.append_value(&row.id);
        self.len += 1;
    }

    /// Number of buffered rows.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer currently holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Hands off the buffered rows as a [`RecordBatch`] and resets the buffer.
    pub fn flush(&mut self) -> Result<RecordBatch, VariantDbError> {
        let rsid = Arc::new(self.rsid.finish()) as ArrayRef;
        let id = Arc::new(self.id.finish()) as ArrayRef;
        self.len = 0;

        RecordBatch::try_new(self.schema.clone(), vec![rsid, id])
            .map_err(|e| VariantDbError::Other(format!("failed to assemble record batch: {e}")))
    }
}

impl Default for BatchAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

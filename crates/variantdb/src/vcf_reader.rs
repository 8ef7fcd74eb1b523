//! Lazy, forward-only reading of variant records from a VCF file.
//!
//! [`VcfReader`] opens a flat or bgzip-compressed VCF file and yields
//! [`VariantRecord`]s one at a time. The underlying file handle is owned by
//! the reader and released on drop, on every exit path: normal exhaustion,
//! early termination by the consumer, or a mid-stream error. The sequence
//! is finite and not restartable; a second pass requires reopening.

use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};

use crate::err::VariantDbError;
use crate::vcf_path::VcfPath;
use crate::vcf_record::VariantRecord;

/// Streaming iterator over the variant records of a single VCF file.
pub struct VcfReader {
    rdr: Box<dyn BufRead>,
    line: String,
    line_no: u64,
}

impl std::fmt::Debug for VcfReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VcfReader")
            .field("line_no", &self.line_no)
            .finish_non_exhaustive()
    }
}

impl VcfReader {
    /// Opens the file at `input` and validates its leading header line.
    ///
    /// Fails with [`VariantDbError::Format`] if the file cannot be read or
    /// does not start with a `##fileformat=VCF` line.
    pub fn from_path(input: &VcfPath) -> Result<Self, VariantDbError> {
        let mut rdr = open_source(input)?;

        let mut first = String::new();
        let n = rdr.read_line(&mut first).map_err(|e| {
            VariantDbError::Format(format!("failed to read {}: {e}", input.path.display()))
        })?;
        if n == 0 || !first.starts_with("##fileformat=VCF") {
            return Err(VariantDbError::Format(format!(
                "{}: missing ##fileformat=VCF header line",
                input.path.display()
            )));
        }

        Ok(Self {
            rdr,
            line: String::new(),
            line_no: 1,
        })
    }
}

impl Iterator for VcfReader {
    type Item = Result<VariantRecord, VariantDbError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line.clear();
            match self.rdr.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    return Some(Err(VariantDbError::Format(format!(
                        "read error after line {}: {e}",
                        self.line_no
                    ))));
                }
            }
            self.line_no += 1;

            let line = self.line.trim_end_matches(['\n', '\r']);
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            return Some(VariantRecord::parse(line, self.line_no));
        }
    }
}

/// Opens the source file, layering a gzip decoder for compressed inputs.
///
/// bgzip files are valid multi-member gzip streams, so [`MultiGzDecoder`]
/// handles both `.gz` and `.bgz` inputs.
pub(crate) fn open_source(input: &VcfPath) -> Result<Box<dyn BufRead>, VariantDbError> {
    let f = File::open(&input.path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => VariantDbError::InputNotFound(input.path.clone()),
        _ => VariantDbError::Format(format!(
            "failed to open {}: {e}",
            input.path.display()
        )),
    })?;

    if input.is_compressed() {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(f))))
    } else {
        Ok(Box::new(BufReader::new(f)))
    }
}

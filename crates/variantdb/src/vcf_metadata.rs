//! VCF header metadata: format version, contigs, and sample names.

use serde::Serialize;
use std::io::BufRead;

use crate::err::VariantDbError;
use crate::vcf_path::VcfPath;
use crate::vcf_reader::open_source;

/// Summary of a VCF file's header section.
///
/// Reading stops at the `#CHROM` column line (or the first data line), so
/// collecting metadata is cheap even for multi-gigabyte sources.
#[derive(Debug, Default, Serialize)]
pub struct VcfMetadata {
    /// Value of the `##fileformat=` line (e.g. `"VCFv4.2"`).
    pub file_format: String,
    /// Total number of header lines, including the `#CHROM` line.
    pub header_line_count: usize,
    /// Number of `##contig=` declarations.
    pub contig_count: usize,
    /// Sample names from the `#CHROM` line, if any.
    pub sample_names: Vec<String>,
}

impl VcfMetadata {
    /// Reads header metadata from the file at `input`.
    pub fn read(input: &VcfPath) -> Result<Self, VariantDbError> {
        let rdr = open_source(input)?;
        let mut md = Self::default();
        let mut saw_fileformat = false;

        for line in rdr.lines() {
            let line = line.map_err(|e| {
                VariantDbError::Format(format!("failed to read {}: {e}", input.path.display()))
            })?;

            if !saw_fileformat {
                let Some(ff) = line.strip_prefix("##fileformat=") else {
                    return Err(VariantDbError::Format(format!(
                        "{}: missing ##fileformat header line",
                        input.path.display()
                    )));
                };
                md.file_format = ff.to_string();
                md.header_line_count = 1;
                saw_fileformat = true;
                continue;
            }

            if let Some(rest) = line.strip_prefix("##") {
                md.header_line_count += 1;
                if rest.starts_with("contig=") {
                    md.contig_count += 1;
                }
            } else if let Some(rest) = line.strip_prefix('#') {
                // #CHROM POS ID REF ALT QUAL FILTER INFO [FORMAT sample...]
                md.header_line_count += 1;
                md.sample_names = rest.split('\t').skip(9).map(str::to_string).collect();
                break;
            } else {
                break;
            }
        }

        if !saw_fileformat {
            return Err(VariantDbError::Format(format!(
                "{}: empty file",
                input.path.display()
            )));
        }
        Ok(md)
    }

    /// Serializes the metadata as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, VariantDbError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the metadata to stdout in a human-readable format.
    pub fn write_stdout(&self, input: &VcfPath) {
        println!("Metadata for the file {}\n", input.path.to_string_lossy());
        println!("File format: {}", self.file_format);
        println!("Header lines: {}", self.header_line_count);
        println!("Contigs: {}", self.contig_count);
        println!("Sample count: {}", self.sample_names.len());
        if !self.sample_names.is_empty() {
            println!("Sample names: {}", self.sample_names.join(", "));
        }
    }
}

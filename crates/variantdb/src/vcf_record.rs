//! A single parsed entry from a VCF file.

use crate::err::VariantDbError;

/// One variant record: a genomic position, a reference allele, and zero or
/// more alternate alleles.
///
/// Produced by [`VcfReader`](crate::VcfReader); read-only and not retained
/// beyond one iteration step of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRecord {
    /// Chromosome or contig name (e.g. `"NC_000001.11"`, `"chr1"`).
    pub chrom: String,
    /// Variant identifier; `None` when the ID column is `.`.
    pub id: Option<String>,
    /// Reference allele.
    pub ref_allele: String,
    /// Alternate alleles, in column order; empty when the ALT column is `.`.
    pub alt_alleles: Vec<String>,
    /// End position: the `END=` INFO value when present, otherwise
    /// `POS + len(REF) - 1`.
    pub end: u64,
}

impl VariantRecord {
    /// Parses one tab-separated VCF data line.
    ///
    /// `line_no` is the 1-based line number in the source file, used in
    /// error messages only.
    pub(crate) fn parse(line: &str, line_no: u64) -> Result<Self, VariantDbError> {
        // CHROM POS ID REF ALT QUAL FILTER INFO [FORMAT samples...]
        let fields: Vec<&str> = line.splitn(9, '\t').collect();
        if fields.len() < 8 {
            return Err(VariantDbError::Format(format!(
                "line {line_no}: expected at least 8 tab-separated fields, found {}",
                fields.len()
            )));
        }

        let chrom = fields[0].to_string();
        let pos: u64 = fields[1].parse().map_err(|_| {
            VariantDbError::Format(format!(
                "line {line_no}: invalid POS value {:?}",
                fields[1]
            ))
        })?;

        let id = match fields[2] {
            "." => None,
            s => Some(s.to_string()),
        };

        let ref_allele = fields[3].to_string();
        if ref_allele.is_empty() {
            return Err(VariantDbError::Format(format!(
                "line {line_no}: missing REF allele"
            )));
        }

        let alt_alleles: Vec<String> = match fields[4] {
            "." | "" => Vec::new(),
            s => s.split(',').map(str::to_string).collect(),
        };

        let end = info_end(fields[7]).unwrap_or(pos + ref_allele.len() as u64 - 1);

        Ok(Self {
            chrom,
            id,
            ref_allele,
            alt_alleles,
            end,
        })
    }
}

/// Extracts the value of an `END=` key from the INFO column, if present.
fn info_end(info: &str) -> Option<u64> {
    info.split(';')
        .find_map(|kv| kv.strip_prefix("END=").and_then(|v| v.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_snv_line() {
        let line = "chr1\t10177\trs367896724\tA\tAC\t.\t.\t.";
        let rec = VariantRecord::parse(line, 1).unwrap();
        assert_eq!(rec.chrom, "chr1");
        assert_eq!(rec.id.as_deref(), Some("rs367896724"));
        assert_eq!(rec.ref_allele, "A");
        assert_eq!(rec.alt_alleles, vec!["AC"]);
        assert_eq!(rec.end, 10177);
    }

    #[test]
    fn end_spans_reference_allele() {
        let line = "chr2\t100\trs1\tACGT\tA\t.\t.\t.";
        let rec = VariantRecord::parse(line, 1).unwrap();
        assert_eq!(rec.end, 103);
    }

    #[test]
    fn info_end_overrides_computed_end() {
        let line = "chr2\t100\trs1\tA\t<DEL>\t.\t.\tSVTYPE=DEL;END=250";
        let rec = VariantRecord::parse(line, 1).unwrap();
        assert_eq!(rec.end, 250);
    }

    #[test]
    fn dot_id_is_none() {
        let line = "chr1\t5\t.\tG\tT\t.\t.\t.";
        let rec = VariantRecord::parse(line, 1).unwrap();
        assert_eq!(rec.id, None);
    }

    #[test]
    fn dot_alt_is_empty() {
        let line = "chr1\t5\trs2\tG\t.\t.\t.\t.";
        let rec = VariantRecord::parse(line, 1).unwrap();
        assert!(rec.alt_alleles.is_empty());
    }

    #[test]
    fn multiallelic_alt_preserves_order() {
        let line = "chr1\t5\trs3\tG\tT,C,A\t.\t.\t.";
        let rec = VariantRecord::parse(line, 1).unwrap();
        assert_eq!(rec.alt_alleles, vec!["T", "C", "A"]);
    }

    #[test]
    fn sample_columns_are_ignored() {
        let line = "chr1\t5\trs4\tG\tT\t30\tPASS\tDP=10\tGT\t0/1\t1/1";
        let rec = VariantRecord::parse(line, 1).unwrap();
        assert_eq!(rec.alt_alleles, vec!["T"]);
    }

    #[test]
    fn too_few_fields_is_format_error() {
        let err = VariantRecord::parse("chr1\t5\trs5\tG\tT", 7).unwrap_err();
        assert!(matches!(err, VariantDbError::Format(_)));
        assert!(err.to_string().contains("line 7"));
    }

    #[test]
    fn non_numeric_pos_is_format_error() {
        let err = VariantRecord::parse("chr1\tabc\trs6\tG\tT\t.\t.\t.", 3).unwrap_err();
        assert!(matches!(err, VariantDbError::Format(_)));
    }

    #[test]
    fn info_end_ignores_other_keys() {
        assert_eq!(info_end("RS=123;BEND=9;END=42;DP=7"), Some(42));
        assert_eq!(info_end("RS=123;DP=7"), None);
        assert_eq!(info_end("."), None);
    }
}

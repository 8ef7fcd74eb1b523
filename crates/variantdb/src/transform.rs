//! Pure filter + map from a [`VariantRecord`] to an output [`Row`].

use log::warn;

use crate::vcf_record::VariantRecord;

/// One flat output row: an optional RSID and a derived lookup identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// The source record's identifier; `None` when the source had no ID.
    pub rsid: Option<String>,
    /// Lookup key in the form `"{chrom}_{end}_{ref}_{alt[0]}"`.
    pub id: String,
}

/// Transforms a variant record into zero or one output row.
///
/// Records with no ALT alleles are dropped with a warning; that is normal
/// control flow, not an error. When multiple ALT alleles are present only
/// the first feeds the derived id and no row is emitted per additional
/// allele. This loses multi-allelic information but matches the lookup
/// tables already in use; do not change it without confirming downstream
/// consumers first.
pub fn row_from_record(record: &VariantRecord) -> Option<Row> {
    let Some(alt) = record.alt_alleles.first() else {
        warn!(
            "Skipping variant {}: no ALT alleles (end={})",
            record.id.as_deref().unwrap_or("."),
            record.end
        );
        return None;
    };

    Some(Row {
        rsid: record.id.clone(),
        id: format!(
            "{}_{}_{}_{}",
            record.chrom, record.end, record.ref_allele, alt
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: Option<&str>, alts: &[&str]) -> VariantRecord {
        VariantRecord {
            chrom: "chr1".to_string(),
            id: id.map(str::to_string),
            ref_allele: "A".to_string(),
            alt_alleles: alts.iter().map(|s| s.to_string()).collect(),
            end: 12345,
        }
    }

    #[test]
    fn derives_id_from_first_alt_only() {
        let row = row_from_record(&record(Some("rs42"), &["G", "T", "C"])).unwrap();
        assert_eq!(row.id, "chr1_12345_A_G");
        assert_eq!(row.rsid.as_deref(), Some("rs42"));
    }

    #[test]
    fn single_alt_matches_multiallelic_first() {
        let single = row_from_record(&record(Some("rs42"), &["G"])).unwrap();
        let multi = row_from_record(&record(Some("rs42"), &["G", "T"])).unwrap();
        assert_eq!(single.id, multi.id);
    }

    #[test]
    fn no_alt_yields_no_row() {
        assert!(row_from_record(&record(Some("rs42"), &[])).is_none());
    }

    #[test]
    fn missing_source_id_yields_null_rsid() {
        let row = row_from_record(&record(None, &["G"])).unwrap();
        assert_eq!(row.rsid, None);
        assert_eq!(row.id, "chr1_12345_A_G");
    }

    #[test]
    fn transform_is_deterministic() {
        let rec = record(Some("rs42"), &["G", "T"]);
        assert_eq!(row_from_record(&rec), row_from_record(&rec));
    }
}

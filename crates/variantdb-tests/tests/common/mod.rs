use arrow_array::cast::AsArray;
use arrow_array::Array;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// A small VCF body: five qualifying records and one with no ALT alleles.
#[allow(dead_code)]
pub fn sample_vcf() -> String {
    let mut s = String::from(
        "##fileformat=VCFv4.2\n\
         ##contig=<ID=chr1>\n\
         #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n",
    );
    for line in [
        "chr1\t100\trs100\tA\tG\t.\t.\t.",
        "chr1\t200\trs200\tC\tT,G\t.\t.\t.",
        "chr1\t300\trs300\tG\t.\t.\t.\t.",
        "chr1\t400\t.\tT\tA\t.\t.\t.",
        "chr1\t500\trs500\tAC\tA\t.\t.\t.",
        "chr1\t600\trs600\tG\tC\t.\t.\tEND=650",
    ] {
        s.push_str(line);
        s.push('\n');
    }
    s
}

/// The `(RSID, ID)` pairs expected from [`sample_vcf`], in source order.
#[allow(dead_code)]
pub fn expected_sample_rows() -> Vec<(Option<String>, String)> {
    vec![
        (Some("rs100".into()), "chr1_100_A_G".into()),
        (Some("rs200".into()), "chr1_200_C_T".into()),
        (None, "chr1_400_T_A".into()),
        (Some("rs500".into()), "chr1_501_AC_A".into()),
        (Some("rs600".into()), "chr1_650_G_C".into()),
    ]
}

#[allow(dead_code)]
pub fn write_vcf(path: &Path, contents: &str) {
    std::fs::write(path, contents).unwrap();
}

#[allow(dead_code)]
pub fn write_vcf_gz(path: &Path, contents: &str) {
    let f = File::create(path).unwrap();
    let mut enc = flate2::write::GzEncoder::new(f, flate2::Compression::default());
    enc.write_all(contents.as_bytes()).unwrap();
    enc.finish().unwrap();
}

/// Reads all `(RSID, ID)` pairs from a Parquet file, in order.
#[allow(dead_code)]
pub fn read_rows(path: &Path) -> Vec<(Option<String>, String)> {
    let f = File::open(path).unwrap();
    let rdr = ParquetRecordBatchReaderBuilder::try_new(f)
        .unwrap()
        .build()
        .unwrap();

    let mut rows = Vec::new();
    for batch in rdr {
        let batch = batch.unwrap();
        let rsid = batch.column(0).as_string::<i32>();
        let id = batch.column(1).as_string::<i32>();
        for i in 0..batch.num_rows() {
            let r = if rsid.is_null(i) {
                None
            } else {
                Some(rsid.value(i).to_string())
            };
            rows.push((r, id.value(i).to_string()));
        }
    }
    rows
}

/// Row counts of each row group in a Parquet file, in file order.
#[allow(dead_code)]
pub fn row_group_sizes(path: &Path) -> Vec<i64> {
    let f = File::open(path).unwrap();
    let builder = ParquetRecordBatchReaderBuilder::try_new(f).unwrap();
    builder
        .metadata()
        .row_groups()
        .iter()
        .map(|rg| rg.num_rows())
        .collect()
}

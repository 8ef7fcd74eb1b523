//! CLI dispatch logic for the variantdb binary.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use std::path::Path;
use std::sync::Arc;

use variantdb::{
    ConvertOptions, ConvertSummary, ProgressCallback, SinkConfig, VariantDbError, VcfMetadata,
    VcfPath, convert, format_with_commas,
};

use crate::cli::{VariantDbCli, VariantDbCommands};

/// [`ProgressCallback`] implementation backed by an `indicatif::ProgressBar`.
///
/// The source's record count is unknown up front, so this is a spinner
/// rather than a bounded bar.
struct IndicatifProgress {
    pb: ProgressBar,
}

impl ProgressCallback for IndicatifProgress {
    fn inc(&self, n: u64) {
        self.pb.inc(n);
    }

    fn conversion_started(&self, path: &str) {
        if let Ok(style) =
            ProgressStyle::default_spinner().template("[{spinner:.green} {elapsed_precise}] {pos:>12} rows {msg}")
        {
            self.pb.set_style(style);
        }
        self.pb
            .set_message(format!("Converting variant data from file {path}"));
        self.pb
            .enable_steady_tick(std::time::Duration::from_millis(120));
    }
}

/// Create a progress spinner if progress is enabled.
fn create_progress(no_progress: bool) -> Option<Arc<IndicatifProgress>> {
    if no_progress {
        return None;
    }
    Some(Arc::new(IndicatifProgress {
        pb: ProgressBar::new_spinner(),
    }))
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter),
    )
    .init();
}

fn print_finish_message(summary: &ConvertSummary, in_path: &Path, out_path: &Path) {
    let in_f = in_path
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_else(|| "___".to_string());
    let out_f = out_path
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_else(|| "___".to_string());

    println!(
        "In total, wrote {} rows from file {} into {}",
        format_with_commas(summary.rows_written),
        in_f,
        out_f
    );
    if summary.records_dropped > 0 {
        println!(
            "Dropped {} variants with no ALT alleles",
            format_with_commas(summary.records_dropped)
        );
    }
}

/// Executes the CLI command specified by the parsed [`VariantDbCli`] arguments.
pub fn run(cli: VariantDbCli) -> Result<(), VariantDbError> {
    init_logging(cli.debug);

    match cli.command {
        VariantDbCommands::Convert {
            input,
            output,
            batch_size,
            overwrite,
            compression,
            compression_level,
            no_progress,
        } => {
            debug!("Converting variant data from the file {}", input.to_string_lossy());

            let input = VcfPath::new(input)?;
            let sink_config =
                SinkConfig::new(output, overwrite, compression.map(Into::into), compression_level)?;

            println!(
                "Writing variant data to file {}",
                sink_config.out_path.to_string_lossy().bright_yellow()
            );

            let options = ConvertOptions {
                batch_size: batch_size as usize,
            };
            let progress = create_progress(no_progress);

            let summary = convert(
                &input,
                &sink_config,
                &options,
                progress.clone().map(|p| p as Arc<dyn ProgressCallback>),
            )?;

            if let Some(p) = progress {
                p.pb.finish_and_clear();
            }
            print_finish_message(&summary, &input.path, &sink_config.out_path);

            Ok(())
        }
        VariantDbCommands::Metadata { input, as_json } => {
            debug!("Retrieving metadata from the file {}", input.to_string_lossy());

            let input = VcfPath::new(input)?;
            let md = VcfMetadata::read(&input)?;

            if as_json {
                println!("{}", md.to_json()?);
            } else {
                md.write_stdout(&input);
            }

            Ok(())
        }
    }
}

// src/bin/build_corpus.rs

//! # Corpus Builder Binary
//!
//! Turns a directory of scraped hashtag batch files into a newline-delimited
//! caption corpus:
//!
//! 1.  **Configuration**: the cleaning chain comes from an optional YAML file
//!     (`--pipeline-config`), otherwise the built-in default chain is used.
//!     CLI flags override the engagement gate and hashtag-run threshold.
//!
//! 2.  **Assembly**: every `*.json` file in the batch directory is read in path
//!     order. A file that cannot be read or parsed stops the run.
//!
//! 3.  **Output**: the corpus is written to the output path, even when empty.

use anyhow::Context;
use caption_blaster::config::{load_pipeline_config, Args, PipelineConfig};
use caption_blaster::corpus::CorpusAssembler;
use caption_blaster::pipeline::readers::list_batch_files;
use caption_blaster::pipeline::writers::write_corpus_file;
use clap::Parser;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::time::Instant;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Creates a progress bar for reading batch files.
fn create_progress_bar(total_items: u64, message: &str, template: &str) -> ProgressBar {
    let pb = if total_items == 0 {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::new(total_items)
    };
    pb.set_message(message.to_string());
    pb.set_style(
        ProgressStyle::default_bar()
            .template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar()) // Fallback style
            .progress_chars("=> "),
    );
    pb
}

/// Console logging filtered by `RUST_LOG` (default `info`), plus an optional
/// log file. The returned guard must live until exit so the file is flushed.
fn init_tracing(args: &Args) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console = fmt::layer().with_filter(filter());

    match &args.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file '{}'", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let file_layer = fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(filter());
            tracing_subscriber::registry()
                .with(console)
                .with(file_layer)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry().with(console).init();
            Ok(None)
        }
    }
}

fn load_config(args: &Args) -> anyhow::Result<PipelineConfig> {
    let mut config = match &args.pipeline_config {
        Some(path) => {
            info!("Loading pipeline configuration from: {}", path.display());
            load_pipeline_config(path)?
        }
        None => PipelineConfig::default(),
    };
    if let Some(threshold) = args.hashtag_run_threshold {
        config.set_hashtag_run_threshold(threshold);
    }
    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _log_guard = init_tracing(&args)?;

    let config = load_config(&args)?;
    if args.validate_config {
        info!("Pipeline configuration is valid ({} steps).", config.pipeline.len());
        return Ok(());
    }

    let json_dir = args.json_dir();
    let output = args.output_path();
    let min_likes = args.resolve_min_likes(config.min_likes);

    info!("Corpus builder started for tag '{}'.", args.tag);
    info!("Batch directory: {}", json_dir.display());
    info!("Output file: {}", output.display());
    info!("Minimum likes: {}", min_likes);

    let batch_files = list_batch_files(&json_dir)?;
    info!("Found {} batch files.", batch_files.len());

    let start = Instant::now();
    let pb = create_progress_bar(
        batch_files.len() as u64,
        "Parsing batch files",
        "{spinner:.green} [{elapsed_precise}] {msg} {pos}/{len} ({per_sec}, ETA: {eta})",
    );

    let assembler = CorpusAssembler::from_config(&config, min_likes)?;
    let report = match assembler.assemble_with_progress(&batch_files, Some(&pb)) {
        Ok(report) => report,
        Err(e) => {
            error!("Failed to build corpus: {}", e);
            pb.finish_with_message(format!("Failed: {}", e));
            return Err(e.into());
        }
    };
    pb.finish_with_message("Done parsing batch files");

    write_corpus_file(&output, &report.corpus)
        .with_context(|| format!("Failed to write corpus to '{}'", output.display()))?;

    let stats = &report.stats;
    info!("--------------------");
    info!("Corpus Summary:");
    info!("  Batch files read: {}", stats.files_read);
    info!("  Records seen: {}", stats.records_seen);
    info!("  Captions extracted: {}", stats.captions_extracted);
    info!("    - Rejected by language: {}", stats.rejected_language);
    for (step, count) in &stats.filtered_by_step {
        info!("    - Filtered by {}: {}", step, count);
    }
    info!("  Captions written: {}", stats.captions_kept);
    info!("  Output File: {}", output.display());
    info!("  Elapsed: {}", HumanDuration(start.elapsed()));
    info!("--------------------");

    Ok(())
}

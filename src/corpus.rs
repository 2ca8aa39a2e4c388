//! Corpus assembly: batch files in, one newline-joined caption corpus out.
//!
//! Batch files are read (and language-checked) independently, then every
//! surviving caption runs through the cleaning steps. Both stages may run in
//! parallel; output order is always file order, then record order.

use crate::config::pipeline::{build_cleaning_steps, PipelineConfig};
use crate::data_model::Caption;
use crate::error::{PipelineError, Result};
use crate::executor::PipelineExecutor;
use crate::pipeline::filters::LanguageDetectionFilter;
use crate::pipeline::readers::{list_batch_files, JsonBatchReader};

use indicatif::ProgressBar;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Counters for one corpus run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusStats {
    pub files_read: usize,
    pub records_seen: usize,
    pub captions_extracted: usize,
    pub rejected_language: usize,
    pub captions_kept: usize,
    /// Captions dropped by each cleaning step, keyed by step name.
    pub filtered_by_step: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default)]
pub struct CorpusReport {
    pub corpus: String,
    pub stats: CorpusStats,
}

struct FileCaptions {
    records_seen: usize,
    extracted: usize,
    captions: Vec<Caption>,
}

pub struct CorpusAssembler {
    min_likes: u64,
    language_filter: Option<LanguageDetectionFilter>,
    executor: PipelineExecutor,
}

impl CorpusAssembler {
    /// Assembler running the default cleaning chain.
    pub fn new(min_likes: u64) -> Result<Self> {
        CorpusAssembler::from_config(&PipelineConfig::default(), min_likes)
    }

    pub fn from_config(config: &PipelineConfig, min_likes: u64) -> Result<Self> {
        let language_filter = match config.language_params() {
            Some(params) => Some(params.build()?),
            None => None,
        };
        Ok(CorpusAssembler {
            min_likes,
            language_filter,
            executor: PipelineExecutor::new(build_cleaning_steps(config)),
        })
    }

    pub fn assemble<P: AsRef<Path> + Sync>(&self, batch_files: &[P]) -> Result<CorpusReport> {
        self.assemble_with_progress(batch_files, None)
    }

    /// Builds the corpus from `batch_files`, taken in the order given.
    ///
    /// The first unreadable or malformed file (in that order) aborts the run.
    pub fn assemble_with_progress<P: AsRef<Path> + Sync>(
        &self,
        batch_files: &[P],
        progress: Option<&ProgressBar>,
    ) -> Result<CorpusReport> {
        let mut stats = CorpusStats::default();

        let per_file: Vec<Result<FileCaptions>> = batch_files
            .par_iter()
            .map(|path| {
                let result = self.read_file(path.as_ref());
                if let Some(pb) = progress {
                    pb.inc(1);
                }
                result
            })
            .collect();

        let mut captions = Vec::new();
        for file in per_file {
            let file = file?;
            stats.files_read += 1;
            stats.records_seen += file.records_seen;
            stats.captions_extracted += file.extracted;
            stats.rejected_language += file.extracted - file.captions.len();
            captions.extend(file.captions);
        }

        let mut kept = Vec::with_capacity(captions.len());
        for result in self.executor.run_batch_parallel(captions) {
            match result {
                Ok(caption) => kept.push(caption.content),
                Err(PipelineError::StepError { step_name, source }) if source.is_filtered() => {
                    debug!(step = %step_name, "{}", source);
                    *stats.filtered_by_step.entry(step_name).or_default() += 1;
                }
                Err(e) => return Err(e),
            }
        }
        stats.captions_kept = kept.len();

        info!(
            files = stats.files_read,
            records = stats.records_seen,
            extracted = stats.captions_extracted,
            rejected_language = stats.rejected_language,
            kept = stats.captions_kept,
            "Corpus assembled"
        );
        if kept.is_empty() {
            warn!("No captions survived cleaning; the corpus is empty.");
        }

        Ok(CorpusReport {
            corpus: kept.join("\n"),
            stats,
        })
    }

    fn read_file(&self, path: &Path) -> Result<FileCaptions> {
        let contents = JsonBatchReader::new(path, self.min_likes).read_batch()?;
        let extracted = contents.captions.len();
        let captions = match &self.language_filter {
            Some(filter) => contents
                .captions
                .into_iter()
                .filter(|caption| filter.is_target_language(&caption.content))
                .collect(),
            None => contents.captions,
        };
        Ok(FileCaptions {
            records_seen: contents.records_seen,
            extracted,
            captions,
        })
    }
}

/// Builds the corpus for `batch_files` with the default cleaning chain.
pub fn build_corpus<P: AsRef<Path> + Sync>(batch_files: &[P], min_likes: u64) -> Result<String> {
    Ok(CorpusAssembler::new(min_likes)?.assemble(batch_files)?.corpus)
}

/// Builds the corpus for every `*.json` file in `dir`, in path order.
pub fn build_corpus_from_dir<P: AsRef<Path>>(dir: P, min_likes: u64) -> Result<String> {
    build_corpus(&list_batch_files(dir)?, min_likes)
}

// src/pipeline/readers/json_batch_reader.rs

use crate::data_model::{Caption, PostBatchFile, PostRecord};
use crate::error::{PipelineError, Result};
use crate::pipeline::readers::post_extractor::extract_caption;

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Lists the `*.json` files directly inside `dir`, sorted by path.
pub fn list_batch_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|e| {
        PipelineError::ConfigError(format!(
            "Failed to read batch directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Everything one batch file contributed.
#[derive(Debug, Default)]
pub struct BatchContents {
    pub records_seen: usize,
    pub captions: Vec<Caption>,
}

/// Reads the captions of one batch file, applying the engagement gate.
#[derive(Debug, Clone)]
pub struct JsonBatchReader {
    path: PathBuf,
    min_likes: u64,
}

impl JsonBatchReader {
    pub fn new<P: Into<PathBuf>>(path: P, min_likes: u64) -> Self {
        JsonBatchReader {
            path: path.into(),
            min_likes,
        }
    }

    /// Parses the file and extracts every qualifying caption in record order.
    ///
    /// An unreadable file or invalid JSON is fatal. A record without a caption
    /// or like count is skipped.
    pub fn read_batch(&self) -> Result<BatchContents> {
        let bytes = fs::read(&self.path).map_err(|source| PipelineError::BatchFileUnreadable {
            path: self.path.clone(),
            source,
        })?;
        let batch: PostBatchFile =
            serde_json::from_slice(&bytes).map_err(|source| PipelineError::BatchFileMalformed {
                path: self.path.clone(),
                source,
            })?;

        let source = self.path.display().to_string();
        let edges = batch.edge_hashtag_to_media.edges;
        let mut captions = Vec::new();
        for (index, edge) in edges.iter().enumerate() {
            let record = PostRecord::from_value(edge);
            let Some(text) = extract_caption(&record, self.min_likes) else {
                continue;
            };
            let mut caption = Caption::new(format!("{}#{}", source, index), source.clone(), text);
            if let Some(likes) = record.like_count {
                caption.metadata.insert("like_count".into(), likes.to_string());
            }
            captions.push(caption);
        }

        debug!(
            file = %source,
            records = edges.len(),
            captions = captions.len(),
            "Read batch file"
        );
        Ok(BatchContents {
            records_seen: edges.len(),
            captions,
        })
    }
}

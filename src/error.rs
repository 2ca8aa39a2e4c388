use crate::data_model::Caption;
use std::path::PathBuf;
use thiserror::Error;

/// Custom Result type for this crate.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// The Error type for pipeline operations.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Configuration validation error: {0}")]
    ConfigValidationError(String),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    // Batch files are the one place the pipeline fails loud: a corrupt file
    // aborts the run and names the file.
    #[error("Failed to read batch file '{}': {source}", .path.display())]
    BatchFileUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed batch file '{}': {source}", .path.display())]
    BatchFileMalformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Caption '{caption_id}' filtered out: {reason}", caption_id = .caption.id)]
    CaptionFiltered { caption: Caption, reason: String },

    #[error("Error in processing step '{step_name}': {source}")]
    StepError {
        step_name: String,
        source: Box<PipelineError>,
    },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PipelineError {
    /// True when the error only means a caption was dropped by a step,
    /// including when it is wrapped in a `StepError`.
    pub fn is_filtered(&self) -> bool {
        match self {
            PipelineError::CaptionFiltered { .. } => true,
            PipelineError::StepError { source, .. } => source.is_filtered(),
            _ => false,
        }
    }
}

// Declare the modules that form the library's public API
pub mod config;
pub mod corpus;
pub mod data_model;
pub mod error;
pub mod executor;
pub mod pipeline;
pub mod utils;

pub use corpus::{build_corpus, build_corpus_from_dir, CorpusAssembler, CorpusReport, CorpusStats};
pub use error::{PipelineError, Result};

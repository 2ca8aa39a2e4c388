// src/pipeline/readers/mod.rs

pub mod json_batch_reader;
pub mod post_extractor;

pub use json_batch_reader::{list_batch_files, JsonBatchReader};
pub use post_extractor::extract_caption;

pub mod base_writer;
pub mod text_writer;

pub use base_writer::BaseWriter;
pub use text_writer::{write_corpus_file, TextCorpusWriter};

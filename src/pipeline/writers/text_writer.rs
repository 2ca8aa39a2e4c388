use crate::error::{PipelineError, Result};
use crate::pipeline::writers::base_writer::BaseWriter;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes a newline-joined corpus to a UTF-8 text file.
pub struct TextCorpusWriter {
    writer: BufWriter<File>,
}

impl TextCorpusWriter {
    /// Creates (or truncates) the output file, creating missing parent directories.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                PipelineError::ConfigError(format!(
                    "Failed to create output directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        let file = File::create(path)?;
        Ok(TextCorpusWriter {
            writer: BufWriter::new(file),
        })
    }
}

impl BaseWriter for TextCorpusWriter {
    fn write_corpus(&mut self, corpus: &str) -> Result<()> {
        self.writer.write_all(corpus.as_bytes())?;
        Ok(())
    }

    fn close(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes `corpus` to `path` in one go.
pub fn write_corpus_file<P: AsRef<Path>>(path: P, corpus: &str) -> Result<()> {
    let mut writer = TextCorpusWriter::new(path)?;
    writer.write_corpus(corpus)?;
    writer.close()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_writes_corpus_and_creates_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("text").join("training_text").join("dogs.txt");
        write_corpus_file(&path, "first line\nsecond line").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "first line\nsecond line");
    }

    #[test]
    fn test_empty_corpus_writes_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "stale content").unwrap();
        write_corpus_file(&path, "").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }
}

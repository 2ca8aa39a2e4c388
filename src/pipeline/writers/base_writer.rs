use crate::error::Result;

/// Trait for writing an assembled corpus to an output sink (e.g. file).
pub trait BaseWriter {
    /// Write the corpus text exactly as given.
    fn write_corpus(&mut self, corpus: &str) -> Result<()>;

    /// Finalize and close the output writer.
    fn close(self) -> Result<()>;
}

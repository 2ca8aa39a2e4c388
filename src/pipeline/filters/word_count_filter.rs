use crate::data_model::Caption;
use crate::error::{PipelineError, Result};
use crate::executor::ProcessingStep;

pub const DEFAULT_MIN_WORDS: usize = 3;

/// Drops captions with fewer than `min_words` whitespace-separated tokens.
pub struct MinWordCountFilter {
    min_words: usize,
}

impl MinWordCountFilter {
    pub fn new(min_words: usize) -> Self {
        MinWordCountFilter { min_words }
    }
}

impl Default for MinWordCountFilter {
    fn default() -> Self {
        MinWordCountFilter::new(DEFAULT_MIN_WORDS)
    }
}

impl ProcessingStep for MinWordCountFilter {
    fn name(&self) -> &'static str {
        "MinWordCountFilter"
    }

    fn process(&self, caption: Caption) -> Result<Caption> {
        let words = caption.word_count();
        if words < self.min_words {
            let reason = format!("Too few words (found {}, required {})", words, self.min_words);
            return Err(PipelineError::CaptionFiltered { caption, reason });
        }
        Ok(caption)
    }
}

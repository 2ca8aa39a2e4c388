use crate::data_model::Caption;
use crate::error::Result;
use crate::executor::ProcessingStep;
use crate::utils::text::BULLET;

/// Keeps only the text before the first line break.
pub fn cut_at_first_newline(text: &str) -> &str {
    text.split_once('\n').map_or(text, |(head, _)| head)
}

/// Keeps only the text before the first bullet separator (U+2022).
pub fn cut_at_first_bullet(text: &str) -> &str {
    text.split_once(BULLET).map_or(text, |(head, _)| head)
}

/// Strips a hashtag block or other boilerplate appended after the
/// human-written part of a caption: first everything from the first newline,
/// then everything from the first bullet. Surrounding whitespace is kept.
pub fn trim_boilerplate(caption: &str) -> String {
    cut_at_first_bullet(cut_at_first_newline(caption)).to_string()
}

pub struct BoilerplateTrimmer;

impl ProcessingStep for BoilerplateTrimmer {
    fn name(&self) -> &'static str {
        "BoilerplateTrimmer"
    }

    fn process(&self, caption: Caption) -> Result<Caption> {
        let mut caption = caption;
        let trimmed = trim_boilerplate(&caption.content);
        if trimmed.len() != caption.content.len() {
            caption.metadata.insert(
                "boilerplate_bytes_removed".into(),
                (caption.content.len() - trimmed.len()).to_string(),
            );
            caption.content = trimmed;
        }
        Ok(caption)
    }
}

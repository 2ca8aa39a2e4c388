use crate::data_model::Caption;
use crate::error::{PipelineError, Result};
use crate::executor::ProcessingStep;

/// Substrings that mark a caption as promotional, spam, or low-information.
/// All entries are lower case; matching case-folds the caption.
pub const DEFAULT_DENY_LIST: &[&str] = &[
    "...",
    "---",
    "___",
    "_ _ _",
    "@",
    "%",
    "http",
    "follow",
    "link",
    "comment",
    "alcohol",
    "order",
    "sale",
    "www",
    "subscribe",
    "clearance",
    "twitter",
    "money",
    "notifications",
    "repost",
    "facebook",
];

/// Upper-cases before lower-casing so variant letters such as the long s
/// (`ſ`, upper-case `S`) compare equal to their plain form.
fn fold_case(text: &str) -> String {
    text.to_uppercase().to_lowercase()
}

/// True if the caption contains any entry of the default deny-list,
/// ignoring case.
pub fn is_low_quality(caption: &str) -> bool {
    let folded = fold_case(caption);
    DEFAULT_DENY_LIST.iter().any(|marker| folded.contains(marker))
}

/// Rejects captions containing any deny-listed substring.
pub struct QualityFilter {
    deny_list: Vec<String>,
}

impl QualityFilter {
    pub fn new(deny_list: Option<Vec<String>>) -> Self {
        let deny_list = deny_list
            .unwrap_or_else(|| DEFAULT_DENY_LIST.iter().map(|&s| s.to_string()).collect())
            .into_iter()
            .map(|marker| fold_case(&marker))
            .collect();
        QualityFilter { deny_list }
    }

    /// First deny-list entry found in `caption`, if any.
    pub fn first_match(&self, caption: &str) -> Option<&str> {
        let folded = fold_case(caption);
        self.deny_list
            .iter()
            .find(|marker| folded.contains(marker.as_str()))
            .map(String::as_str)
    }

    pub fn is_low_quality(&self, caption: &str) -> bool {
        self.first_match(caption).is_some()
    }
}

impl Default for QualityFilter {
    fn default() -> Self {
        QualityFilter::new(None)
    }
}

impl ProcessingStep for QualityFilter {
    fn name(&self) -> &'static str {
        "QualityFilter"
    }

    fn process(&self, caption: Caption) -> Result<Caption> {
        match self.first_match(&caption.content) {
            Some(marker) => {
                let reason = format!("Caption contains deny-listed marker '{}'", marker);
                Err(PipelineError::CaptionFiltered { caption, reason })
            }
            None => Ok(caption),
        }
    }
}

use crate::data_model::Caption;
use crate::error::Result;
use crate::executor::ProcessingStep;
use crate::utils::text::find_hashtag_tokens;

pub const DEFAULT_HASHTAG_RUN_THRESHOLD: usize = 3;

/// Truncates `caption` at its first hashtag when it carries at least
/// `threshold` hashtag tokens anywhere. Captions with fewer tags are returned
/// unchanged.
pub fn trim_hashtag_run(caption: &str, threshold: usize) -> String {
    let tokens = find_hashtag_tokens(caption);
    match tokens.first() {
        Some(first) if tokens.len() >= threshold => caption[..first.start].to_string(),
        _ => caption.to_string(),
    }
}

pub struct HashtagRunTrimmer {
    threshold: usize,
}

impl HashtagRunTrimmer {
    pub fn new(threshold: usize) -> Self {
        HashtagRunTrimmer { threshold }
    }
}

impl Default for HashtagRunTrimmer {
    fn default() -> Self {
        HashtagRunTrimmer::new(DEFAULT_HASHTAG_RUN_THRESHOLD)
    }
}

impl ProcessingStep for HashtagRunTrimmer {
    fn name(&self) -> &'static str {
        "HashtagRunTrimmer"
    }

    fn process(&self, caption: Caption) -> Result<Caption> {
        let mut caption = caption;
        let trimmed = trim_hashtag_run(&caption.content, self.threshold);
        if trimmed.len() != caption.content.len() {
            caption.metadata.insert(
                "hashtags_removed".into(),
                find_hashtag_tokens(&caption.content).len().to_string(),
            );
            caption.content = trimmed;
        }
        Ok(caption)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_run_is_removed() {
        let caption = "Hi I love using #hashtags #because #of #how #nice #they #look";
        assert_eq!(trim_hashtag_run(caption, 3), "Hi I love using ");
    }

    #[test]
    fn test_exactly_threshold_truncates() {
        let caption = "Hi I love using #hashtags #because #of";
        assert_eq!(trim_hashtag_run(caption, 3), "Hi I love using ");
    }

    #[test]
    fn test_below_threshold_is_unchanged() {
        let caption = "Hi I love using #hashtags #because";
        assert_eq!(trim_hashtag_run(caption, 3), caption);
        assert_eq!(trim_hashtag_run("no tags at all", 3), "no tags at all");
    }

    #[test]
    fn test_tags_spread_through_text_cut_at_first() {
        let caption = "Morning #coffee then a walk #outside and lunch #friends today";
        assert_eq!(trim_hashtag_run(caption, 3), "Morning ");
    }

    #[test]
    fn test_embedded_hash_does_not_count() {
        let caption = "Fixed issue#1 issue#2 and #one #two";
        assert_eq!(trim_hashtag_run(caption, 3), caption);
    }

    #[test]
    fn test_threshold_one() {
        assert_eq!(trim_hashtag_run("great day #sun", 1), "great day ");
    }

    #[test]
    fn test_step_records_tag_count() {
        let trimmer = HashtagRunTrimmer::default();
        let caption = trimmer
            .process(Caption::new("c", "t", "Look at this view #a #b #c #d"))
            .expect("trimmer never filters");
        assert_eq!(caption.content, "Look at this view ");
        assert_eq!(caption.metadata.get("hashtags_removed"), Some(&"4".to_string()));
    }
}

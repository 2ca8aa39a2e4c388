use crate::data_model::PostRecord;

/// Returns the record's caption if it has one and at least `min_likes` likes.
///
/// A record without a caption or without a like count is skipped, never an
/// error.
pub fn extract_caption(record: &PostRecord, min_likes: u64) -> Option<&str> {
    let likes = record.like_count?;
    if likes < min_likes {
        return None;
    }
    record.caption_text.as_deref()
}

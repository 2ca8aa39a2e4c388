use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One caption flowing through the cleaning chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    pub id: String,     // "<batch file>#<record index>"
    pub source: String, // Batch file the caption was read from
    pub content: String,
    pub metadata: HashMap<String, String>, // Intermediate results from steps
}

impl Caption {
    pub fn new(id: impl Into<String>, source: impl Into<String>, content: impl Into<String>) -> Self {
        Caption {
            id: id.into(),
            source: source.into(),
            content: content.into(),
            metadata: HashMap::new(),
        }
    }

    /// Number of whitespace-delimited tokens in the content.
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

/// A page of posts for one tag, as written by the scraper.
///
/// Only the outer path is typed. Records stay as raw JSON so that a malformed
/// record can be skipped without failing the whole file.
#[derive(Debug, Deserialize)]
pub struct PostBatchFile {
    pub edge_hashtag_to_media: MediaEdges,
}

#[derive(Debug, Deserialize)]
pub struct MediaEdges {
    #[serde(default)]
    pub edges: Vec<Value>,
}

/// The two attributes of a post the pipeline consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostRecord {
    pub caption_text: Option<String>,
    pub like_count: Option<u64>,
}

impl PostRecord {
    const CAPTION_PATH: &'static str = "/node/edge_media_to_caption/edges/0/node/text";
    const LIKES_PATH: &'static str = "/node/edge_liked_by/count";

    /// Reads a record from one entry of `edge_hashtag_to_media.edges`.
    /// Missing or mistyped fields come back as `None`.
    pub fn from_value(value: &Value) -> Self {
        PostRecord {
            caption_text: value
                .pointer(Self::CAPTION_PATH)
                .and_then(Value::as_str)
                .map(str::to_owned),
            like_count: value.pointer(Self::LIKES_PATH).and_then(Value::as_u64),
        }
    }
}

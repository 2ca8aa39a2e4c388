// src/pipeline/filters/mod.rs

mod language_filter;
mod quality_filter;
mod word_count_filter;

pub use language_filter::{
    is_target_language, parse_language_code, LanguageDetectionFilter, TARGET_LANGUAGE,
};
pub use quality_filter::{is_low_quality, QualityFilter, DEFAULT_DENY_LIST};
pub use word_count_filter::{MinWordCountFilter, DEFAULT_MIN_WORDS};

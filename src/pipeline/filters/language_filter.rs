use lingua::{IsoCode639_3, Language, LanguageDetector, LanguageDetectorBuilder};
use once_cell::sync::Lazy;
use std::str::FromStr;

use crate::error::{PipelineError, Result};

/// ISO 639-3 code of the language the corpus is built for.
pub const TARGET_LANGUAGE: &str = "eng";

static DEFAULT_FILTER: Lazy<LanguageDetectionFilter> = Lazy::new(LanguageDetectionFilter::default);

/// True if `text` is detected as English.
///
/// Detection that produces no answer (empty, symbol-only, or otherwise
/// unclassifiable text) counts as "not English".
pub fn is_target_language(text: &str) -> bool {
    DEFAULT_FILTER.is_target_language(text)
}

/// Maps an ISO 639-3 code such as `eng` to a detector language.
pub fn parse_language_code(code: &str) -> Option<Language> {
    IsoCode639_3::from_str(&code.to_lowercase())
        .ok()
        .map(|iso| Language::from_iso_code_639_3(&iso))
}

/// Accepts captions whose detected language is in the allowed set.
///
/// The detector always knows every supported language, so a caption is only
/// accepted when an allowed language beats all the others.
pub struct LanguageDetectionFilter {
    detector: LanguageDetector,
    min_confidence: f64,
    allowed_languages: Vec<Language>,
}

impl LanguageDetectionFilter {
    pub fn new(min_confidence: f64, allowed_languages: &[String]) -> Result<Self> {
        let allowed_languages = allowed_languages
            .iter()
            .map(|code| {
                parse_language_code(code).ok_or_else(|| {
                    PipelineError::ConfigValidationError(format!(
                        "Unknown ISO 639-3 language code '{}'",
                        code
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(LanguageDetectionFilter {
            detector: LanguageDetectorBuilder::from_all_languages().build(),
            min_confidence,
            allowed_languages,
        })
    }

    /// Checks `text` against the allowed languages and confidence floor.
    /// Returns the detected language on success, the rejection reason otherwise.
    pub fn check(&self, text: &str) -> std::result::Result<Language, String> {
        let language = self
            .detector
            .detect_language_of(text)
            .ok_or_else(|| "Language could not be identified".to_string())?;

        if !self.allowed_languages.contains(&language) {
            return Err(format!(
                "Caption is not in an allowed language (detected {})",
                language.iso_code_639_3()
            ));
        }
        if self.min_confidence > 0.0 {
            let confidence = self.detector.compute_language_confidence(text, language);
            if confidence < self.min_confidence {
                return Err(format!(
                    "Language detection confidence is not satisfied: {} < {}",
                    confidence, self.min_confidence
                ));
            }
        }
        Ok(language)
    }

    pub fn is_target_language(&self, text: &str) -> bool {
        self.check(text).is_ok()
    }
}

impl Default for LanguageDetectionFilter {
    fn default() -> Self {
        LanguageDetectionFilter {
            detector: LanguageDetectorBuilder::from_all_languages().build(),
            min_confidence: 0.0,
            allowed_languages: vec![Language::English],
        }
    }
}

use crate::error::{PipelineError, Result};
use crate::executor::ProcessingStep;
use crate::pipeline::filters::{
    parse_language_code, LanguageDetectionFilter, MinWordCountFilter, QualityFilter,
    DEFAULT_MIN_WORDS, TARGET_LANGUAGE,
};
use crate::pipeline::trimmers::{BoilerplateTrimmer, HashtagRunTrimmer, DEFAULT_HASHTAG_RUN_THRESHOLD};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Represents the overall pipeline configuration read from YAML.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Engagement gate; a CLI value takes precedence.
    #[serde(default)]
    pub min_likes: Option<u64>,
    pub pipeline: Vec<StepConfig>,
}

impl Default for PipelineConfig {
    /// The fixed cleaning chain: English only, deny-list, boilerplate cut,
    /// hashtag runs of 3 or more, at least 3 words.
    fn default() -> Self {
        PipelineConfig {
            min_likes: None,
            pipeline: vec![
                StepConfig::LanguageDetectionFilter(LanguageDetectionParams::default()),
                StepConfig::QualityFilter(QualityFilterParams::default()),
                StepConfig::BoilerplateTrimmer,
                StepConfig::HashtagRunTrimmer(HashtagRunParams::default()),
                StepConfig::MinWordCountFilter(MinWordCountParams::default()),
            ],
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        for step_config in &self.pipeline {
            step_config.validate()?;
        }
        Ok(())
    }

    /// Overrides the threshold of every hashtag-run step.
    pub fn set_hashtag_run_threshold(&mut self, threshold: usize) {
        for step in &mut self.pipeline {
            if let StepConfig::HashtagRunTrimmer(params) = step {
                params.threshold = threshold;
            }
        }
    }

    /// Parameters of the language step, which runs while batch files are read.
    pub fn language_params(&self) -> Option<&LanguageDetectionParams> {
        self.pipeline.iter().find_map(|step| match step {
            StepConfig::LanguageDetectionFilter(params) => Some(params),
            _ => None,
        })
    }
}

/// Represents a single step in the processing pipeline.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")] // The 'type' field in YAML determines which variant
pub enum StepConfig {
    LanguageDetectionFilter(LanguageDetectionParams),
    QualityFilter(QualityFilterParams),
    BoilerplateTrimmer,
    HashtagRunTrimmer(HashtagRunParams),
    MinWordCountFilter(MinWordCountParams),
}

impl StepConfig {
    /// Returns a string slice representing the name of the step type.
    pub fn name(&self) -> &'static str {
        match self {
            StepConfig::LanguageDetectionFilter(_) => "LanguageDetectionFilter",
            StepConfig::QualityFilter(_) => "QualityFilter",
            StepConfig::BoilerplateTrimmer => "BoilerplateTrimmer",
            StepConfig::HashtagRunTrimmer(_) => "HashtagRunTrimmer",
            StepConfig::MinWordCountFilter(_) => "MinWordCountFilter",
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            StepConfig::LanguageDetectionFilter(params) => params.validate(),
            StepConfig::QualityFilter(params) => params.validate(),
            StepConfig::BoilerplateTrimmer => Ok(()),
            StepConfig::HashtagRunTrimmer(params) => params.validate(),
            StepConfig::MinWordCountFilter(params) => params.validate(),
        }
    }
}

// Parameters for the LanguageDetectionFilter
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct LanguageDetectionParams {
    #[serde(default)]
    pub min_confidence: f64,
    pub allowed_languages: Vec<String>,
}

impl Default for LanguageDetectionParams {
    fn default() -> Self {
        LanguageDetectionParams {
            min_confidence: 0.0,
            allowed_languages: vec![TARGET_LANGUAGE.to_string()],
        }
    }
}

impl LanguageDetectionParams {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(PipelineError::ConfigValidationError(format!(
                "LanguageDetectionParams: min_confidence must be between 0.0 and 1.0, got {}",
                self.min_confidence
            )));
        }
        if self.allowed_languages.is_empty() {
            return Err(PipelineError::ConfigValidationError(
                "LanguageDetectionParams: allowed_languages cannot be empty".to_string(),
            ));
        }
        if let Some(code) = self
            .allowed_languages
            .iter()
            .find(|code| parse_language_code(code).is_none())
        {
            return Err(PipelineError::ConfigValidationError(format!(
                "LanguageDetectionParams: unknown ISO 639-3 language code '{}'",
                code
            )));
        }
        Ok(())
    }

    pub fn build(&self) -> Result<LanguageDetectionFilter> {
        LanguageDetectionFilter::new(self.min_confidence, &self.allowed_languages)
    }
}

/// Parameters for the QualityFilter. `None` keeps the built-in deny-list.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct QualityFilterParams {
    pub deny_list: Option<Vec<String>>,
}

impl QualityFilterParams {
    pub fn validate(&self) -> Result<()> {
        if let Some(list) = &self.deny_list {
            if list.iter().any(|marker| marker.is_empty()) {
                // An empty marker matches every caption.
                return Err(PipelineError::ConfigValidationError(
                    "QualityFilterParams: deny_list entries cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct HashtagRunParams {
    #[serde(default = "default_hashtag_run_threshold")]
    pub threshold: usize,
}

fn default_hashtag_run_threshold() -> usize {
    DEFAULT_HASHTAG_RUN_THRESHOLD
}

impl Default for HashtagRunParams {
    fn default() -> Self {
        HashtagRunParams {
            threshold: DEFAULT_HASHTAG_RUN_THRESHOLD,
        }
    }
}

impl HashtagRunParams {
    pub fn validate(&self) -> Result<()> {
        if self.threshold == 0 {
            return Err(PipelineError::ConfigValidationError(
                "HashtagRunParams: threshold must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct MinWordCountParams {
    #[serde(default = "default_min_words")]
    pub min_words: usize,
}

fn default_min_words() -> usize {
    DEFAULT_MIN_WORDS
}

impl Default for MinWordCountParams {
    fn default() -> Self {
        MinWordCountParams {
            min_words: DEFAULT_MIN_WORDS,
        }
    }
}

impl MinWordCountParams {
    pub fn validate(&self) -> Result<()> {
        if self.min_words == 0 {
            return Err(PipelineError::ConfigValidationError(
                "MinWordCountParams: min_words must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Loads, parses, and validates the pipeline configuration YAML file.
pub fn load_pipeline_config<P: AsRef<Path>>(config_path: P) -> Result<PipelineConfig> {
    let path_ref = config_path.as_ref();
    let config_content = fs::read_to_string(path_ref).map_err(|e| {
        PipelineError::ConfigError(format!(
            "Failed to read pipeline config file '{}': {}",
            path_ref.display(),
            e
        ))
    })?;

    let config: PipelineConfig = serde_yaml::from_str(&config_content).map_err(|e| {
        PipelineError::ConfigError(format!(
            "Failed to parse pipeline config YAML from '{}': {}",
            path_ref.display(),
            e
        ))
    })?;

    config.validate()?;
    Ok(config)
}

/// Builds the post-flatten cleaning steps. The language step is left out:
/// it runs while batch files are read.
pub fn build_cleaning_steps(config: &PipelineConfig) -> Vec<Box<dyn ProcessingStep>> {
    let mut steps: Vec<Box<dyn ProcessingStep>> = Vec::new();
    info!("Building pipeline from configuration...");

    for step_config in &config.pipeline {
        let step: Box<dyn ProcessingStep> = match step_config {
            StepConfig::LanguageDetectionFilter(_) => continue,
            StepConfig::QualityFilter(params) => {
                debug!(params = ?params, "Adding QualityFilter");
                Box::new(QualityFilter::new(params.deny_list.clone()))
            }
            StepConfig::BoilerplateTrimmer => Box::new(BoilerplateTrimmer),
            StepConfig::HashtagRunTrimmer(params) => {
                debug!(params = ?params, "Adding HashtagRunTrimmer");
                Box::new(HashtagRunTrimmer::new(params.threshold))
            }
            StepConfig::MinWordCountFilter(params) => {
                debug!(params = ?params, "Adding MinWordCountFilter");
                Box::new(MinWordCountFilter::new(params.min_words))
            }
        };
        steps.push(step);
        info!("Added step: {}", step_config.name());
    }

    if steps.is_empty() {
        warn!("Warning: Building an empty cleaning pipeline from configuration!");
    }
    steps
}

use crate::data_model::Caption;
use crate::error::{PipelineError, Result};
use rayon::prelude::*;
use tracing::{debug, warn};

pub trait ProcessingStep: Send + Sync {
    // Send + Sync needed for sharing steps across rayon workers
    fn name(&self) -> &'static str; // For logging/error reporting

    fn process(&self, caption: Caption) -> Result<Caption>;
}

pub struct PipelineExecutor {
    steps: Vec<Box<dyn ProcessingStep>>, // Holds the ordered steps
}

impl PipelineExecutor {
    pub fn new(steps: Vec<Box<dyn ProcessingStep>>) -> Self {
        if steps.is_empty() {
            warn!("Pipeline created with no steps.");
        }
        PipelineExecutor { steps }
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Runs one caption through every step in order, stopping at the first error.
    pub fn run_single(&self, initial_caption: Caption) -> Result<Caption> {
        let mut current = initial_caption;
        for step in &self.steps {
            debug!(caption_id = %current.id, "Running step: {}", step.name());
            current = step
                .process(current)
                .map_err(|e| PipelineError::StepError {
                    step_name: step.name().to_string(),
                    source: Box::new(e),
                })?;
        }
        Ok(current)
    }

    /// Runs many captions in parallel. Results come back in input order.
    pub fn run_batch_parallel(&self, captions: Vec<Caption>) -> Vec<Result<Caption>> {
        captions
            .into_par_iter()
            .map(|caption| self.run_single(caption))
            .collect()
    }
}

//! State and bookkeeping shared by search algorithms

use crate::error::{Result, SearchError};
use crate::parameters::HyperparameterRanges;
use crate::pipelines::Pipeline;
use crate::tuners::{Tuner, TunerFactory};
use std::collections::HashMap;
use tracing::debug;

/// Counters and per-pipeline tuners
pub struct AlgorithmState {
    pub(crate) batch_number: usize,
    pub(crate) pipeline_number: usize,
    pub(crate) random_seed: u64,
    tuners: HashMap<String, Box<dyn Tuner>>,
    tuner_factory: TunerFactory,
}

impl std::fmt::Debug for AlgorithmState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlgorithmState")
            .field("batch_number", &self.batch_number)
            .field("pipeline_number", &self.pipeline_number)
            .field("random_seed", &self.random_seed)
            .field("tuners", &self.tuners.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl AlgorithmState {
    pub fn new(tuner_factory: TunerFactory, random_seed: u64) -> Self {
        Self {
            batch_number: 0,
            pipeline_number: 0,
            random_seed,
            tuners: HashMap::new(),
            tuner_factory,
        }
    }

    pub fn batch_number(&self) -> usize {
        self.batch_number
    }

    pub fn pipeline_number(&self) -> usize {
        self.pipeline_number
    }

    /// Advance the counters past a batch of `size` pipelines
    pub(crate) fn record_batch(&mut self, size: usize) {
        self.pipeline_number += size;
        self.batch_number += 1;
    }

    pub fn has_tuner(&self, pipeline_name: &str) -> bool {
        self.tuners.contains_key(pipeline_name)
    }

    pub fn tuner(&self, pipeline_name: &str) -> Option<&dyn Tuner> {
        self.tuners.get(pipeline_name).map(|t| &**t)
    }

    /// Create the tuner for `pipeline_name` unless one exists already
    pub(crate) fn ensure_tuner(
        &mut self,
        pipeline_name: &str,
        ranges: &HyperparameterRanges,
    ) -> Result<&mut Box<dyn Tuner>> {
        if !self.tuners.contains_key(pipeline_name) {
            let tuner = (self.tuner_factory)(ranges, self.random_seed)?;
            debug!(
                pipeline = pipeline_name,
                dimensions = ranges.values().map(|r| r.len()).sum::<usize>(),
                "created tuner"
            );
            self.tuners.insert(pipeline_name.to_string(), tuner);
        }
        self.tuners
            .get_mut(pipeline_name)
            .ok_or_else(|| SearchError::PipelineNotFound(pipeline_name.to_string()))
    }

    pub(crate) fn tuner_mut(&mut self, pipeline_name: &str) -> Result<&mut Box<dyn Tuner>> {
        self.tuners
            .get_mut(pipeline_name)
            .ok_or_else(|| SearchError::PipelineNotFound(pipeline_name.to_string()))
    }

    /// Forward a result to the tuner of the pipeline that produced it
    pub fn add_result(&mut self, score: Option<f64>, pipeline: &Pipeline) -> Result<()> {
        self.tuner_mut(pipeline.name())?.add(pipeline.parameters(), score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::{ComponentRanges, Dimension};
    use crate::tuners::default_tuner_factory;

    fn ranges() -> HyperparameterRanges {
        let mut est = ComponentRanges::new();
        est.insert("depth".to_string(), Dimension::integer(1, 8));
        let mut ranges = HyperparameterRanges::new();
        ranges.insert("Mock Classifier".to_string(), est);
        ranges
    }

    #[test]
    fn test_record_batch() {
        let mut state = AlgorithmState::new(default_tuner_factory(), 0);
        state.record_batch(2);
        state.record_batch(5);
        assert_eq!(state.batch_number(), 2);
        assert_eq!(state.pipeline_number(), 7);
    }

    #[test]
    fn test_tuners_are_created_once() {
        let mut state = AlgorithmState::new(default_tuner_factory(), 0);
        let first = &**state.ensure_tuner("p", &ranges()).unwrap() as *const dyn Tuner as *const ();
        let second =
            &**state.ensure_tuner("p", &HyperparameterRanges::new()).unwrap() as *const dyn Tuner as *const ();
        assert_eq!(first, second);
        assert!(state.has_tuner("p"));
        assert!(!state.has_tuner("q"));
    }

    #[test]
    fn test_unknown_tuner() {
        let mut state = AlgorithmState::new(default_tuner_factory(), 0);
        assert!(matches!(state.tuner_mut("nope"), Err(SearchError::PipelineNotFound(_))));
    }
}

//! Bayesian tuner: proposals come from the surrogate-model optimizer

use super::layout::SearchSpaceLayout;
use super::{Tuner, TunerFactory};
use crate::error::{Result, SearchError};
use crate::optimizer::{BayesianConfig, Optimizer, OptimizerError, Space};
use crate::parameters::{HyperparameterRanges, ParameterMap};
use std::sync::Arc;
use tracing::trace;

/// Tuner backed by [`Optimizer`]
#[derive(Debug)]
pub struct BayesianTuner {
    layout: SearchSpaceLayout,
    optimizer: Option<Optimizer>,
}

impl BayesianTuner {
    pub fn new(ranges: &HyperparameterRanges, random_seed: u64) -> Result<Self> {
        Self::with_config(ranges, random_seed, BayesianConfig::default())
    }

    pub fn with_config(
        ranges: &HyperparameterRanges,
        random_seed: u64,
        config: BayesianConfig,
    ) -> Result<Self> {
        let layout = SearchSpaceLayout::new(ranges)?;
        let optimizer = if layout.is_empty() {
            None
        } else {
            let space = Space::new(layout.dimensions())
                .map_err(|e| SearchError::Configuration(e.to_string()))?;
            Some(Optimizer::new(space, config, random_seed))
        };
        Ok(Self { layout, optimizer })
    }

    /// Factory building Bayesian tuners with `config`
    pub fn factory(config: BayesianConfig) -> TunerFactory {
        Arc::new(move |ranges: &HyperparameterRanges, seed: u64| {
            Ok(Box::new(BayesianTuner::with_config(ranges, seed, config.clone())?) as Box<dyn Tuner>)
        })
    }

    /// Observations accepted so far
    pub fn n_observations(&self) -> usize {
        self.optimizer.as_ref().map_or(0, Optimizer::n_observations)
    }
}

impl Tuner for BayesianTuner {
    fn propose(&mut self) -> Result<ParameterMap> {
        match self.optimizer.as_mut() {
            None => Ok(self.layout.unflatten(Vec::new())),
            Some(optimizer) => {
                let point = optimizer
                    .ask()
                    .map_err(|e| SearchError::Optimization(e.to_string()))?;
                Ok(self.layout.unflatten(point))
            }
        }
    }

    fn add(&mut self, parameters: &ParameterMap, score: Option<f64>) -> Result<()> {
        let score = match score {
            Some(s) if s.is_finite() => s,
            _ => {
                trace!(?score, "ignoring observation without a usable score");
                return Ok(());
            }
        };
        let Some(optimizer) = self.optimizer.as_mut() else {
            return Ok(());
        };

        let point = self.layout.flatten(parameters).map_err(|message| SearchError::Parameter {
            message,
            parameters: parameters.clone(),
            score,
        })?;

        optimizer.tell(point, score).map_err(|e| match e {
            err @ OptimizerError::OutOfSpace { .. } => SearchError::Parameter {
                message: err.to_string(),
                parameters: parameters.clone(),
                score,
            },
            other => SearchError::Optimization(other.to_string()),
        })
    }
}

//! Hyperparameter tuners
//!
//! A tuner owns the search space of one pipeline. It proposes nested
//! `component -> parameter -> value` maps and learns from the scores the
//! search reports back (lower is better).

mod bayesian;
mod layout;
mod random;

pub use bayesian::BayesianTuner;
pub use layout::SearchSpaceLayout;
pub use random::RandomSearchTuner;

use crate::error::Result;
use crate::optimizer::BayesianConfig;
use crate::parameters::{HyperparameterRanges, ParameterMap};
use std::sync::Arc;

/// Proposal/feedback contract shared by every tuner
pub trait Tuner: Send + Sync + std::fmt::Debug {
    /// Next parameters to try
    fn propose(&mut self) -> Result<ParameterMap>;

    /// Report the score observed for `parameters`; `None` or non-finite scores are ignored
    fn add(&mut self, parameters: &ParameterMap, score: Option<f64>) -> Result<()>;
}

/// Builds a tuner for a pipeline's ranges and random seed
pub type TunerFactory =
    Arc<dyn Fn(&HyperparameterRanges, u64) -> Result<Box<dyn Tuner>> + Send + Sync>;

/// Factory for [`BayesianTuner`] with the default optimizer configuration
pub fn default_tuner_factory() -> TunerFactory {
    BayesianTuner::factory(BayesianConfig::default())
}

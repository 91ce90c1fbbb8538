//! Optimizer configuration

use super::Acquisition;
use serde::{Deserialize, Serialize};

/// Configuration of the surrogate-model optimizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BayesianConfig {
    /// Number of random points before the surrogate takes over
    pub n_initial_points: usize,

    /// Random candidates scored by the acquisition function per ask
    pub n_candidates: usize,

    /// Acquisition strategy
    pub acquisition: Acquisition,

    /// Trees in the surrogate forest
    pub n_estimators: usize,

    /// Minimum observations per surrogate leaf
    pub min_samples_leaf: usize,
}

impl Default for BayesianConfig {
    fn default() -> Self {
        Self {
            n_initial_points: 10,
            n_candidates: 2000,
            acquisition: Acquisition::default(),
            n_estimators: 100,
            min_samples_leaf: 3,
        }
    }
}

impl BayesianConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_n_initial_points(mut self, n: usize) -> Self {
        self.n_initial_points = n;
        self
    }

    pub fn with_n_candidates(mut self, n: usize) -> Self {
        self.n_candidates = n.max(1);
        self
    }

    pub fn with_acquisition(mut self, acquisition: Acquisition) -> Self {
        self.acquisition = acquisition;
        self
    }

    pub fn with_n_estimators(mut self, n: usize) -> Self {
        self.n_estimators = n.max(1);
        self
    }

    pub fn with_min_samples_leaf(mut self, n: usize) -> Self {
        self.min_samples_leaf = n.max(1);
        self
    }
}

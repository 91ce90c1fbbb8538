//! Ask/tell optimizer driven by an extra-trees surrogate

use super::acquisition::{argmax, softmax, PORTFOLIO};
use super::{Acquisition, BayesianConfig, ExtraTreesSurrogate, Space};
use crate::parameters::ParameterValue;
use ndarray::{Array1, Array2};
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;
use thiserror::Error;
use tracing::trace;

/// Failures of the optimization backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizerError {
    #[error("invalid search space: {0}")]
    InvalidSpace(String),

    #[error("expected a point with {expected} dimensions, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("value {value} of dimension {index} does not lie within {dimension}")]
    OutOfSpace {
        index: usize,
        value: String,
        dimension: String,
    },

    #[error("score must be finite, got {0}")]
    NonFiniteScore(f64),

    #[error("surrogate failure: {0}")]
    Surrogate(String),
}

/// Sequential model-based optimizer minimizing an unknown function
#[derive(Debug)]
pub struct Optimizer {
    space: Space,
    config: BayesianConfig,
    rng: Xoshiro256PlusPlus,
    xs: Vec<Vec<ParameterValue>>,
    ys: Vec<f64>,
    surrogate: Option<ExtraTreesSurrogate>,
    gains: [f64; 3],
    hedge_points: Option<Array2<f64>>,
}

impl Optimizer {
    pub fn new(space: Space, config: BayesianConfig, random_seed: u64) -> Self {
        Self {
            space,
            config,
            rng: Xoshiro256PlusPlus::seed_from_u64(random_seed),
            xs: Vec::new(),
            ys: Vec::new(),
            surrogate: None,
            gains: [0.0; 3],
            hedge_points: None,
        }
    }

    pub fn space(&self) -> &Space {
        &self.space
    }

    pub fn config(&self) -> &BayesianConfig {
        &self.config
    }

    /// Number of observations told so far
    pub fn n_observations(&self) -> usize {
        self.ys.len()
    }

    /// Best observed score and its point
    pub fn best(&self) -> Option<(&[ParameterValue], f64)> {
        argmax(self.ys.iter().map(|y| -y)).map(|i| (self.xs[i].as_slice(), self.ys[i]))
    }

    /// Suggest the next point to evaluate
    pub fn ask(&mut self) -> Result<Vec<ParameterValue>, OptimizerError> {
        let surrogate = match &self.surrogate {
            Some(s) if self.ys.len() >= self.config.n_initial_points => s,
            _ => return Ok(self.space.sample(&mut self.rng)),
        };

        let candidates: Vec<Vec<ParameterValue>> = (0..self.config.n_candidates.max(1))
            .map(|_| self.space.sample(&mut self.rng))
            .collect();
        let features = self.transform_all(&candidates)?;
        let (mean, std) = surrogate.predict(&features)?;
        let best = self.ys.iter().cloned().fold(f64::INFINITY, f64::min);

        let chosen = match self.config.acquisition {
            Acquisition::Hedge { eta } => {
                let picks: Vec<usize> = PORTFOLIO
                    .iter()
                    .map(|acq| Self::select(acq, &mean, &std, best))
                    .collect();
                let probabilities = softmax(&self.gains, eta);
                let draw: f64 = self.rng.gen();
                let mut cumulative = 0.0;
                let mut strategy = probabilities.len() - 1;
                for (i, p) in probabilities.iter().enumerate() {
                    cumulative += p;
                    if draw < cumulative {
                        strategy = i;
                        break;
                    }
                }
                trace!(gains = ?self.gains, ?probabilities, strategy, "hedge selection");
                self.hedge_points = Some(features.select(ndarray::Axis(0), &picks));
                picks[strategy]
            }
            acq => Self::select(&acq, &mean, &std, best),
        };

        candidates
            .into_iter()
            .nth(chosen)
            .ok_or_else(|| OptimizerError::Surrogate("no candidate selected".to_string()))
    }

    /// Record the score observed at `x`
    pub fn tell(&mut self, x: Vec<ParameterValue>, y: f64) -> Result<(), OptimizerError> {
        self.space.check(&x)?;
        if !y.is_finite() {
            return Err(OptimizerError::NonFiniteScore(y));
        }
        self.xs.push(x);
        self.ys.push(y);

        if self.ys.len() >= self.config.n_initial_points && !self.space.is_empty() {
            self.refit()?;
        }
        Ok(())
    }

    fn refit(&mut self) -> Result<(), OptimizerError> {
        let features = self.transform_all(&self.xs)?;
        let targets = Array1::from_vec(self.ys.clone());
        let mut surrogate =
            ExtraTreesSurrogate::new(self.config.n_estimators, self.config.min_samples_leaf)
                .with_random_state(self.rng.next_u64());
        surrogate.fit(&features, &targets)?;

        if let Some(points) = self.hedge_points.take() {
            let (mean, _) = surrogate.predict(&points)?;
            for (gain, m) in self.gains.iter_mut().zip(mean.iter()) {
                *gain -= m;
            }
        }
        trace!(observations = self.ys.len(), "surrogate refit");
        self.surrogate = Some(surrogate);
        Ok(())
    }

    fn select(acq: &Acquisition, mean: &Array1<f64>, std: &Array1<f64>, best: f64) -> usize {
        let utilities = mean.iter().zip(std.iter()).map(|(&m, &s)| acq.utility(m, s, best));
        argmax(utilities).unwrap_or_else(|| {
            trace!(acquisition = ?acq, "acquisition undefined for every candidate");
            0
        })
    }

    fn transform_all(&self, points: &[Vec<ParameterValue>]) -> Result<Array2<f64>, OptimizerError> {
        let width = self.space.transformed_width();
        let flat: Vec<f64> = points.iter().flat_map(|p| self.space.transform(p)).collect();
        Array2::from_shape_vec((points.len(), width), flat)
            .map_err(|e| OptimizerError::Surrogate(e.to_string()))
    }
}

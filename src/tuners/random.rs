//! Random search tuner

use super::layout::SearchSpaceLayout;
use super::{Tuner, TunerFactory};
use crate::error::{Result, SearchError};
use crate::optimizer::Space;
use crate::parameters::{HyperparameterRanges, ParameterMap, ParameterValue};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::collections::HashSet;
use std::sync::Arc;

/// Proposes uniform samples; scores are validated but otherwise ignored
#[derive(Debug)]
pub struct RandomSearchTuner {
    layout: SearchSpaceLayout,
    space: Space,
    rng: Xoshiro256PlusPlus,
    with_replacement: bool,
    replacement_max_attempts: usize,
    used: HashSet<String>,
}

impl RandomSearchTuner {
    pub fn new(ranges: &HyperparameterRanges, random_seed: u64) -> Result<Self> {
        let layout = SearchSpaceLayout::new(ranges)?;
        let space =
            Space::new(layout.dimensions()).map_err(|e| SearchError::Configuration(e.to_string()))?;
        Ok(Self {
            layout,
            space,
            rng: Xoshiro256PlusPlus::seed_from_u64(random_seed),
            with_replacement: false,
            replacement_max_attempts: 10,
            used: HashSet::new(),
        })
    }

    /// Allow the same point to be proposed more than once
    pub fn with_replacement(mut self, with_replacement: bool) -> Self {
        self.with_replacement = with_replacement;
        self
    }

    /// Draws tried before declaring the space exhausted
    pub fn with_replacement_max_attempts(mut self, attempts: usize) -> Self {
        self.replacement_max_attempts = attempts.max(1);
        self
    }

    pub fn factory(with_replacement: bool) -> TunerFactory {
        Arc::new(move |ranges: &HyperparameterRanges, seed: u64| {
            Ok(Box::new(RandomSearchTuner::new(ranges, seed)?.with_replacement(with_replacement))
                as Box<dyn Tuner>)
        })
    }

    /// Distinct points in the space, `None` when a dimension is continuous
    fn cardinality(&self) -> Option<u64> {
        self.space
            .dimensions()
            .iter()
            .try_fold(1u64, |acc, dim| dim.cardinality().map(|c| acc.saturating_mul(c)))
    }

    fn key(point: &[ParameterValue]) -> String {
        format!("{:?}", point)
    }
}

impl Tuner for RandomSearchTuner {
    fn propose(&mut self) -> Result<ParameterMap> {
        if self.with_replacement || self.layout.is_empty() {
            return Ok(self.layout.unflatten(self.space.sample(&mut self.rng)));
        }
        if let Some(cardinality) = self.cardinality() {
            if self.used.len() as u64 >= cardinality {
                return Err(SearchError::SearchSpaceExhausted);
            }
        }
        for _ in 0..self.replacement_max_attempts {
            let point = self.space.sample(&mut self.rng);
            if self.used.insert(Self::key(&point)) {
                return Ok(self.layout.unflatten(point));
            }
        }
        Err(SearchError::SearchSpaceExhausted)
    }

    fn add(&mut self, parameters: &ParameterMap, score: Option<f64>) -> Result<()> {
        let score = match score {
            Some(s) if s.is_finite() => s,
            _ => return Ok(()),
        };
        let point = self.layout.flatten(parameters).map_err(|message| SearchError::Parameter {
            message,
            parameters: parameters.clone(),
            score,
        })?;
        self.space.check(&point).map_err(|e| SearchError::Parameter {
            message: e.to_string(),
            parameters: parameters.clone(),
            score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::{ComponentRanges, Dimension};

    fn ranges() -> HyperparameterRanges {
        let mut est = ComponentRanges::new();
        est.insert("depth".to_string(), Dimension::integer(1, 2));
        est.insert("criterion".to_string(), Dimension::categorical(["gini", "entropy"]));
        let mut ranges = HyperparameterRanges::new();
        ranges.insert("Mock Classifier".to_string(), est);
        ranges
    }

    #[test]
    fn test_exhausts_finite_space() {
        let mut tuner = RandomSearchTuner::new(&ranges(), 0)
            .unwrap()
            .with_replacement_max_attempts(1000);
        let mut seen = HashSet::new();
        for _ in 0..4 {
            let proposal = tuner.propose().unwrap();
            assert!(seen.insert(format!("{:?}", proposal)));
        }
        assert!(matches!(tuner.propose(), Err(SearchError::SearchSpaceExhausted)));
    }

    #[test]
    fn test_with_replacement_never_exhausts() {
        let mut tuner = RandomSearchTuner::new(&ranges(), 0).unwrap().with_replacement(true);
        for _ in 0..20 {
            tuner.propose().unwrap();
        }
    }

    #[test]
    fn test_add_validates() {
        let mut tuner = RandomSearchTuner::new(&ranges(), 0).unwrap();
        let mut proposal = tuner.propose().unwrap();
        tuner.add(&proposal, Some(0.3)).unwrap();
        tuner.add(&proposal, None).unwrap();

        proposal
            .get_mut("Mock Classifier")
            .unwrap()
            .insert("depth".to_string(), ParameterValue::Int(7));
        assert!(tuner.add(&proposal, Some(0.3)).is_err());
    }
}

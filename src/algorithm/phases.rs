//! Batch schedule

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a batch is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Naive estimators with default preprocessing
    Naive,
    /// Naive estimators behind a model-based feature selector
    NaiveWithFeatureSelection,
    /// Every other estimator behind a column selector
    FastFinal,
    /// Stacked ensemble of the best pipeline per family
    Ensemble,
    /// Many tuned proposals for the top families
    LongTopN,
    /// A few more tuned proposals for the same top families
    LongExplore,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Naive => "naive",
            Phase::NaiveWithFeatureSelection => "naive_with_feature_selection",
            Phase::FastFinal => "fast_final",
            Phase::Ensemble => "ensemble",
            Phase::LongTopN => "long_top_n",
            Phase::LongExplore => "long_explore",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phase of the batch with index `batch_number`
pub fn phase_for(batch_number: usize) -> Phase {
    match batch_number {
        0 => Phase::Naive,
        1 => Phase::NaiveWithFeatureSelection,
        2 => Phase::FastFinal,
        3 => Phase::Ensemble,
        4 => Phase::LongTopN,
        n if n % 2 == 1 => Phase::Ensemble,
        _ => Phase::LongExplore,
    }
}

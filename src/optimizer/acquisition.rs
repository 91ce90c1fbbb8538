//! Acquisition functions for minimization
//!
//! Every function returns a utility where larger is better, so candidate
//! selection is always an argmax.

use serde::{Deserialize, Serialize};

/// Strategy used to pick the next point among the candidates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Acquisition {
    /// Lower confidence bound
    Lcb { kappa: f64 },
    /// Expected improvement
    Ei { xi: f64 },
    /// Probability of improvement
    Pi { xi: f64 },
    /// Portfolio of LCB, EI and PI weighted by past gains
    Hedge { eta: f64 },
}

impl Default for Acquisition {
    fn default() -> Self {
        Acquisition::Hedge { eta: 1.0 }
    }
}

pub(crate) const DEFAULT_KAPPA: f64 = 1.96;
pub(crate) const DEFAULT_XI: f64 = 0.01;

/// The strategies a hedge portfolio chooses from
pub(crate) const PORTFOLIO: [Acquisition; 3] = [
    Acquisition::Lcb { kappa: DEFAULT_KAPPA },
    Acquisition::Ei { xi: DEFAULT_XI },
    Acquisition::Pi { xi: DEFAULT_XI },
];

impl Acquisition {
    /// Utility of a candidate with predicted `mean` and `std`, given the best observed score
    ///
    /// `Hedge` has no utility of its own; it is scored like EI.
    pub fn utility(&self, mean: f64, std: f64, best: f64) -> f64 {
        match *self {
            Acquisition::Lcb { kappa } => -(mean - kappa * std),
            Acquisition::Ei { xi } => {
                let improvement = best - xi - mean;
                let z = improvement / std;
                improvement * normal_cdf(z) + std * normal_pdf(z)
            }
            Acquisition::Pi { xi } => normal_cdf((best - xi - mean) / std),
            Acquisition::Hedge { .. } => Acquisition::Ei { xi: DEFAULT_XI }.utility(mean, std, best),
        }
    }
}

/// Index of the largest utility; NaN utilities never win
pub(crate) fn argmax(values: impl IntoIterator<Item = f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, v) in values.into_iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        if best.map_or(true, |(_, b)| v > b) {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}

/// Softmax probabilities of `eta * gains`, shifted for stability
pub(crate) fn softmax(gains: &[f64], eta: f64) -> Vec<f64> {
    let max = gains.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let weights: Vec<f64> = gains.iter().map(|g| (eta * (g - max)).exp()).collect();
    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return vec![1.0 / gains.len() as f64; gains.len()];
    }
    weights.into_iter().map(|w| w / total).collect()
}

/// Standard normal CDF approximation
fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / std::f64::consts::SQRT_2))
}

/// Standard normal PDF
fn normal_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * std::f64::consts::PI).sqrt()
}

/// Abramowitz and Stegun 7.1.26, highest degree first
const ERF_COEFFICIENTS: [f64; 5] = [
    1.061405429,
    -1.453152027,
    1.421413741,
    -0.284496736,
    0.254829592,
];
const ERF_P: f64 = 0.3275911;

/// Error function, absolute error below 1.5e-7
fn erf(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + ERF_P * z);
    let poly = ERF_COEFFICIENTS.iter().fold(0.0, |acc, c| acc * t + c) * t;
    (1.0 - poly * (-z * z).exp()).copysign(x)
}

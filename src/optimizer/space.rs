//! Search space of the optimizer and its numeric transform
//!
//! Real and integer dimensions map to the unit interval; categorical
//! dimensions are one-hot encoded. The surrogate only ever sees the
//! transformed representation.

use super::OptimizerError;
use crate::parameters::{Dimension, ParameterValue};
use rand::Rng;

/// Ordered list of dimensions making up a point
#[derive(Debug, Clone, PartialEq)]
pub struct Space {
    dimensions: Vec<Dimension>,
}

impl Space {
    pub fn new(dimensions: Vec<Dimension>) -> Result<Self, OptimizerError> {
        for (index, dim) in dimensions.iter().enumerate() {
            dim.validate()
                .map_err(|e| OptimizerError::InvalidSpace(format!("dimension {}: {}", index, e)))?;
        }
        Ok(Self { dimensions })
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// Width of a transformed point
    pub fn transformed_width(&self) -> usize {
        self.dimensions
            .iter()
            .map(|dim| match dim {
                Dimension::Categorical { choices } => choices.len(),
                _ => 1,
            })
            .sum()
    }

    /// Check length and membership of `point`
    pub fn check(&self, point: &[ParameterValue]) -> Result<(), OptimizerError> {
        if point.len() != self.dimensions.len() {
            return Err(OptimizerError::DimensionMismatch {
                expected: self.dimensions.len(),
                actual: point.len(),
            });
        }
        for (index, (dim, value)) in self.dimensions.iter().zip(point).enumerate() {
            if !dim.contains(value) {
                return Err(OptimizerError::OutOfSpace {
                    index,
                    value: value.to_string(),
                    dimension: format!("{:?}", dim),
                });
            }
        }
        Ok(())
    }

    /// Draw one point uniformly
    pub fn sample(&self, rng: &mut impl Rng) -> Vec<ParameterValue> {
        self.dimensions.iter().map(|dim| dim.sample(rng)).collect()
    }

    /// Map a point that lies in the space into surrogate features
    pub fn transform(&self, point: &[ParameterValue]) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.transformed_width());
        for (dim, value) in self.dimensions.iter().zip(point) {
            match dim {
                Dimension::Real { low, high } => {
                    let v = value.as_f64().unwrap_or(*low);
                    // halved so spans wider than f64::MAX stay finite
                    out.push((0.5 * v - 0.5 * low) / (0.5 * high - 0.5 * low));
                }
                Dimension::Integer { low, high } => {
                    let v = value.as_i64().unwrap_or(*low);
                    if high == low {
                        out.push(0.0);
                    } else {
                        let offset = i128::from(v) - i128::from(*low);
                        let span = i128::from(*high) - i128::from(*low);
                        out.push(offset as f64 / span as f64);
                    }
                }
                Dimension::Categorical { choices } => {
                    out.extend(choices.iter().map(|c| if c == value { 1.0 } else { 0.0 }));
                }
            }
        }
        out
    }
}

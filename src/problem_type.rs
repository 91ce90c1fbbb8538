//! Problem types supported by the search

use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type of supervised learning problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemType {
    /// Binary classification
    Binary,
    /// Multi-class classification
    Multiclass,
    /// Regression
    Regression,
    /// Binary classification over a time index
    TimeSeriesBinary,
    /// Multi-class classification over a time index
    TimeSeriesMulticlass,
    /// Regression over a time index (forecasting)
    TimeSeriesRegression,
}

impl ProblemType {
    /// All problem types, in declaration order
    pub const ALL: [ProblemType; 6] = [
        ProblemType::Binary,
        ProblemType::Multiclass,
        ProblemType::Regression,
        ProblemType::TimeSeriesBinary,
        ProblemType::TimeSeriesMulticlass,
        ProblemType::TimeSeriesRegression,
    ];

    pub fn is_regression(&self) -> bool {
        matches!(self, ProblemType::Regression | ProblemType::TimeSeriesRegression)
    }

    pub fn is_classification(&self) -> bool {
        !self.is_regression()
    }

    pub fn is_time_series(&self) -> bool {
        matches!(
            self,
            ProblemType::TimeSeriesBinary
                | ProblemType::TimeSeriesMulticlass
                | ProblemType::TimeSeriesRegression
        )
    }

    /// Problem type with the time-series aspect removed
    pub fn non_time_series(&self) -> ProblemType {
        match self {
            ProblemType::TimeSeriesBinary => ProblemType::Binary,
            ProblemType::TimeSeriesMulticlass => ProblemType::Multiclass,
            ProblemType::TimeSeriesRegression => ProblemType::Regression,
            other => *other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemType::Binary => "binary",
            ProblemType::Multiclass => "multiclass",
            ProblemType::Regression => "regression",
            ProblemType::TimeSeriesBinary => "time series binary",
            ProblemType::TimeSeriesMulticlass => "time series multiclass",
            ProblemType::TimeSeriesRegression => "time series regression",
        }
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProblemType {
    type Err = SearchError;

    /// Accepts the display form as well as snake_case aliases
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('_', " ");
        ProblemType::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| SearchError::InvalidInput(format!("unknown problem type '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_display() {
        for problem_type in ProblemType::ALL {
            let parsed: ProblemType = problem_type.to_string().parse().unwrap();
            assert_eq!(parsed, problem_type);
        }
        assert_eq!(
            "time_series_regression".parse::<ProblemType>().unwrap(),
            ProblemType::TimeSeriesRegression
        );
    }

    #[test]
    fn test_unknown_problem_type() {
        assert!(matches!(
            "clustering".parse::<ProblemType>(),
            Err(SearchError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_predicates() {
        assert!(ProblemType::TimeSeriesRegression.is_regression());
        assert!(ProblemType::TimeSeriesRegression.is_time_series());
        assert!(ProblemType::Multiclass.is_classification());
        assert_eq!(ProblemType::TimeSeriesBinary.non_time_series(), ProblemType::Binary);
    }
}

//! Error types for the Kolosal search core

use crate::parameters::ParameterMap;
use thiserror::Error;

/// Result type alias for search operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Main error type for the search core
#[derive(Error, Debug)]
pub enum SearchError {
    /// Malformed algorithm or tuner configuration, raised at construction time
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The tuner backend rejected an observation because a value falls outside its dimension
    #[error("Invalid parameters: {message}")]
    Parameter {
        message: String,
        parameters: ParameterMap,
        score: f64,
    },

    #[error("No such pipeline allowed in this search: {0}")]
    PipelineNotFound(String),

    #[error("Component not found: {0}")]
    MissingComponent(String),

    #[error("Component not yet fitted: {0}")]
    ComponentNotFitted(String),

    #[error("Search space exhausted: every point has already been proposed")]
    SearchSpaceExhausted,

    /// Unclassified failure of the optimization backend
    #[error("Optimization error: {0}")]
    Optimization(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SearchError {
    /// Whether a driver loop may skip the offending pipeline and keep searching
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SearchError::Parameter { .. })
    }
}

impl From<polars::error::PolarsError> for SearchError {
    fn from(err: polars::error::PolarsError) -> Self {
        SearchError::Data(err.to_string())
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SearchError::Configuration("bad ranges".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad ranges");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SearchError = io_err.into();
        assert!(matches!(err, SearchError::Io(_)));
    }

    #[test]
    fn test_only_parameter_errors_are_recoverable() {
        let err = SearchError::Parameter {
            message: "out of bounds".to_string(),
            parameters: ParameterMap::new(),
            score: 0.5,
        };
        assert!(err.is_recoverable());
        assert!(!SearchError::Optimization("boom".to_string()).is_recoverable());
    }
}

//! Kolosal Search - AutoML pipeline search core
//!
//! This crate decides which pipelines an AutoML run evaluates next:
//! - Batch algorithm moving from naive baselines to tuned and ensembled pipelines
//! - Bayesian hyperparameter tuning over mixed real/integer/categorical spaces
//! - Search-space extraction from a pipeline's component graph
//!
//! Training and scoring pipelines is left to the caller, which reports scores
//! back through [`algorithm::AutoMLAlgorithm::add_result`].
//!
//! # Modules
//!
//! ## Search
//! - [`algorithm`] - Batch schedule, best-per-family table, configuration
//! - [`tuners`] - Tuner contract, Bayesian and random search tuners
//! - [`optimizer`] - Extra-trees surrogate and acquisition functions
//!
//! ## Pipelines
//! - [`components`] - Component catalog and hyperparameter ranges
//! - [`pipelines`] - Pipeline handles and factory
//! - [`parameters`] - Parameter values, dimensions and nested maps
//!
//! ## Data
//! - [`data`] - Training data with per-column logical types
//! - [`problem_type`] - Supported problem types

// Core error handling
pub mod error;

// Data and parameters
pub mod data;
pub mod parameters;
pub mod problem_type;

// Pipelines
pub mod components;
pub mod pipelines;

// Search
pub mod algorithm;
pub mod optimizer;
pub mod tuners;

pub use error::{Result, SearchError};

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{Result, SearchError};

    // Data
    pub use crate::data::{Dataset, LogicalType};
    pub use crate::problem_type::ProblemType;

    // Parameters
    pub use crate::parameters::{
        Dimension, HyperparameterRanges, ParameterMap, ParameterSetting, ParameterSettings,
        ParameterValue,
    };

    // Pipelines
    pub use crate::components::{get_estimators, get_hyperparameter_ranges, handle_component_class, ModelFamily};
    pub use crate::pipelines::{make_pipeline, make_stacked_ensemble_pipeline, Pipeline};

    // Search
    pub use crate::algorithm::{
        AlgorithmConfig, AutoMLAlgorithm, BatchAlgorithm, BestPipelineInfo, Phase,
        TrainedPipelineResults,
    };
    pub use crate::optimizer::{Acquisition, BayesianConfig};
    pub use crate::tuners::{BayesianTuner, RandomSearchTuner, Tuner, TunerFactory};
}

//! Static component metadata and registry lookups

use crate::error::{Result, SearchError};
use crate::parameters::{ComponentParameters, ComponentRanges, Dimension, ParameterValue};
use crate::problem_type::ProblemType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse grouping of estimators by underlying algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModelFamily {
    Linear,
    RandomForest,
    ExtraTrees,
    XGBoost,
    LightGBM,
    CatBoost,
    Ensemble,
    /// Pipelines without an estimator
    None,
}

impl ModelFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelFamily::Linear => "Linear",
            ModelFamily::RandomForest => "Random Forest",
            ModelFamily::ExtraTrees => "Extra Trees",
            ModelFamily::XGBoost => "XGBoost",
            ModelFamily::LightGBM => "LightGBM",
            ModelFamily::CatBoost => "CatBoost",
            ModelFamily::Ensemble => "Ensemble",
            ModelFamily::None => "None",
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role a component plays in a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentKind {
    Transformer,
    Sampler,
    FeatureSelector,
    ColumnSelector,
    Estimator,
    Ensemble,
}

/// Static description of a component
#[derive(Debug)]
pub struct ComponentSpec {
    pub name: &'static str,
    pub kind: ComponentKind,
    pub model_family: ModelFamily,
    /// Problem types an estimator or selector can be used for; empty means any
    pub problem_types: &'static [ProblemType],
    /// Constructor accepts `n_jobs`
    pub supports_parallelism: bool,
    /// Constructor accepts `number_features`
    pub supports_feature_count: bool,
    /// Consumes natural-language columns
    pub handles_text: bool,
    ranges: fn() -> ComponentRanges,
    defaults: fn() -> ComponentParameters,
}

impl ComponentSpec {
    /// Intrinsic hyperparameter ranges
    pub fn hyperparameter_ranges(&self) -> ComponentRanges {
        (self.ranges)()
    }

    /// Parameters a freshly constructed component uses
    pub fn default_parameters(&self) -> ComponentParameters {
        (self.defaults)()
    }

    pub fn supports(&self, problem_type: ProblemType) -> bool {
        self.problem_types.is_empty() || self.problem_types.contains(&problem_type)
    }

    pub fn is_estimator(&self) -> bool {
        matches!(self.kind, ComponentKind::Estimator | ComponentKind::Ensemble)
    }
}

impl PartialEq for ComponentSpec {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ComponentSpec {}

const CLASSIFICATION: &[ProblemType] = &[
    ProblemType::Binary,
    ProblemType::Multiclass,
    ProblemType::TimeSeriesBinary,
    ProblemType::TimeSeriesMulticlass,
];

const REGRESSION: &[ProblemType] = &[ProblemType::Regression, ProblemType::TimeSeriesRegression];

fn no_ranges() -> ComponentRanges {
    ComponentRanges::new()
}

fn no_parameters() -> ComponentParameters {
    ComponentParameters::new()
}

fn params<const N: usize>(entries: [(&str, ParameterValue); N]) -> ComponentParameters {
    entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

fn ranges<const N: usize>(entries: [(&str, Dimension); N]) -> ComponentRanges {
    entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

// Transformers

pub static LABEL_ENCODER: ComponentSpec = ComponentSpec {
    name: "Label Encoder",
    kind: ComponentKind::Transformer,
    model_family: ModelFamily::None,
    problem_types: CLASSIFICATION,
    supports_parallelism: false,
    supports_feature_count: false,
    handles_text: false,
    ranges: no_ranges,
    defaults: || params([("positive_label", ParameterValue::Null)]),
};

pub static IMPUTER: ComponentSpec = ComponentSpec {
    name: "Imputer",
    kind: ComponentKind::Transformer,
    model_family: ModelFamily::None,
    problem_types: &[],
    supports_parallelism: false,
    supports_feature_count: false,
    handles_text: false,
    ranges: || {
        ranges([
            ("categorical_impute_strategy", Dimension::categorical(["most_frequent"])),
            (
                "numeric_impute_strategy",
                Dimension::categorical(["mean", "median", "most_frequent", "knn"]),
            ),
        ])
    },
    defaults: || {
        params([
            ("categorical_impute_strategy", "most_frequent".into()),
            ("numeric_impute_strategy", "mean".into()),
        ])
    },
};

pub static TIME_SERIES_FEATURIZER: ComponentSpec = ComponentSpec {
    name: "Time Series Featurizer",
    kind: ComponentKind::Transformer,
    model_family: ModelFamily::None,
    problem_types: &[
        ProblemType::TimeSeriesBinary,
        ProblemType::TimeSeriesMulticlass,
        ProblemType::TimeSeriesRegression,
    ],
    supports_parallelism: false,
    supports_feature_count: false,
    handles_text: false,
    ranges: || {
        ranges([
            ("conf_level", Dimension::real(0.001, 1.0)),
            ("rolling_window_size", Dimension::real(0.001, 1.0)),
        ])
    },
    defaults: || {
        params([
            ("time_index", ParameterValue::Null),
            ("max_delay", 2i64.into()),
            ("gap", 1i64.into()),
            ("forecast_horizon", 1i64.into()),
            ("conf_level", 0.05.into()),
            ("rolling_window_size", 0.25.into()),
        ])
    },
};

pub static DATETIME_FEATURIZER: ComponentSpec = ComponentSpec {
    name: "DateTime Featurizer",
    kind: ComponentKind::Transformer,
    model_family: ModelFamily::None,
    problem_types: &[],
    supports_parallelism: false,
    supports_feature_count: false,
    handles_text: false,
    ranges: no_ranges,
    defaults: || {
        params([(
            "features_to_extract",
            ParameterValue::List(
                ["year", "month", "day_of_week", "hour"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            ),
        )])
    },
};

pub static NATURAL_LANGUAGE_FEATURIZER: ComponentSpec = ComponentSpec {
    name: "Natural Language Featurizer",
    kind: ComponentKind::Transformer,
    model_family: ModelFamily::None,
    problem_types: &[],
    supports_parallelism: false,
    supports_feature_count: false,
    handles_text: true,
    ranges: no_ranges,
    defaults: no_parameters,
};

pub static ONE_HOT_ENCODER: ComponentSpec = ComponentSpec {
    name: "One Hot Encoder",
    kind: ComponentKind::Transformer,
    model_family: ModelFamily::None,
    problem_types: &[],
    supports_parallelism: false,
    supports_feature_count: false,
    handles_text: false,
    ranges: no_ranges,
    defaults: || params([("top_n", 10i64.into()), ("handle_unknown", "ignore".into())]),
};

pub static STANDARD_SCALER: ComponentSpec = ComponentSpec {
    name: "Standard Scaler",
    kind: ComponentKind::Transformer,
    model_family: ModelFamily::None,
    problem_types: &[],
    supports_parallelism: false,
    supports_feature_count: false,
    handles_text: false,
    ranges: no_ranges,
    defaults: no_parameters,
};

pub static UNDERSAMPLER: ComponentSpec = ComponentSpec {
    name: "Undersampler",
    kind: ComponentKind::Sampler,
    model_family: ModelFamily::None,
    problem_types: CLASSIFICATION,
    supports_parallelism: false,
    supports_feature_count: false,
    handles_text: false,
    ranges: no_ranges,
    defaults: || {
        params([
            ("sampling_ratio", 0.25.into()),
            ("min_samples", 100i64.into()),
            ("min_percentage", 0.1.into()),
        ])
    },
};

pub static OVERSAMPLER: ComponentSpec = ComponentSpec {
    name: "Oversampler",
    kind: ComponentKind::Sampler,
    model_family: ModelFamily::None,
    problem_types: CLASSIFICATION,
    supports_parallelism: true,
    supports_feature_count: false,
    handles_text: false,
    ranges: no_ranges,
    defaults: || {
        params([
            ("sampling_ratio", 0.25.into()),
            ("k_neighbors_default", 5i64.into()),
            ("n_jobs", (-1i64).into()),
        ])
    },
};

// Selectors

fn select_from_model_ranges() -> ComponentRanges {
    ranges([
        ("percent_features", Dimension::real(0.01, 1.0)),
        ("threshold", Dimension::categorical(["mean", "median"])),
    ])
}

fn select_from_model_defaults() -> ComponentParameters {
    params([
        ("number_features", ParameterValue::Null),
        ("n_estimators", 10i64.into()),
        ("max_depth", ParameterValue::Null),
        ("percent_features", 0.5.into()),
        ("threshold", "median".into()),
        ("n_jobs", (-1i64).into()),
    ])
}

pub static RF_CLASSIFIER_SELECT_FROM_MODEL: ComponentSpec = ComponentSpec {
    name: "RF Classifier Select From Model",
    kind: ComponentKind::FeatureSelector,
    model_family: ModelFamily::None,
    problem_types: CLASSIFICATION,
    supports_parallelism: true,
    supports_feature_count: true,
    handles_text: false,
    ranges: select_from_model_ranges,
    defaults: select_from_model_defaults,
};

pub static RF_REGRESSOR_SELECT_FROM_MODEL: ComponentSpec = ComponentSpec {
    name: "RF Regressor Select From Model",
    kind: ComponentKind::FeatureSelector,
    model_family: ModelFamily::None,
    problem_types: REGRESSION,
    supports_parallelism: true,
    supports_feature_count: true,
    handles_text: false,
    ranges: select_from_model_ranges,
    defaults: select_from_model_defaults,
};

pub static SELECT_COLUMNS_TRANSFORMER: ComponentSpec = ComponentSpec {
    name: "Select Columns Transformer",
    kind: ComponentKind::ColumnSelector,
    model_family: ModelFamily::None,
    problem_types: &[],
    supports_parallelism: false,
    supports_feature_count: false,
    handles_text: false,
    ranges: no_ranges,
    defaults: || params([("columns", ParameterValue::Null)]),
};

// Estimators

pub static LOGISTIC_REGRESSION_CLASSIFIER: ComponentSpec = ComponentSpec {
    name: "Logistic Regression Classifier",
    kind: ComponentKind::Estimator,
    model_family: ModelFamily::Linear,
    problem_types: CLASSIFICATION,
    supports_parallelism: true,
    supports_feature_count: false,
    handles_text: false,
    ranges: || {
        ranges([
            ("penalty", Dimension::categorical(["l2"])),
            ("C", Dimension::real(0.01, 10.0)),
        ])
    },
    defaults: || {
        params([
            ("penalty", "l2".into()),
            ("C", 1.0.into()),
            ("multi_class", "auto".into()),
            ("solver", "lbfgs".into()),
            ("n_jobs", (-1i64).into()),
        ])
    },
};

pub static LINEAR_REGRESSOR: ComponentSpec = ComponentSpec {
    name: "Linear Regressor",
    kind: ComponentKind::Estimator,
    model_family: ModelFamily::Linear,
    problem_types: REGRESSION,
    supports_parallelism: true,
    supports_feature_count: false,
    handles_text: false,
    ranges: || ranges([("fit_intercept", Dimension::categorical([true, false]))]),
    defaults: || params([("fit_intercept", true.into()), ("n_jobs", (-1i64).into())]),
};

pub static ELASTIC_NET_CLASSIFIER: ComponentSpec = ComponentSpec {
    name: "Elastic Net Classifier",
    kind: ComponentKind::Estimator,
    model_family: ModelFamily::Linear,
    problem_types: CLASSIFICATION,
    supports_parallelism: true,
    supports_feature_count: false,
    handles_text: false,
    ranges: || {
        ranges([
            ("C", Dimension::real(0.01, 10.0)),
            ("l1_ratio", Dimension::real(0.0, 1.0)),
        ])
    },
    defaults: || {
        params([
            ("penalty", "elasticnet".into()),
            ("C", 1.0.into()),
            ("l1_ratio", 0.15.into()),
            ("multi_class", "auto".into()),
            ("solver", "saga".into()),
            ("n_jobs", (-1i64).into()),
        ])
    },
};

pub static ELASTIC_NET_REGRESSOR: ComponentSpec = ComponentSpec {
    name: "Elastic Net Regressor",
    kind: ComponentKind::Estimator,
    model_family: ModelFamily::Linear,
    problem_types: REGRESSION,
    supports_parallelism: false,
    supports_feature_count: false,
    handles_text: false,
    ranges: || {
        ranges([
            ("alpha", Dimension::real(0.0, 1.0)),
            ("l1_ratio", Dimension::real(0.0, 1.0)),
        ])
    },
    defaults: || {
        params([
            ("alpha", 0.0001.into()),
            ("l1_ratio", 0.15.into()),
            ("max_iter", 1000i64.into()),
        ])
    },
};

fn random_forest_ranges() -> ComponentRanges {
    ranges([
        ("n_estimators", Dimension::integer(10, 1000)),
        ("max_depth", Dimension::integer(1, 10)),
    ])
}

fn random_forest_defaults() -> ComponentParameters {
    params([
        ("n_estimators", 100i64.into()),
        ("max_depth", 6i64.into()),
        ("n_jobs", (-1i64).into()),
    ])
}

pub static RANDOM_FOREST_CLASSIFIER: ComponentSpec = ComponentSpec {
    name: "Random Forest Classifier",
    kind: ComponentKind::Estimator,
    model_family: ModelFamily::RandomForest,
    problem_types: CLASSIFICATION,
    supports_parallelism: true,
    supports_feature_count: false,
    handles_text: false,
    ranges: random_forest_ranges,
    defaults: random_forest_defaults,
};

pub static RANDOM_FOREST_REGRESSOR: ComponentSpec = ComponentSpec {
    name: "Random Forest Regressor",
    kind: ComponentKind::Estimator,
    model_family: ModelFamily::RandomForest,
    problem_types: REGRESSION,
    supports_parallelism: true,
    supports_feature_count: false,
    handles_text: false,
    ranges: random_forest_ranges,
    defaults: random_forest_defaults,
};

fn extra_trees_ranges() -> ComponentRanges {
    ranges([
        ("max_features", Dimension::categorical(["auto", "sqrt", "log2"])),
        ("max_depth", Dimension::integer(4, 10)),
    ])
}

fn extra_trees_defaults() -> ComponentParameters {
    params([
        ("n_estimators", 100i64.into()),
        ("max_features", "sqrt".into()),
        ("max_depth", 6i64.into()),
        ("min_samples_split", 2i64.into()),
        ("n_jobs", (-1i64).into()),
    ])
}

pub static EXTRA_TREES_CLASSIFIER: ComponentSpec = ComponentSpec {
    name: "Extra Trees Classifier",
    kind: ComponentKind::Estimator,
    model_family: ModelFamily::ExtraTrees,
    problem_types: CLASSIFICATION,
    supports_parallelism: true,
    supports_feature_count: false,
    handles_text: false,
    ranges: extra_trees_ranges,
    defaults: extra_trees_defaults,
};

pub static EXTRA_TREES_REGRESSOR: ComponentSpec = ComponentSpec {
    name: "Extra Trees Regressor",
    kind: ComponentKind::Estimator,
    model_family: ModelFamily::ExtraTrees,
    problem_types: REGRESSION,
    supports_parallelism: true,
    supports_feature_count: false,
    handles_text: false,
    ranges: extra_trees_ranges,
    defaults: extra_trees_defaults,
};

fn xgboost_ranges() -> ComponentRanges {
    ranges([
        ("eta", Dimension::real(0.000001, 1.0)),
        ("max_depth", Dimension::integer(1, 10)),
        ("min_child_weight", Dimension::real(1.0, 10.0)),
        ("n_estimators", Dimension::integer(1, 1000)),
    ])
}

fn xgboost_defaults() -> ComponentParameters {
    params([
        ("eta", 0.1.into()),
        ("max_depth", 6i64.into()),
        ("min_child_weight", 1.0.into()),
        ("n_estimators", 100i64.into()),
        ("n_jobs", (-1i64).into()),
    ])
}

pub static XGBOOST_CLASSIFIER: ComponentSpec = ComponentSpec {
    name: "XGBoost Classifier",
    kind: ComponentKind::Estimator,
    model_family: ModelFamily::XGBoost,
    problem_types: CLASSIFICATION,
    supports_parallelism: true,
    supports_feature_count: false,
    handles_text: false,
    ranges: xgboost_ranges,
    defaults: xgboost_defaults,
};

pub static XGBOOST_REGRESSOR: ComponentSpec = ComponentSpec {
    name: "XGBoost Regressor",
    kind: ComponentKind::Estimator,
    model_family: ModelFamily::XGBoost,
    problem_types: REGRESSION,
    supports_parallelism: true,
    supports_feature_count: false,
    handles_text: false,
    ranges: xgboost_ranges,
    defaults: xgboost_defaults,
};

fn lightgbm_ranges() -> ComponentRanges {
    ranges([
        ("learning_rate", Dimension::real(0.000001, 1.0)),
        ("boosting_type", Dimension::categorical(["gbdt", "dart", "goss", "rf"])),
        ("n_estimators", Dimension::integer(10, 100)),
        ("max_depth", Dimension::integer(0, 10)),
        ("num_leaves", Dimension::integer(2, 100)),
        ("min_child_samples", Dimension::integer(1, 100)),
        ("bagging_fraction", Dimension::real(0.000001, 0.999999)),
    ])
}

fn lightgbm_defaults() -> ComponentParameters {
    params([
        ("boosting_type", "gbdt".into()),
        ("learning_rate", 0.1.into()),
        ("n_estimators", 100i64.into()),
        ("max_depth", 0i64.into()),
        ("num_leaves", 31i64.into()),
        ("min_child_samples", 20i64.into()),
        ("bagging_fraction", 0.9.into()),
        ("n_jobs", (-1i64).into()),
    ])
}

pub static LIGHTGBM_CLASSIFIER: ComponentSpec = ComponentSpec {
    name: "LightGBM Classifier",
    kind: ComponentKind::Estimator,
    model_family: ModelFamily::LightGBM,
    problem_types: CLASSIFICATION,
    supports_parallelism: true,
    supports_feature_count: false,
    handles_text: false,
    ranges: lightgbm_ranges,
    defaults: lightgbm_defaults,
};

pub static LIGHTGBM_REGRESSOR: ComponentSpec = ComponentSpec {
    name: "LightGBM Regressor",
    kind: ComponentKind::Estimator,
    model_family: ModelFamily::LightGBM,
    problem_types: REGRESSION,
    supports_parallelism: true,
    supports_feature_count: false,
    handles_text: false,
    ranges: lightgbm_ranges,
    defaults: lightgbm_defaults,
};

fn catboost_ranges() -> ComponentRanges {
    ranges([
        ("n_estimators", Dimension::integer(4, 100)),
        ("eta", Dimension::real(0.000001, 1.0)),
        ("max_depth", Dimension::integer(4, 10)),
    ])
}

fn catboost_defaults() -> ComponentParameters {
    params([
        ("n_estimators", 10i64.into()),
        ("eta", 0.03.into()),
        ("max_depth", 6i64.into()),
        ("silent", true.into()),
        ("allow_writing_files", false.into()),
        ("n_jobs", (-1i64).into()),
    ])
}

pub static CATBOOST_CLASSIFIER: ComponentSpec = ComponentSpec {
    name: "CatBoost Classifier",
    kind: ComponentKind::Estimator,
    model_family: ModelFamily::CatBoost,
    problem_types: CLASSIFICATION,
    supports_parallelism: true,
    supports_feature_count: false,
    handles_text: false,
    ranges: catboost_ranges,
    defaults: catboost_defaults,
};

pub static CATBOOST_REGRESSOR: ComponentSpec = ComponentSpec {
    name: "CatBoost Regressor",
    kind: ComponentKind::Estimator,
    model_family: ModelFamily::CatBoost,
    problem_types: REGRESSION,
    supports_parallelism: true,
    supports_feature_count: false,
    handles_text: false,
    ranges: catboost_ranges,
    defaults: catboost_defaults,
};

// Ensembles

pub static STACKED_ENSEMBLE_CLASSIFIER: ComponentSpec = ComponentSpec {
    name: "Stacked Ensemble Classifier",
    kind: ComponentKind::Ensemble,
    model_family: ModelFamily::Ensemble,
    problem_types: CLASSIFICATION,
    supports_parallelism: true,
    supports_feature_count: false,
    handles_text: false,
    ranges: no_ranges,
    defaults: || params([("final_estimator", ParameterValue::Null), ("n_jobs", (-1i64).into())]),
};

pub static STACKED_ENSEMBLE_REGRESSOR: ComponentSpec = ComponentSpec {
    name: "Stacked Ensemble Regressor",
    kind: ComponentKind::Ensemble,
    model_family: ModelFamily::Ensemble,
    problem_types: REGRESSION,
    supports_parallelism: true,
    supports_feature_count: false,
    handles_text: false,
    ranges: no_ranges,
    defaults: || params([("final_estimator", ParameterValue::Null), ("n_jobs", (-1i64).into())]),
};

static COMPONENTS: [&ComponentSpec; 28] = [
    &LABEL_ENCODER,
    &IMPUTER,
    &TIME_SERIES_FEATURIZER,
    &DATETIME_FEATURIZER,
    &NATURAL_LANGUAGE_FEATURIZER,
    &ONE_HOT_ENCODER,
    &STANDARD_SCALER,
    &UNDERSAMPLER,
    &OVERSAMPLER,
    &RF_CLASSIFIER_SELECT_FROM_MODEL,
    &RF_REGRESSOR_SELECT_FROM_MODEL,
    &SELECT_COLUMNS_TRANSFORMER,
    &CATBOOST_CLASSIFIER,
    &ELASTIC_NET_CLASSIFIER,
    &EXTRA_TREES_CLASSIFIER,
    &LIGHTGBM_CLASSIFIER,
    &LOGISTIC_REGRESSION_CLASSIFIER,
    &RANDOM_FOREST_CLASSIFIER,
    &XGBOOST_CLASSIFIER,
    &CATBOOST_REGRESSOR,
    &ELASTIC_NET_REGRESSOR,
    &EXTRA_TREES_REGRESSOR,
    &LIGHTGBM_REGRESSOR,
    &LINEAR_REGRESSOR,
    &RANDOM_FOREST_REGRESSOR,
    &XGBOOST_REGRESSOR,
    &STACKED_ENSEMBLE_CLASSIFIER,
    &STACKED_ENSEMBLE_REGRESSOR,
];

/// Every registered component
pub fn all_components() -> &'static [&'static ComponentSpec] {
    &COMPONENTS
}

/// Look up a component by name
pub fn handle_component_class(name: &str) -> Result<&'static ComponentSpec> {
    COMPONENTS
        .iter()
        .copied()
        .find(|c| c.name == name)
        .ok_or_else(|| SearchError::MissingComponent(name.to_string()))
}

/// Estimators usable for `problem_type`, in registry order
pub fn get_estimators(problem_type: ProblemType) -> Vec<&'static ComponentSpec> {
    COMPONENTS
        .iter()
        .copied()
        .filter(|c| c.kind == ComponentKind::Estimator && c.supports(problem_type))
        .collect()
}

/// The small fixed baseline set: one linear model and one random forest
pub fn naive_estimators(problem_type: ProblemType) -> [&'static ComponentSpec; 2] {
    if problem_type.is_regression() {
        [&LINEAR_REGRESSOR, &RANDOM_FOREST_REGRESSOR]
    } else {
        [&LOGISTIC_REGRESSION_CLASSIFIER, &RANDOM_FOREST_CLASSIFIER]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_lie_within_ranges() {
        for component in all_components() {
            let defaults = component.default_parameters();
            for (name, dimension) in component.hyperparameter_ranges() {
                dimension.validate().unwrap();
                let value = defaults
                    .get(&name)
                    .unwrap_or_else(|| panic!("{} has no default for {}", component.name, name));
                assert!(
                    dimension.contains(value),
                    "{} default {} = {} outside {:?}",
                    component.name,
                    name,
                    value,
                    dimension
                );
            }
        }
    }

    #[test]
    fn test_parallel_components_default_n_jobs() {
        for component in all_components() {
            let has_n_jobs = component.default_parameters().contains_key("n_jobs");
            assert_eq!(has_n_jobs, component.supports_parallelism, "{}", component.name);
        }
    }

    #[test]
    fn test_handle_component_class() {
        let spec = handle_component_class("Random Forest Classifier").unwrap();
        assert_eq!(spec.model_family, ModelFamily::RandomForest);
        assert!(matches!(
            handle_component_class("Quantum Regressor"),
            Err(SearchError::MissingComponent(_))
        ));
    }

    #[test]
    fn test_get_estimators_by_problem_type() {
        let binary = get_estimators(ProblemType::Binary);
        assert_eq!(binary.len(), 7);
        assert!(binary.iter().all(|e| e.supports(ProblemType::Binary)));

        let regression = get_estimators(ProblemType::TimeSeriesRegression);
        assert!(regression.contains(&&LINEAR_REGRESSOR));
        assert!(!regression.contains(&&LOGISTIC_REGRESSION_CLASSIFIER));
    }

    #[test]
    fn test_naive_estimators_are_registered() {
        for problem_type in ProblemType::ALL {
            let estimators = get_estimators(problem_type);
            for naive in naive_estimators(problem_type) {
                assert!(estimators.contains(&naive));
            }
        }
    }
}

//! Batch algorithm configuration

use crate::error::{Result, SearchError};
use crate::optimizer::BayesianConfig;
use crate::parameters::{
    parse_parameter_settings, ranges_from_settings, values_from_settings, HyperparameterRanges,
    ParameterMap, ParameterSetting, ParameterSettings,
};
use crate::problem_type::ProblemType;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for [`BatchAlgorithm`](super::BatchAlgorithm)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlgorithmConfig {
    /// Problem type of the training data
    pub problem_type: ProblemType,

    /// Sampler added to classification pipelines, e.g. `"Undersampler"`
    pub sampler_name: Option<String>,

    /// Seed for tuners and proposed pipelines
    pub random_seed: u64,

    /// Parallelism forwarded to every component that accepts it
    pub n_jobs: i64,

    /// Feature count forwarded to feature selectors
    pub number_features: Option<i64>,

    /// Run ensembles serially
    pub text_in_ensembling: bool,

    /// Fixed values applied to every proposed pipeline
    pub pipeline_params: ParameterSettings,

    /// Ranges replacing a component's own ranges
    pub custom_hyperparameters: ParameterSettings,

    /// Backend configuration of the default tuners
    pub tuner: BayesianConfig,
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        Self {
            problem_type: ProblemType::Binary,
            sampler_name: None,
            random_seed: 0,
            n_jobs: -1,
            number_features: None,
            text_in_ensembling: false,
            pipeline_params: ParameterSettings::new(),
            custom_hyperparameters: ParameterSettings::new(),
            tuner: BayesianConfig::default(),
        }
    }
}

impl AlgorithmConfig {
    pub fn new(problem_type: ProblemType) -> Self {
        Self {
            problem_type,
            ..Self::default()
        }
    }

    pub fn with_sampler_name(mut self, name: impl Into<String>) -> Self {
        self.sampler_name = Some(name.into());
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    pub fn with_n_jobs(mut self, n_jobs: i64) -> Self {
        self.n_jobs = n_jobs;
        self
    }

    pub fn with_number_features(mut self, n: i64) -> Self {
        self.number_features = Some(n);
        self
    }

    pub fn with_text_in_ensembling(mut self, enabled: bool) -> Self {
        self.text_in_ensembling = enabled;
        self
    }

    pub fn with_pipeline_params(mut self, params: ParameterMap) -> Self {
        self.pipeline_params = params
            .into_iter()
            .map(|(component, values)| {
                let values = values
                    .into_iter()
                    .map(|(name, value)| (name, ParameterSetting::Value(value)))
                    .collect();
                (component, values)
            })
            .collect();
        self
    }

    pub fn with_custom_hyperparameters(mut self, ranges: HyperparameterRanges) -> Self {
        self.custom_hyperparameters = ranges
            .into_iter()
            .map(|(component, dims)| {
                let dims = dims
                    .into_iter()
                    .map(|(name, dim)| (name, ParameterSetting::Range(dim)))
                    .collect();
                (component, dims)
            })
            .collect();
        self
    }

    /// Raw settings, checked when the algorithm is built
    pub fn with_pipeline_settings(mut self, settings: ParameterSettings) -> Self {
        self.pipeline_params = settings;
        self
    }

    /// Raw settings, checked when the algorithm is built
    pub fn with_custom_settings(mut self, settings: ParameterSettings) -> Self {
        self.custom_hyperparameters = settings;
        self
    }

    pub fn with_tuner_config(mut self, tuner: BayesianConfig) -> Self {
        self.tuner = tuner;
        self
    }

    /// Parse from JSON; malformed parameter sections are configuration errors
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut value: serde_json::Value = serde_json::from_str(json)?;
        let mut sections = Vec::new();
        if let Some(object) = value.as_object_mut() {
            for key in ["pipeline_params", "custom_hyperparameters"] {
                match object.remove(key) {
                    None | Some(serde_json::Value::Null) => {}
                    Some(raw) => sections.push((key, parse_parameter_settings(&raw, key)?)),
                }
            }
        }

        let mut config: AlgorithmConfig = serde_json::from_value(value)?;
        for (key, settings) in sections {
            if key == "pipeline_params" {
                config.pipeline_params = settings;
            } else {
                config.custom_hyperparameters = settings;
            }
        }
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Split user settings into tuner ranges and fixed values
    pub fn resolve(&self) -> Result<(HyperparameterRanges, ParameterMap)> {
        if let Some(n) = self.number_features {
            if n <= 0 {
                return Err(SearchError::Configuration(format!(
                    "number_features must be positive, got {}",
                    n
                )));
            }
        }
        if self.n_jobs == 0 || self.n_jobs < -1 {
            return Err(SearchError::Configuration(format!(
                "n_jobs must be -1 or a positive integer, got {}",
                self.n_jobs
            )));
        }
        let custom = ranges_from_settings(&self.custom_hyperparameters)?;
        let fixed = values_from_settings(&self.pipeline_params)?;
        Ok((custom, fixed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::{Dimension, ParameterValue};
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AlgorithmConfig::default();
        assert_eq!(config.random_seed, 0);
        assert_eq!(config.n_jobs, -1);
        assert!(!config.text_in_ensembling);
        assert!(config.resolve().is_ok());
    }

    #[test]
    fn test_from_json_str() {
        let config = AlgorithmConfig::from_json_str(
            r#"{
                "problem_type": "regression",
                "n_jobs": 2,
                "pipeline_params": {"Imputer": {"numeric_impute_strategy": "median"}},
                "custom_hyperparameters": {
                    "Random Forest Regressor": {"max_depth": {"type": "integer", "low": 2, "high": 4}}
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.problem_type, ProblemType::Regression);
        let (custom, fixed) = config.resolve().unwrap();
        assert_eq!(custom["Random Forest Regressor"]["max_depth"], Dimension::integer(2, 4));
        assert_eq!(
            fixed["Imputer"]["numeric_impute_strategy"],
            ParameterValue::from("median")
        );
    }

    #[test]
    fn test_non_mapping_sections_are_configuration_errors() {
        let err = AlgorithmConfig::from_json_str(r#"{"custom_hyperparameters": [1, 2]}"#).unwrap_err();
        assert!(matches!(err, SearchError::Configuration(_)));

        let err = AlgorithmConfig::from_json_str(r#"{"pipeline_params": {"Imputer": 5}}"#).unwrap_err();
        assert!(matches!(err, SearchError::Configuration(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"problem_type": "multiclass", "random_seed": 9}}"#).unwrap();
        let config = AlgorithmConfig::from_file(file.path()).unwrap();
        assert_eq!(config.problem_type, ProblemType::Multiclass);
        assert_eq!(config.random_seed, 9);
        assert_eq!(config.n_jobs, -1);
    }

    #[test]
    fn test_resolve_rejects_bad_values() {
        assert!(AlgorithmConfig::default().with_n_jobs(0).resolve().is_err());
        assert!(AlgorithmConfig::default().with_number_features(0).resolve().is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let config = AlgorithmConfig::new(ProblemType::Binary)
            .with_sampler_name("Undersampler")
            .with_number_features(4);
        let json = config.to_json_string().unwrap();
        assert_eq!(AlgorithmConfig::from_json_str(&json).unwrap(), config);
    }
}

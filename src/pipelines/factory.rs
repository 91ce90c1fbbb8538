//! Pipeline construction from an estimator and the training data's column types

use super::pipeline::{ComponentNode, Pipeline};
use crate::components::{
    handle_component_class, ComponentKind, ComponentSpec, ModelFamily, DATETIME_FEATURIZER,
    IMPUTER, LABEL_ENCODER, NATURAL_LANGUAGE_FEATURIZER, ONE_HOT_ENCODER,
    STACKED_ENSEMBLE_CLASSIFIER, STACKED_ENSEMBLE_REGRESSOR, STANDARD_SCALER,
    TIME_SERIES_FEATURIZER,
};
use crate::data::{Dataset, LogicalType};
use crate::error::{Result, SearchError};
use crate::parameters::{ParameterMap, ParameterValue};
use crate::problem_type::ProblemType;

/// Preprocessing components the data and estimator call for, in execution order
fn preprocessing_components(
    data: &Dataset,
    estimator: &'static ComponentSpec,
    problem_type: ProblemType,
    sampler: Option<&'static ComponentSpec>,
) -> Vec<&'static ComponentSpec> {
    let mut components = Vec::new();

    if problem_type.is_classification() {
        components.push(&LABEL_ENCODER);
    }
    if data.has_missing_values() {
        components.push(&IMPUTER);
    }
    if problem_type.is_time_series() {
        components.push(&TIME_SERIES_FEATURIZER);
    }
    if data.has_logical_type(LogicalType::Datetime) {
        components.push(&DATETIME_FEATURIZER);
    }
    if data.has_logical_type(LogicalType::NaturalLanguage) {
        components.push(&NATURAL_LANGUAGE_FEATURIZER);
    }
    if data.has_logical_type(LogicalType::Categorical) {
        components.push(&ONE_HOT_ENCODER);
    }
    if let Some(sampler) = sampler {
        components.push(sampler);
    }
    if estimator.model_family == ModelFamily::Linear {
        components.push(&STANDARD_SCALER);
    }

    components
}

/// Build a pipeline around `estimator`.
///
/// Preprocessing is chosen from the data's column types; `extra_components`
/// (feature or column selection) go right before the estimator. A sampler is
/// only added for classification problems.
pub fn make_pipeline(
    data: &Dataset,
    estimator: &'static ComponentSpec,
    problem_type: ProblemType,
    sampler_name: Option<&str>,
    extra_components: &[&'static ComponentSpec],
) -> Result<Pipeline> {
    if estimator.kind != ComponentKind::Estimator {
        return Err(SearchError::InvalidInput(format!(
            "'{}' is not an estimator",
            estimator.name
        )));
    }
    if !estimator.supports(problem_type) {
        return Err(SearchError::InvalidInput(format!(
            "{} does not support problem type {}",
            estimator.name, problem_type
        )));
    }

    let sampler = match sampler_name {
        Some(name) if problem_type.is_classification() => {
            let spec = handle_component_class(name)?;
            if spec.kind != ComponentKind::Sampler {
                return Err(SearchError::InvalidInput(format!("'{}' is not a sampler", name)));
            }
            Some(spec)
        }
        _ => None,
    };

    let mut components = preprocessing_components(data, estimator, problem_type, sampler);
    components.extend_from_slice(extra_components);

    let name = if components.is_empty() {
        estimator.name.to_string()
    } else {
        let others: Vec<&str> = components.iter().map(|c| c.name).collect();
        format!("{} w/ {}", estimator.name, others.join(" + "))
    };

    components.push(estimator);
    let graph = components
        .into_iter()
        .map(|spec| ComponentNode::new(spec.name, spec))
        .collect();

    Ok(Pipeline::from_graph(name, problem_type, graph, 0))
}

/// Stack `input_pipelines` under a single ensemble estimator.
///
/// Each input's components are renamed `"<family> Pipeline - <component>"` and
/// keep their parameters; the ensemble itself receives `n_jobs`.
pub fn make_stacked_ensemble_pipeline(
    input_pipelines: Vec<Pipeline>,
    problem_type: ProblemType,
    random_seed: u64,
    n_jobs: i64,
) -> Result<Pipeline> {
    if input_pipelines.is_empty() {
        return Err(SearchError::InvalidInput(
            "a stacked ensemble needs at least one input pipeline".to_string(),
        ));
    }

    let (ensemble, name) = if problem_type.is_regression() {
        (&STACKED_ENSEMBLE_REGRESSOR, "Stacked Ensemble Regression Pipeline")
    } else {
        (&STACKED_ENSEMBLE_CLASSIFIER, "Stacked Ensemble Classification Pipeline")
    };

    let mut graph = Vec::new();
    let mut parameters = ParameterMap::new();
    for input in &input_pipelines {
        let prefix = format!("{} Pipeline - ", input.model_family());
        for node in input.linearized_component_graph() {
            let renamed = format!("{}{}", prefix, node.name());
            if let Some(values) = input.parameters().get(node.name()) {
                parameters.insert(renamed.clone(), values.clone());
            }
            graph.push(ComponentNode::new(renamed, node.spec()));
        }
    }
    graph.push(ComponentNode::new(ensemble.name, ensemble));
    parameters
        .entry(ensemble.name.to_string())
        .or_default()
        .insert("n_jobs".to_string(), ParameterValue::Int(n_jobs));

    Pipeline::from_graph(name, problem_type, graph, random_seed)
        .with_input_pipelines(input_pipelines)
        .instantiate(parameters, random_seed)
}

//! Batch search algorithm
//!
//! Moves from cheap baselines to tuned and ensembled pipelines:
//!
//! 1. naive linear and random forest pipelines
//! 2. the same behind a model-based feature selector
//! 3. every other estimator behind a column selector, one tuner each
//! 4. a stacked ensemble of the best pipeline per model family
//! 5. 50 tuned proposals for each of the top 3 families
//!
//! after which ensembles alternate with 10 more proposals per top family.

use super::base::AlgorithmState;
use super::best::{BestPipelineTable, TrainedPipelineResults};
use super::config::AlgorithmConfig;
use super::phases::{phase_for, Phase};
use super::AutoMLAlgorithm;
use crate::components::{
    get_estimators, get_hyperparameter_ranges, handle_component_class, naive_estimators,
    ComponentKind, ComponentSpec, RF_CLASSIFIER_SELECT_FROM_MODEL, RF_REGRESSOR_SELECT_FROM_MODEL,
    SELECT_COLUMNS_TRANSFORMER,
};
use crate::data::Dataset;
use crate::error::{Result, SearchError};
use crate::parameters::{HyperparameterRanges, ParameterMap, ParameterValue};
use crate::pipelines::{make_pipeline, make_stacked_ensemble_pipeline, Pipeline};
use crate::tuners::{BayesianTuner, TunerFactory};
use std::sync::Arc;
use tracing::{debug, info, warn};

const TOP_N: usize = 3;
const LONG_TOP_N_ROUNDS: usize = 50;
const LONG_EXPLORE_ROUNDS: usize = 10;

/// Batch-based AutoML search over the component catalog
#[derive(Debug)]
pub struct BatchAlgorithm {
    data: Arc<Dataset>,
    config: AlgorithmConfig,
    state: AlgorithmState,
    custom_hyperparameters: HyperparameterRanges,
    pipeline_params: ParameterMap,
    best: BestPipelineTable,
    selected_columns: Option<Vec<String>>,
    top_n_pipelines: Option<Vec<Pipeline>>,
}

impl BatchAlgorithm {
    /// Build with Bayesian tuners configured from `config.tuner`
    pub fn new(data: Arc<Dataset>, config: AlgorithmConfig) -> Result<Self> {
        let factory = BayesianTuner::factory(config.tuner.clone());
        Self::with_tuner_factory(data, config, factory)
    }

    /// Build with a custom tuner factory
    pub fn with_tuner_factory(
        data: Arc<Dataset>,
        config: AlgorithmConfig,
        tuner_factory: TunerFactory,
    ) -> Result<Self> {
        let (custom_hyperparameters, pipeline_params) = config.resolve()?;

        if let Some(name) = &config.sampler_name {
            let spec = handle_component_class(name)
                .map_err(|e| SearchError::Configuration(e.to_string()))?;
            if spec.kind != ComponentKind::Sampler {
                return Err(SearchError::Configuration(format!("'{}' is not a sampler", name)));
            }
        }

        debug!(
            problem_type = %config.problem_type,
            random_seed = config.random_seed,
            n_jobs = config.n_jobs,
            "created batch algorithm"
        );

        Ok(Self {
            data,
            state: AlgorithmState::new(tuner_factory, config.random_seed),
            config,
            custom_hyperparameters,
            pipeline_params,
            best: BestPipelineTable::new(),
            selected_columns: None,
            top_n_pipelines: None,
        })
    }

    pub fn config(&self) -> &AlgorithmConfig {
        &self.config
    }

    pub fn data(&self) -> &Dataset {
        &self.data
    }

    /// Columns kept by the feature-selection batch, once known
    pub fn selected_columns(&self) -> Option<&[String]> {
        self.selected_columns.as_deref()
    }

    /// Skeleton pipelines of the top families, fixed at the first long batch
    pub fn top_n_pipelines(&self) -> Option<&[Pipeline]> {
        self.top_n_pipelines.as_deref()
    }

    pub fn best_pipeline_info(&self) -> &BestPipelineTable {
        &self.best
    }

    pub fn has_tuner(&self, pipeline_name: &str) -> bool {
        self.state.has_tuner(pipeline_name)
    }

    pub fn state(&self) -> &AlgorithmState {
        &self.state
    }

    /// Phase of the batch `next_batch` will produce
    pub fn next_phase(&self) -> Phase {
        phase_for(self.state.batch_number())
    }

    /// Parameters for `pipeline` built from `proposal`.
    ///
    /// Fixed pipeline parameters are laid over the proposal, then `n_jobs` and
    /// `number_features` are forced on the components that accept them.
    pub fn transform_parameters(&self, pipeline: &Pipeline, proposal: &ParameterMap) -> ParameterMap {
        let mut parameters = ParameterMap::new();
        for node in pipeline.linearized_component_graph() {
            let mut values = proposal.get(node.name()).cloned().unwrap_or_default();
            if let Some(fixed) = self.pipeline_params.get(node.name()) {
                values.extend(fixed.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
            let spec = node.spec();
            if spec.supports_parallelism {
                values.insert("n_jobs".to_string(), ParameterValue::Int(self.config.n_jobs));
            }
            if spec.supports_feature_count {
                if let Some(n) = self.config.number_features {
                    values.insert("number_features".to_string(), ParameterValue::Int(n));
                }
            }
            parameters.insert(node.name().to_string(), values);
        }
        parameters
    }

    fn feature_selector(&self) -> &'static ComponentSpec {
        if self.config.problem_type.is_regression() {
            &RF_REGRESSOR_SELECT_FROM_MODEL
        } else {
            &RF_CLASSIFIER_SELECT_FROM_MODEL
        }
    }

    fn make_pipeline(
        &self,
        estimator: &'static ComponentSpec,
        extra_components: &[&'static ComponentSpec],
    ) -> Result<Pipeline> {
        make_pipeline(
            &self.data,
            estimator,
            self.config.problem_type,
            self.config.sampler_name.as_deref(),
            extra_components,
        )
    }

    /// Instantiate `pipeline` with `proposal` after transformation and column binding
    fn materialize(&self, pipeline: &Pipeline, proposal: &ParameterMap) -> Result<Pipeline> {
        let mut parameters = self.transform_parameters(pipeline, proposal);
        if let Some(columns) = &self.selected_columns {
            if pipeline.get_component(SELECT_COLUMNS_TRANSFORMER.name).is_ok() {
                parameters
                    .entry(SELECT_COLUMNS_TRANSFORMER.name.to_string())
                    .or_default()
                    .insert("columns".to_string(), ParameterValue::List(columns.clone()));
            }
        }
        pipeline.instantiate(parameters, self.config.random_seed)
    }

    /// Search space of `pipeline`, without the parameters fixed by configuration
    fn tuner_ranges(&self, pipeline: &Pipeline) -> HyperparameterRanges {
        let mut ranges =
            get_hyperparameter_ranges(pipeline.linearized_component_graph(), &self.custom_hyperparameters);
        for (component, fixed) in &self.pipeline_params {
            if let Some(component_ranges) = ranges.get_mut(component) {
                component_ranges.retain(|name, _| !fixed.contains_key(name));
            }
        }
        ranges
    }

    fn create_naive_pipelines(&self, extra_components: &[&'static ComponentSpec]) -> Result<Vec<Pipeline>> {
        naive_estimators(self.config.problem_type)
            .into_iter()
            .map(|estimator| {
                let pipeline = self.make_pipeline(estimator, extra_components)?;
                self.materialize(&pipeline, &ParameterMap::new())
            })
            .collect()
    }

    fn create_fast_final(&mut self) -> Result<Vec<Pipeline>> {
        let naive = naive_estimators(self.config.problem_type);
        let mut pipelines = Vec::new();
        for estimator in get_estimators(self.config.problem_type) {
            if naive.contains(&estimator) {
                continue;
            }
            let skeleton = self.make_pipeline(estimator, &[&SELECT_COLUMNS_TRANSFORMER])?;
            let pipeline = self.materialize(&skeleton, &ParameterMap::new())?;
            let ranges = self.tuner_ranges(&pipeline);
            self.state.ensure_tuner(pipeline.name(), &ranges)?;
            pipelines.push(pipeline);
        }
        Ok(pipelines)
    }

    fn create_ensemble(&self) -> Result<Vec<Pipeline>> {
        let mut inputs = Vec::with_capacity(self.best.len());
        for (_, info) in self.best.iter() {
            let parameters = self.transform_parameters(&info.pipeline, &info.parameters);
            inputs.push(info.pipeline.instantiate(parameters, self.config.random_seed)?);
        }

        if inputs.is_empty() {
            warn!("no results recorded yet; skipping ensemble batch");
            return Ok(Vec::new());
        }
        if inputs.len() < 2 {
            warn!(
                pipeline = inputs[0].name(),
                "only one model family available; ensemble is degenerate"
            );
        }

        let serial = self.config.text_in_ensembling || inputs.iter().any(Pipeline::has_text_component);
        let n_jobs = if serial { 1 } else { self.config.n_jobs };
        let ensemble = make_stacked_ensemble_pipeline(
            inputs,
            self.config.problem_type,
            self.config.random_seed,
            n_jobs,
        )?;
        Ok(vec![ensemble])
    }

    fn create_long_top_n(&mut self, n: usize) -> Result<Vec<Pipeline>> {
        let estimators: Vec<&'static ComponentSpec> = self
            .best
            .ranked()
            .into_iter()
            .filter_map(|info| info.pipeline.estimator())
            .take(n)
            .collect();

        let mut skeletons = Vec::with_capacity(estimators.len());
        for estimator in estimators {
            let pipeline = self.make_pipeline(estimator, &[&SELECT_COLUMNS_TRANSFORMER])?;
            let ranges = self.tuner_ranges(&pipeline);
            skeletons.push((pipeline, ranges));
        }
        debug!(
            pipelines = ?skeletons.iter().map(|(p, _)| p.name()).collect::<Vec<_>>(),
            "top pipelines selected"
        );
        self.top_n_pipelines = Some(skeletons.iter().map(|(p, _)| p.clone()).collect());

        let mut batch = Vec::with_capacity(LONG_TOP_N_ROUNDS * skeletons.len());
        for _ in 0..LONG_TOP_N_ROUNDS {
            for (pipeline, ranges) in &skeletons {
                let proposal = self.state.ensure_tuner(pipeline.name(), ranges)?.propose()?;
                batch.push(self.materialize(pipeline, &proposal)?);
            }
        }
        Ok(batch)
    }

    fn create_long_explore(&mut self) -> Result<Vec<Pipeline>> {
        let pipelines = self.top_n_pipelines.clone().unwrap_or_default();
        let mut batch = Vec::with_capacity(LONG_EXPLORE_ROUNDS * pipelines.len());
        for _ in 0..LONG_EXPLORE_ROUNDS {
            for pipeline in &pipelines {
                let proposal = self.state.tuner_mut(pipeline.name())?.propose()?;
                batch.push(self.materialize(pipeline, &proposal)?);
            }
        }
        Ok(batch)
    }
}

impl AutoMLAlgorithm for BatchAlgorithm {
    fn next_batch(&mut self) -> Result<Vec<Pipeline>> {
        let batch_number = self.state.batch_number();
        let phase = phase_for(batch_number);
        let batch = match phase {
            Phase::Naive => self.create_naive_pipelines(&[])?,
            Phase::NaiveWithFeatureSelection => {
                let selector = self.feature_selector();
                self.create_naive_pipelines(&[selector])?
            }
            Phase::FastFinal => self.create_fast_final()?,
            Phase::Ensemble => self.create_ensemble()?,
            Phase::LongTopN => self.create_long_top_n(TOP_N)?,
            Phase::LongExplore => self.create_long_explore()?,
        };

        self.state.record_batch(batch.len());
        info!(batch = batch_number, %phase, size = batch.len(), "proposing batch");
        Ok(batch)
    }

    fn add_result(
        &mut self,
        score: Option<f64>,
        pipeline: &Pipeline,
        results: &TrainedPipelineResults,
    ) -> Result<()> {
        if !pipeline.is_ensemble() && self.state.batch_number() >= 3 {
            if let Err(err) = self.state.add_result(score, pipeline) {
                warn!(pipeline = pipeline.name(), ?score, error = %err, "tuner rejected result");
                return Err(err);
            }
        }

        if self.state.batch_number() == 2 && self.selected_columns.is_none() {
            if let Ok(selector) = pipeline.get_component(self.feature_selector().name) {
                let columns = selector.get_names()?.to_vec();
                debug!(columns = ?columns, "recorded selected columns");
                self.selected_columns = Some(columns);
            }
        }

        if self.best.update_if_better(score, pipeline, results) {
            debug!(
                family = %pipeline.model_family(),
                ?score,
                pipeline = pipeline.name(),
                "new best pipeline for family"
            );
        }
        Ok(())
    }

    fn batch_number(&self) -> usize {
        self.state.batch_number()
    }

    fn pipeline_number(&self) -> usize {
        self.state.pipeline_number()
    }
}

//! Best result seen so far per model family

use crate::components::ModelFamily;
use crate::parameters::ParameterMap;
use crate::pipelines::Pipeline;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Results handed back by the trainer alongside a score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainedPipelineResults {
    /// Opaque identifier of the trained result
    pub id: String,
}

impl TrainedPipelineResults {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Best evaluated pipeline of one model family
#[derive(Debug, Clone, PartialEq)]
pub struct BestPipelineInfo {
    pub mean_cv_score: f64,
    pub pipeline: Pipeline,
    pub parameters: ParameterMap,
    pub id: String,
}

/// `ModelFamily -> BestPipelineInfo`, only ever improved
#[derive(Debug, Clone, Default)]
pub struct BestPipelineTable {
    entries: BTreeMap<ModelFamily, BestPipelineInfo>,
}

impl BestPipelineTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `pipeline` if its score is strictly lower than its family's best.
    ///
    /// Missing scores and ensembles are never recorded. Returns whether the table changed.
    pub fn update_if_better(
        &mut self,
        score: Option<f64>,
        pipeline: &Pipeline,
        results: &TrainedPipelineResults,
    ) -> bool {
        let Some(score) = score else {
            return false;
        };
        let family = pipeline.model_family();
        if family == ModelFamily::Ensemble {
            return false;
        }
        let current = self
            .entries
            .get(&family)
            .map_or(f64::INFINITY, |info| info.mean_cv_score);
        if !(score < current) {
            return false;
        }
        self.entries.insert(
            family,
            BestPipelineInfo {
                mean_cv_score: score,
                pipeline: pipeline.clone(),
                parameters: pipeline.parameters().clone(),
                id: results.id.clone(),
            },
        );
        true
    }

    pub fn get(&self, family: ModelFamily) -> Option<&BestPipelineInfo> {
        self.entries.get(&family)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ModelFamily, &BestPipelineInfo)> {
        self.entries.iter()
    }

    /// Entries ordered by ascending score, ties broken by family order
    pub fn ranked(&self) -> Vec<&BestPipelineInfo> {
        let mut ranked: Vec<&BestPipelineInfo> = self.entries.values().collect();
        ranked.sort_by(|a, b| a.mean_cv_score.total_cmp(&b.mean_cv_score));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{handle_component_class, naive_estimators};
    use crate::data::Dataset;
    use crate::pipelines::{make_pipeline, make_stacked_ensemble_pipeline};
    use crate::problem_type::ProblemType;
    use polars::prelude::*;

    fn data() -> Dataset {
        let x = df!("a" => &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let y = Series::new("y".into(), &[0i64, 1, 0, 1]);
        Dataset::new(x, y).unwrap()
    }

    fn pipeline(estimator: &str) -> Pipeline {
        let spec = handle_component_class(estimator).unwrap();
        make_pipeline(&data(), spec, ProblemType::Binary, None, &[]).unwrap()
    }

    #[test]
    fn test_unseen_family_always_updates() {
        let mut table = BestPipelineTable::new();
        let p = pipeline("Random Forest Classifier");
        assert!(table.update_if_better(Some(1e9), &p, &TrainedPipelineResults::new("1")));
        assert_eq!(table.get(ModelFamily::RandomForest).unwrap().id, "1");
    }

    #[test]
    fn test_only_strictly_better_replaces() {
        let mut table = BestPipelineTable::new();
        let p = pipeline("Random Forest Classifier");
        table.update_if_better(Some(0.5), &p, &TrainedPipelineResults::new("1"));
        assert!(!table.update_if_better(Some(0.5), &p, &TrainedPipelineResults::new("2")));
        assert!(!table.update_if_better(Some(0.9), &p, &TrainedPipelineResults::new("3")));
        assert!(!table.update_if_better(None, &p, &TrainedPipelineResults::new("4")));
        assert!(table.update_if_better(Some(0.1), &p, &TrainedPipelineResults::new("5")));
        assert_eq!(table.get(ModelFamily::RandomForest).unwrap().id, "5");
    }

    #[test]
    fn test_ensembles_never_recorded() {
        let mut table = BestPipelineTable::new();
        let inputs = naive_estimators(ProblemType::Binary)
            .into_iter()
            .map(|e| make_pipeline(&data(), e, ProblemType::Binary, None, &[]).unwrap())
            .collect();
        let ensemble = make_stacked_ensemble_pipeline(inputs, ProblemType::Binary, 0, 1).unwrap();
        assert!(!table.update_if_better(Some(-1e9), &ensemble, &TrainedPipelineResults::new("e")));
        assert!(table.is_empty());
    }

    #[test]
    fn test_ranked() {
        let mut table = BestPipelineTable::new();
        table.update_if_better(
            Some(0.7),
            &pipeline("Random Forest Classifier"),
            &TrainedPipelineResults::new("rf"),
        );
        table.update_if_better(
            Some(0.2),
            &pipeline("Extra Trees Classifier"),
            &TrainedPipelineResults::new("et"),
        );
        let ids: Vec<&str> = table.ranked().iter().map(|info| info.id.as_str()).collect();
        assert_eq!(ids, vec!["et", "rf"]);
    }
}

//! Integration tests for tuners and search-space extraction

use kolosal_search::pipelines::ComponentNode;
use kolosal_search::prelude::*;
use kolosal_search::tuners::SearchSpaceLayout;

// ============================================================================
// Helpers
// ============================================================================

fn mixed_ranges() -> HyperparameterRanges {
    let mut ranges = HyperparameterRanges::new();
    let estimator = ranges.entry("Mock Classifier".to_string()).or_default();
    estimator.insert("alpha".to_string(), Dimension::real(0.0, 1.0));
    estimator.insert("depth".to_string(), Dimension::integer(1, 8));
    estimator.insert("solver".to_string(), Dimension::categorical(["lbfgs", "saga"]));
    ranges
        .entry("Imputer".to_string())
        .or_default()
        .insert("strategy".to_string(), Dimension::categorical(["mean", "median"]));
    ranges.entry("Label Encoder".to_string()).or_default();
    ranges
}

fn small_config() -> BayesianConfig {
    BayesianConfig::default()
        .with_n_initial_points(3)
        .with_n_candidates(50)
        .with_n_estimators(5)
}

fn assert_within(ranges: &HyperparameterRanges, proposal: &ParameterMap) {
    for (component, dims) in ranges {
        let values = &proposal[component];
        assert_eq!(values.len(), dims.len());
        for (name, dim) in dims {
            assert!(dim.contains(&values[name]), "{}.{} = {:?}", component, name, values[name]);
        }
    }
}

fn quadratic(proposal: &ParameterMap) -> f64 {
    let alpha = proposal["Mock Classifier"]["alpha"].as_f64().unwrap();
    let depth = proposal["Mock Classifier"]["depth"].as_i64().unwrap() as f64;
    (alpha - 0.3).powi(2) + (depth - 4.0).powi(2) / 16.0
}

// ============================================================================
// Search-space extraction
// ============================================================================

#[test]
fn test_ranges_from_component_graph() {
    let graph: Vec<ComponentNode> = ["Imputer", "One Hot Encoder", "Random Forest Classifier"]
        .into_iter()
        .map(|name| ComponentNode::new(name, handle_component_class(name).unwrap()))
        .collect();

    let ranges = get_hyperparameter_ranges(&graph, &HyperparameterRanges::new());
    assert_eq!(ranges.len(), 2);
    assert!(!ranges.contains_key("One Hot Encoder"));
    assert!(ranges["Random Forest Classifier"].contains_key("n_estimators"));
    assert!(!ranges["Random Forest Classifier"].contains_key("n_jobs"));

    let mut custom = HyperparameterRanges::new();
    custom
        .entry("Random Forest Classifier".to_string())
        .or_default()
        .insert("n_estimators".to_string(), Dimension::integer(5, 6));
    let ranges = get_hyperparameter_ranges(&graph, &custom);
    assert_eq!(ranges["Random Forest Classifier"]["n_estimators"], Dimension::integer(5, 6));
    assert_eq!(ranges["Random Forest Classifier"].len(), 1);
}

// ============================================================================
// Bayesian tuner
// ============================================================================

#[test]
fn test_bayesian_proposals_lie_within_ranges() {
    let ranges = mixed_ranges();
    let mut tuner = BayesianTuner::with_config(&ranges, 0, small_config()).unwrap();

    for _ in 0..12 {
        let proposal = tuner.propose().unwrap();
        assert_within(&ranges, &proposal);
        assert!(proposal["Label Encoder"].is_empty());
        tuner.add(&proposal, Some(quadratic(&proposal))).unwrap();
    }
    assert_eq!(tuner.n_observations(), 12);
}

#[test]
fn test_bayesian_empty_space() {
    let mut ranges = HyperparameterRanges::new();
    ranges.entry("Label Encoder".to_string()).or_default();
    let mut tuner = BayesianTuner::new(&ranges, 0).unwrap();

    let proposal = tuner.propose().unwrap();
    assert_eq!(proposal.len(), 1);
    assert!(proposal["Label Encoder"].is_empty());
    tuner.add(&proposal, Some(0.5)).unwrap();
    assert_eq!(tuner.n_observations(), 0);
}

#[test]
fn test_failed_scores_are_ignored() {
    let ranges = mixed_ranges();
    let mut noisy = BayesianTuner::with_config(&ranges, 11, small_config()).unwrap();
    let mut quiet = BayesianTuner::with_config(&ranges, 11, small_config()).unwrap();

    for _ in 0..6 {
        let a = noisy.propose().unwrap();
        let b = quiet.propose().unwrap();
        assert_eq!(a, b);
        noisy.add(&a, None).unwrap();
        noisy.add(&a, Some(f64::NAN)).unwrap();
        noisy.add(&a, Some(f64::INFINITY)).unwrap();
    }
    assert_eq!(noisy.n_observations(), 0);
}

#[test]
fn test_same_seed_same_proposals() {
    let ranges = mixed_ranges();
    let mut a = BayesianTuner::with_config(&ranges, 3, small_config()).unwrap();
    let mut b = BayesianTuner::with_config(&ranges, 3, small_config()).unwrap();

    for _ in 0..8 {
        let pa = a.propose().unwrap();
        let pb = b.propose().unwrap();
        assert_eq!(pa, pb);
        let score = quadratic(&pa);
        a.add(&pa, Some(score)).unwrap();
        b.add(&pb, Some(score)).unwrap();
    }
}

#[test]
fn test_out_of_range_value_is_parameter_error() {
    let ranges = mixed_ranges();
    let mut tuner = BayesianTuner::new(&ranges, 0).unwrap();
    let mut proposal = tuner.propose().unwrap();
    proposal
        .get_mut("Mock Classifier")
        .unwrap()
        .insert("depth".to_string(), ParameterValue::Int(99));

    let err = tuner.add(&proposal, Some(0.1)).unwrap_err();
    assert!(err.is_recoverable());
    match err {
        SearchError::Parameter { score, .. } => assert_eq!(score, 0.1),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(tuner.n_observations(), 0);
}

#[test]
fn test_missing_parameter_is_parameter_error() {
    let ranges = mixed_ranges();
    let mut tuner = BayesianTuner::new(&ranges, 0).unwrap();
    let mut proposal = tuner.propose().unwrap();
    proposal.remove("Imputer");

    let err = tuner.add(&proposal, Some(0.2)).unwrap_err();
    assert!(matches!(err, SearchError::Parameter { .. }));
}

#[test]
fn test_invalid_range_is_rejected() {
    let mut ranges = HyperparameterRanges::new();
    ranges
        .entry("Mock Classifier".to_string())
        .or_default()
        .insert("alpha".to_string(), Dimension::real(1.0, 0.0));
    assert!(BayesianTuner::new(&ranges, 0).is_err());
    assert!(RandomSearchTuner::new(&ranges, 0).is_err());
}

#[test]
fn test_full_width_ranges_round_trip() {
    let mut ranges = HyperparameterRanges::new();
    let estimator = ranges.entry("Mock Classifier".to_string()).or_default();
    estimator.insert("seed".to_string(), Dimension::integer(i64::MIN, i64::MAX));
    estimator.insert("offset".to_string(), Dimension::real(-f64::MAX, f64::MAX));
    let mut tuner = BayesianTuner::with_config(&ranges, 5, small_config()).unwrap();

    for i in 0..6 {
        let proposal = tuner.propose().unwrap();
        assert_within(&ranges, &proposal);
        tuner.add(&proposal, Some(i as f64)).unwrap();
    }
    assert_eq!(tuner.n_observations(), 6);
}

// ============================================================================
// Random search tuner
// ============================================================================

#[test]
fn test_random_search_exhausts_finite_space() {
    let mut ranges = HyperparameterRanges::new();
    ranges
        .entry("Mock Classifier".to_string())
        .or_default()
        .insert("solver".to_string(), Dimension::categorical(["lbfgs", "saga"]));
    let mut tuner = RandomSearchTuner::new(&ranges, 0)
        .unwrap()
        .with_replacement_max_attempts(200);

    let first = tuner.propose().unwrap();
    let second = tuner.propose().unwrap();
    assert_ne!(first, second);
    assert!(matches!(tuner.propose(), Err(SearchError::SearchSpaceExhausted)));
}

#[test]
fn test_random_search_with_replacement() {
    let mut ranges = HyperparameterRanges::new();
    ranges
        .entry("Mock Classifier".to_string())
        .or_default()
        .insert("depth".to_string(), Dimension::integer(1, 1));
    let mut tuner = RandomSearchTuner::new(&ranges, 0).unwrap().with_replacement(true);

    for _ in 0..5 {
        let proposal = tuner.propose().unwrap();
        assert_eq!(proposal["Mock Classifier"]["depth"], ParameterValue::Int(1));
        tuner.add(&proposal, Some(0.0)).unwrap();
    }
}

#[test]
fn test_random_search_validates_results() {
    let ranges = mixed_ranges();
    let mut tuner = RandomSearchTuner::new(&ranges, 5).unwrap();
    let proposal = tuner.propose().unwrap();
    assert_within(&ranges, &proposal);
    tuner.add(&proposal, Some(1.0)).unwrap();

    let mut bad = proposal.clone();
    bad.get_mut("Imputer")
        .unwrap()
        .insert("strategy".to_string(), ParameterValue::from("mode"));
    assert!(tuner.add(&bad, Some(1.0)).unwrap_err().is_recoverable());
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_layout_keeps_every_component() {
    let ranges = mixed_ranges();
    let layout = SearchSpaceLayout::new(&ranges).unwrap();
    assert_eq!(layout.len(), 4);

    let mut tuner = RandomSearchTuner::new(&ranges, 1).unwrap();
    let proposal = tuner.propose().unwrap();
    let flat = layout.flatten(&proposal).unwrap();
    assert_eq!(layout.unflatten(flat), proposal);
}

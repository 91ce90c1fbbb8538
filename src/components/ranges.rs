//! Search-space extraction for a pipeline's component graph

use crate::parameters::HyperparameterRanges;
use crate::pipelines::ComponentNode;

/// Collect the hyperparameter ranges of every component in `component_graph`.
///
/// A `custom` entry for a component replaces that component's intrinsic
/// ranges entirely; entries are never merged. Components without ranges and
/// without an override are left out.
pub fn get_hyperparameter_ranges(
    component_graph: &[ComponentNode],
    custom: &HyperparameterRanges,
) -> HyperparameterRanges {
    let mut ranges = HyperparameterRanges::new();
    for node in component_graph {
        let component_ranges = match custom.get(node.name()) {
            Some(overrides) => overrides.clone(),
            None => node.spec().hyperparameter_ranges(),
        };
        if !component_ranges.is_empty() {
            ranges.insert(node.name().to_string(), component_ranges);
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{IMPUTER, ONE_HOT_ENCODER};
    use crate::components::catalog::RANDOM_FOREST_CLASSIFIER;
    use crate::parameters::{ComponentRanges, Dimension};

    fn graph() -> Vec<ComponentNode> {
        vec![
            ComponentNode::new("Imputer", &IMPUTER),
            ComponentNode::new("One Hot Encoder", &ONE_HOT_ENCODER),
            ComponentNode::new("Random Forest Classifier", &RANDOM_FOREST_CLASSIFIER),
        ]
    }

    #[test]
    fn test_intrinsic_ranges() {
        let ranges = get_hyperparameter_ranges(&graph(), &HyperparameterRanges::new());
        assert_eq!(ranges.len(), 2);
        assert!(!ranges.contains_key("One Hot Encoder"));
        assert_eq!(
            ranges["Random Forest Classifier"]["n_estimators"],
            Dimension::integer(10, 1000)
        );
    }

    #[test]
    fn test_override_replaces_component_entirely() {
        let mut custom = HyperparameterRanges::new();
        let mut rf = ComponentRanges::new();
        rf.insert("max_depth".to_string(), Dimension::integer(2, 3));
        custom.insert("Random Forest Classifier".to_string(), rf);

        let ranges = get_hyperparameter_ranges(&graph(), &custom);
        let rf_ranges = &ranges["Random Forest Classifier"];
        assert_eq!(rf_ranges.len(), 1);
        assert_eq!(rf_ranges["max_depth"], Dimension::integer(2, 3));
        assert_eq!(ranges["Imputer"], IMPUTER.hyperparameter_ranges());
    }

    #[test]
    fn test_override_adds_ranges_to_plain_component() {
        let mut custom = HyperparameterRanges::new();
        let mut ohe = ComponentRanges::new();
        ohe.insert("top_n".to_string(), Dimension::integer(5, 20));
        custom.insert("One Hot Encoder".to_string(), ohe);

        let ranges = get_hyperparameter_ranges(&graph(), &custom);
        assert_eq!(ranges["One Hot Encoder"]["top_n"], Dimension::integer(5, 20));
    }
}

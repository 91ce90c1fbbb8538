//! Fixed ordering between nested parameter maps and flat points

use crate::error::Result;
use crate::parameters::{ComponentParameters, Dimension, HyperparameterRanges, ParameterMap, ParameterValue};

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    component: String,
    parameter: String,
    dimension: Dimension,
}

/// Flattening order of a tuner's search space
///
/// Slots follow component order, then parameter order within a component.
/// Components without ranges are remembered so proposals still name them.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSpaceLayout {
    components: Vec<String>,
    slots: Vec<Slot>,
}

impl SearchSpaceLayout {
    /// Validates every dimension; an invalid declaration is a configuration error
    pub fn new(ranges: &HyperparameterRanges) -> Result<Self> {
        let mut slots = Vec::new();
        for (component, params) in ranges {
            for (parameter, dimension) in params {
                dimension.validate()?;
                slots.push(Slot {
                    component: component.clone(),
                    parameter: parameter.clone(),
                    dimension: dimension.clone(),
                });
            }
        }
        Ok(Self {
            components: ranges.keys().cloned().collect(),
            slots,
        })
    }

    /// Whether there is nothing to tune
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn dimensions(&self) -> Vec<Dimension> {
        self.slots.iter().map(|slot| slot.dimension.clone()).collect()
    }

    /// Flat point for `parameters`; the error names the first missing entry
    pub fn flatten(&self, parameters: &ParameterMap) -> std::result::Result<Vec<ParameterValue>, String> {
        self.slots
            .iter()
            .map(|slot| {
                let component = parameters
                    .get(&slot.component)
                    .ok_or_else(|| format!("component '{}' is missing from the parameters", slot.component))?;
                component.get(&slot.parameter).cloned().ok_or_else(|| {
                    format!(
                        "parameter '{}' of component '{}' is missing",
                        slot.parameter, slot.component
                    )
                })
            })
            .collect()
    }

    /// Nested map for a flat point; every known component is present
    pub fn unflatten(&self, values: Vec<ParameterValue>) -> ParameterMap {
        let mut parameters: ParameterMap = self
            .components
            .iter()
            .map(|component| (component.clone(), ComponentParameters::new()))
            .collect();
        for (slot, value) in self.slots.iter().zip(values) {
            if let Some(component) = parameters.get_mut(&slot.component) {
                component.insert(slot.parameter.clone(), value);
            }
        }
        parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::ComponentRanges;

    fn ranges() -> HyperparameterRanges {
        let mut ranges = HyperparameterRanges::new();
        let mut est = ComponentRanges::new();
        est.insert("b".to_string(), Dimension::integer(0, 10));
        est.insert("a".to_string(), Dimension::real(0.0, 1.0));
        ranges.insert("Estimator".to_string(), est);
        ranges.insert("Encoder".to_string(), ComponentRanges::new());
        ranges
    }

    #[test]
    fn test_order_and_unflatten() {
        let layout = SearchSpaceLayout::new(&ranges()).unwrap();
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.dimensions()[0], Dimension::real(0.0, 1.0));

        let params = layout.unflatten(vec![ParameterValue::Float(0.5), ParameterValue::Int(3)]);
        assert!(params["Encoder"].is_empty());
        assert_eq!(params["Estimator"]["a"], ParameterValue::Float(0.5));
        assert_eq!(params["Estimator"]["b"], ParameterValue::Int(3));
        assert_eq!(
            layout.flatten(&params).unwrap(),
            vec![ParameterValue::Float(0.5), ParameterValue::Int(3)]
        );
    }

    #[test]
    fn test_flatten_missing_parameter() {
        let layout = SearchSpaceLayout::new(&ranges()).unwrap();
        let mut params = layout.unflatten(vec![ParameterValue::Float(0.5), ParameterValue::Int(3)]);
        params.get_mut("Estimator").unwrap().remove("b");
        assert!(layout.flatten(&params).unwrap_err().contains("'b'"));

        params.remove("Estimator");
        assert!(layout.flatten(&params).is_err());
    }

    #[test]
    fn test_invalid_dimension() {
        let mut ranges = ranges();
        ranges
            .get_mut("Estimator")
            .unwrap()
            .insert("c".to_string(), Dimension::integer(5, 1));
        assert!(SearchSpaceLayout::new(&ranges).is_err());
    }
}

//! Pipeline handles: a linear component graph plus its parameters

use crate::components::{ComponentKind, ComponentSpec, ModelFamily};
use crate::error::{Result, SearchError};
use crate::parameters::{ComponentParameters, ParameterMap};
use crate::problem_type::ProblemType;
use std::collections::BTreeMap;

/// One named component in a pipeline's graph
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentNode {
    name: String,
    spec: &'static ComponentSpec,
}

impl ComponentNode {
    pub fn new(name: impl Into<String>, spec: &'static ComponentSpec) -> Self {
        Self {
            name: name.into(),
            spec,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn spec(&self) -> &'static ComponentSpec {
        self.spec
    }
}

/// Read-only view of a component inside a pipeline
#[derive(Debug, Clone, Copy)]
pub struct ComponentHandle<'a> {
    name: &'a str,
    spec: &'static ComponentSpec,
    parameters: Option<&'a ComponentParameters>,
    selected_features: Option<&'a [String]>,
}

impl<'a> ComponentHandle<'a> {
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn spec(&self) -> &'static ComponentSpec {
        self.spec
    }

    pub fn parameters(&self) -> Option<&'a ComponentParameters> {
        self.parameters
    }

    /// Columns chosen by a fitted feature selector
    pub fn get_names(&self) -> Result<&'a [String]> {
        if self.spec.kind != ComponentKind::FeatureSelector {
            return Err(SearchError::InvalidInput(format!(
                "component '{}' does not select features",
                self.name
            )));
        }
        self.selected_features
            .ok_or_else(|| SearchError::ComponentNotFitted(self.name.to_string()))
    }
}

/// A pipeline to be trained and scored by the execution layer
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    name: String,
    problem_type: ProblemType,
    graph: Vec<ComponentNode>,
    parameters: ParameterMap,
    random_seed: u64,
    input_pipelines: Vec<Pipeline>,
    selected_features: BTreeMap<String, Vec<String>>,
}

impl Pipeline {
    /// Build a pipeline from its graph, with every component at its defaults
    pub(crate) fn from_graph(
        name: impl Into<String>,
        problem_type: ProblemType,
        graph: Vec<ComponentNode>,
        random_seed: u64,
    ) -> Self {
        let parameters = graph
            .iter()
            .map(|node| (node.name.clone(), node.spec.default_parameters()))
            .collect();
        Self {
            name: name.into(),
            problem_type,
            graph,
            parameters,
            random_seed,
            input_pipelines: Vec::new(),
            selected_features: BTreeMap::new(),
        }
    }

    pub(crate) fn with_input_pipelines(mut self, input_pipelines: Vec<Pipeline>) -> Self {
        self.input_pipelines = input_pipelines;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn problem_type(&self) -> ProblemType {
        self.problem_type
    }

    pub fn random_seed(&self) -> u64 {
        self.random_seed
    }

    pub fn parameters(&self) -> &ParameterMap {
        &self.parameters
    }

    /// Components in execution order
    pub fn linearized_component_graph(&self) -> &[ComponentNode] {
        &self.graph
    }

    /// Pipelines stacked by an ensemble; empty otherwise
    pub fn input_pipelines(&self) -> &[Pipeline] {
        &self.input_pipelines
    }

    /// Final estimator, if the graph ends in one
    pub fn estimator(&self) -> Option<&'static ComponentSpec> {
        self.graph
            .last()
            .map(|node| node.spec)
            .filter(|spec| spec.is_estimator())
    }

    pub fn model_family(&self) -> ModelFamily {
        self.estimator()
            .map(|spec| spec.model_family)
            .unwrap_or(ModelFamily::None)
    }

    pub fn is_ensemble(&self) -> bool {
        self.model_family() == ModelFamily::Ensemble
    }

    /// Whether any component (including stacked inputs) consumes text
    pub fn has_text_component(&self) -> bool {
        self.graph.iter().any(|node| node.spec.handles_text)
            || self.input_pipelines.iter().any(Pipeline::has_text_component)
    }

    pub fn get_component(&self, name: &str) -> Result<ComponentHandle<'_>> {
        let node = self
            .graph
            .iter()
            .find(|node| node.name == name)
            .ok_or_else(|| SearchError::MissingComponent(name.to_string()))?;
        Ok(ComponentHandle {
            name: &node.name,
            spec: node.spec,
            parameters: self.parameters.get(name),
            selected_features: self.selected_features.get(name).map(Vec::as_slice),
        })
    }

    /// First component of the given kind
    pub fn find_component(&self, kind: ComponentKind) -> Option<ComponentHandle<'_>> {
        self.graph
            .iter()
            .find(|node| node.spec.kind == kind)
            .and_then(|node| self.get_component(&node.name).ok())
    }

    /// A fresh pipeline with the same graph and `parameters` laid over component defaults.
    ///
    /// The receiver is left untouched; fitted state is not carried over.
    pub fn instantiate(&self, parameters: ParameterMap, random_seed: u64) -> Result<Pipeline> {
        let unknown: Vec<&str> = parameters
            .keys()
            .filter(|name| !self.graph.iter().any(|node| &node.name == *name))
            .map(String::as_str)
            .collect();
        if !unknown.is_empty() {
            return Err(SearchError::InvalidInput(format!(
                "parameters for components {:?} will not be used since they don't appear in pipeline '{}'",
                unknown, self.name
            )));
        }

        let mut instance = Pipeline::from_graph(
            self.name.clone(),
            self.problem_type,
            self.graph.clone(),
            random_seed,
        )
        .with_input_pipelines(self.input_pipelines.clone());
        for (component, values) in parameters {
            if let Some(current) = instance.parameters.get_mut(&component) {
                current.extend(values);
            }
        }
        Ok(instance)
    }

    /// Record the columns a fitted feature selector kept
    pub fn record_selected_features(&mut self, component: &str, columns: Vec<String>) -> Result<()> {
        let handle = self.get_component(component)?;
        if handle.spec.kind != ComponentKind::FeatureSelector {
            return Err(SearchError::InvalidInput(format!(
                "component '{}' does not select features",
                component
            )));
        }
        self.selected_features.insert(component.to_string(), columns);
        Ok(())
    }
}

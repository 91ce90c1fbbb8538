//! Pipeline handles and the factory that builds them
//!
//! Pipelines here are descriptions (component graph + parameters); training
//! and scoring them belongs to the execution layer driving the search.

mod factory;
mod pipeline;

pub use factory::{make_pipeline, make_stacked_ensemble_pipeline};
pub use pipeline::{ComponentHandle, ComponentNode, Pipeline};

//! Search algorithms deciding which pipelines to evaluate next

mod base;
mod batch;
mod best;
mod config;
mod phases;

pub use base::AlgorithmState;
pub use batch::BatchAlgorithm;
pub use best::{BestPipelineInfo, BestPipelineTable, TrainedPipelineResults};
pub use config::AlgorithmConfig;
pub use phases::{phase_for, Phase};

use crate::error::Result;
use crate::pipelines::Pipeline;

/// Driver-facing contract of a search algorithm.
///
/// The driver alternates `next_batch` with one `add_result` per evaluated
/// pipeline; scores are converted so that lower is better.
pub trait AutoMLAlgorithm {
    /// Pipelines to evaluate next
    fn next_batch(&mut self) -> Result<Vec<Pipeline>>;

    /// Register the score of an evaluated pipeline; `None` when evaluation failed
    fn add_result(
        &mut self,
        score: Option<f64>,
        pipeline: &Pipeline,
        results: &TrainedPipelineResults,
    ) -> Result<()>;

    /// Batches produced so far
    fn batch_number(&self) -> usize;

    /// Pipelines produced so far
    fn pipeline_number(&self) -> usize;
}

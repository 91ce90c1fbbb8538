//! Surrogate-model Bayesian optimization backend
//!
//! Provides:
//! - `Space`: ordered dimensions and their numeric transform
//! - `ExtraTreesSurrogate`: randomized-trees regressor with uncertainty
//! - `Acquisition`: LCB, EI, PI and a hedged portfolio of the three
//! - `Optimizer`: ask/tell loop over the above

mod acquisition;
mod config;
mod optimizer;
mod space;
mod surrogate;

pub use acquisition::Acquisition;
pub use config::BayesianConfig;
pub use optimizer::{Optimizer, OptimizerError};
pub use space::Space;
pub use surrogate::ExtraTreesSurrogate;

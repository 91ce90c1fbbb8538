//! Component catalog and search-space extraction
//!
//! Components are described by static metadata only: their name, role,
//! model family, declared hyperparameter ranges, default parameters and
//! capability flags. Fitting them is the job of the execution layer.

mod catalog;
mod ranges;

pub use catalog::{
    all_components, get_estimators, handle_component_class, naive_estimators, ComponentKind,
    ComponentSpec, ModelFamily, DATETIME_FEATURIZER, IMPUTER, LABEL_ENCODER,
    NATURAL_LANGUAGE_FEATURIZER, ONE_HOT_ENCODER, OVERSAMPLER, RF_CLASSIFIER_SELECT_FROM_MODEL,
    RF_REGRESSOR_SELECT_FROM_MODEL, SELECT_COLUMNS_TRANSFORMER, STACKED_ENSEMBLE_CLASSIFIER,
    STACKED_ENSEMBLE_REGRESSOR, STANDARD_SCALER, TIME_SERIES_FEATURIZER, UNDERSAMPLER,
};
pub use ranges::get_hyperparameter_ranges;

//! Type definitions for model input and output

pub mod features;
pub mod prediction;

pub use features::{FeatureVector, FEATURE_COUNT};
pub use prediction::PredictionReport;

//! Single-shot classifier inference.
//!
//! Loads a trained ONNX classifier, parses one four-value feature vector from
//! a JSON file or a comma-separated literal, and reports the predicted class
//! and class probabilities as JSON.

pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod types;

pub use config::AppConfig;
pub use error::{PredictError, Result};
pub use input::parse_input;
pub use models::{Classifier, InferenceEngine, ModelLoader, OnnxClassifier};
pub use pipeline::{run, run_with_classifier, run_with_loader};
pub use types::{FeatureVector, PredictionReport, FEATURE_COUNT};

//! Prediction result record

use crate::types::features::FeatureVector;
use serde::Serialize;

/// Outcome of one inference, serialized as the program's JSON output.
///
/// Field order is the output key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    /// The feature vector that was scored
    pub input: FeatureVector,
    /// Class label chosen by the model
    pub predicted_class: i64,
    /// Per-class probabilities, ordered by class id
    pub prediction_probabilities: Vec<f64>,
}

impl PredictionReport {
    pub fn new(features: &FeatureVector, predicted_class: i64, probabilities: Vec<f64>) -> Self {
        Self {
            input: features.clone(),
            predicted_class,
            prediction_probabilities: probabilities,
        }
    }
}

//! Feature vector accepted by the classifier

use crate::error::{PredictError, Result};
use serde::Serialize;

/// Number of features the model was trained on
pub const FEATURE_COUNT: usize = 4;

/// A single row of model input.
///
/// Always holds exactly [`FEATURE_COUNT`] values; construction fails
/// otherwise, so anything holding a `FeatureVector` can hand it straight to
/// the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Build a feature vector, rejecting any length other than 4
    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        let values: [f64; FEATURE_COUNT] = values.try_into().map_err(|_| {
            PredictError::validation(format!(
                "Input must contain exactly {} feature values",
                FEATURE_COUNT
            ))
        })?;
        Ok(Self { values })
    }

    /// Flattened values, in input order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Shape of the single-row model input: `[1, n_features]`
    pub fn shape(&self) -> [i64; 2] {
        [1, FEATURE_COUNT as i64]
    }

    /// Values narrowed to `f32`, the element type ONNX classifiers expect
    pub fn to_f32(&self) -> Vec<f32> {
        self.values.iter().map(|&v| v as f32).collect()
    }
}

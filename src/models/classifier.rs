//! The prediction contract every model artifact exposes

use crate::error::Result;
use crate::types::features::FeatureVector;

/// A trained classifier, treated as an opaque collaborator.
///
/// Mirrors the usual `predict` / `predict_proba` pair: one call returns the
/// winning class label, the other the per-class probability distribution
/// ordered by class id. Implementations take `&mut self` because ONNX
/// sessions need exclusive access to run.
pub trait Classifier {
    /// Class label for a single feature vector
    fn predict(&mut self, features: &FeatureVector) -> Result<i64>;

    /// Per-class probabilities for a single feature vector
    fn predict_proba(&mut self, features: &FeatureVector) -> Result<Vec<f64>>;
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn predict(&mut self, features: &FeatureVector) -> Result<i64> {
        (**self).predict(features)
    }

    fn predict_proba(&mut self, features: &FeatureVector) -> Result<Vec<f64>> {
        (**self).predict_proba(features)
    }
}

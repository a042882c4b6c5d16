//! Classifier inference on a single feature vector

use crate::error::{PredictError, Result};
use crate::models::classifier::Classifier;
use crate::types::features::FeatureVector;
use crate::types::prediction::PredictionReport;
use ort::memory::Allocator;
use ort::session::{Session, SessionOutputs};
use ort::value::{DowncastableTarget, DynMapValueType, DynSequenceValueType, DynValue, Tensor};
use std::time::Instant;
use tracing::debug;

/// Runs a classifier and assembles the prediction record
pub struct InferenceEngine<C: Classifier> {
    classifier: C,
}

impl<C: Classifier> InferenceEngine<C> {
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }

    /// Score one feature vector: `predict`, then `predict_proba`.
    ///
    /// The vector goes to the model untouched; no scaling or checks beyond
    /// the shape guaranteed by [`FeatureVector`].
    pub fn predict(&mut self, features: &FeatureVector) -> Result<PredictionReport> {
        let start_time = Instant::now();

        let predicted_class = self.classifier.predict(features)?;
        let probabilities = self.classifier.predict_proba(features)?;

        debug!(
            predicted_class = predicted_class,
            probabilities = ?probabilities,
            inference_time_us = start_time.elapsed().as_micros() as u64,
            "Inference complete"
        );

        Ok(PredictionReport::new(features, predicted_class, probabilities))
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }
}

/// Classifier backed by an ONNX Runtime session
#[derive(Debug)]
pub struct OnnxClassifier {
    /// ONNX Runtime session
    session: Session,
    /// Input name for the model
    input_name: String,
    /// Output holding the predicted label, if the graph has one
    label_output: Option<String>,
    /// Output holding class probabilities
    probability_output: String,
}

impl OnnxClassifier {
    pub fn new(
        session: Session,
        input_name: String,
        label_output: Option<String>,
        probability_output: String,
    ) -> Self {
        Self {
            session,
            input_name,
            label_output,
            probability_output,
        }
    }

    /// Run the session on a single row and hand the outputs to `extract`
    fn run<T>(
        &mut self,
        features: &FeatureVector,
        extract: impl FnOnce(&SessionOutputs, Option<&str>, &str) -> Result<T>,
    ) -> Result<T> {
        // Prepare input tensor - shape [1, num_features]
        let input_tensor = Tensor::from_array((features.shape().to_vec(), features.to_f32()))
            .map_err(|e| PredictError::inference(format!("Failed to create input tensor: {e}")))?;

        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => input_tensor])?;

        extract(
            &outputs,
            self.label_output.as_deref(),
            &self.probability_output,
        )
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&mut self, features: &FeatureVector) -> Result<i64> {
        self.run(features, |outputs, label_output, _| {
            let label_output =
                label_output.ok_or_else(|| PredictError::inference("model has no label output"))?;
            let output = outputs.get(label_output).ok_or_else(|| {
                PredictError::inference(format!("model has no output named '{label_output}'"))
            })?;
            extract_label(output)
        })
    }

    fn predict_proba(&mut self, features: &FeatureVector) -> Result<Vec<f64>> {
        self.run(features, |outputs, _, probability_output| {
            let output = outputs.get(probability_output).ok_or_else(|| {
                PredictError::inference(format!(
                    "model has no output named '{probability_output}'"
                ))
            })?;
            extract_probabilities(output)
        })
    }
}

/// First label of a numeric label tensor.
/// Integer labels pass through; float labels are truncated toward zero.
fn extract_label(output: &DynValue) -> Result<i64> {
    let empty = || PredictError::inference("empty label output");

    if let Ok((_, data)) = output.try_extract_tensor::<i64>() {
        return data.first().copied().ok_or_else(empty);
    }
    if let Ok((_, data)) = output.try_extract_tensor::<i32>() {
        return data.first().map(|&l| l as i64).ok_or_else(empty);
    }
    if let Ok((_, data)) = output.try_extract_tensor::<f32>() {
        return data.first().ok_or_else(empty).and_then(|&l| truncate_label(l as f64));
    }
    if let Ok((_, data)) = output.try_extract_tensor::<f64>() {
        return data.first().ok_or_else(empty).and_then(|&l| truncate_label(l));
    }

    Err(PredictError::inference(format!(
        "label output is not numeric: {:?}",
        output.dtype()
    )))
}

fn truncate_label(label: f64) -> Result<i64> {
    if label.is_finite() {
        Ok(label.trunc() as i64)
    } else {
        Err(PredictError::inference(format!(
            "label {label} cannot be converted to an integer"
        )))
    }
}

/// Class probabilities for the first row.
/// Handles both tensor outputs and seq(map) (ZipMap) outputs.
fn extract_probabilities(output: &DynValue) -> Result<Vec<f64>> {
    if let Ok((shape, data)) = output.try_extract_tensor::<f32>() {
        let dims: Vec<i64> = shape.iter().copied().collect();
        let probabilities: Vec<f64> = data.iter().map(|&p| p as f64).collect();
        return Ok(first_row(&dims, probabilities));
    }

    if let Ok((shape, data)) = output.try_extract_tensor::<f64>() {
        let dims: Vec<i64> = shape.iter().copied().collect();
        return Ok(first_row(&dims, data.to_vec()));
    }

    let dtype = output.dtype();
    if DynSequenceValueType::can_downcast(&dtype) {
        return extract_from_sequence_map(output);
    }

    Err(PredictError::inference(format!(
        "unsupported probability output type: {dtype:?}"
    )))
}

/// Extract probabilities from seq(map(int64, float)) format, ordered by class id
fn extract_from_sequence_map(output: &DynValue) -> Result<Vec<f64>> {
    let allocator = Allocator::default();

    let sequence = output
        .downcast_ref::<DynSequenceValueType>()
        .map_err(|e| PredictError::inference(format!("Failed to downcast to sequence: {e}")))?;

    let maps = sequence.try_extract_sequence::<DynMapValueType>(&allocator)?;

    // Batch size is always 1
    let map_value = maps
        .first()
        .ok_or_else(|| PredictError::inference("Empty sequence"))?;

    let mut kv_pairs = map_value.try_extract_key_values::<i64, f32>()?;
    kv_pairs.sort_by_key(|(class_id, _)| *class_id);

    debug!(classes = kv_pairs.len(), "Extracted from seq(map)");

    Ok(kv_pairs.into_iter().map(|(_, p)| p as f64).collect())
}

/// Slice the first row out of a `[batch, num_classes]` or `[num_classes]` tensor
fn first_row(dims: &[i64], mut data: Vec<f64>) -> Vec<f64> {
    if dims.len() == 2 {
        let num_classes = dims[1].max(0) as usize;
        data.truncate(num_classes);
    }
    data
}

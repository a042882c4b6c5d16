//! ONNX model loader

use crate::error::{PredictError, Result};
use crate::models::inference::OnnxClassifier;
use ort::session::{builder::GraphOptimizationLevel, Session};
use std::path::Path;
use tracing::info;

/// Input name used when the graph does not declare one
const DEFAULT_INPUT_NAME: &str = "float_input";

/// Loader for ONNX classifier artifacts
pub struct ModelLoader {
    /// Number of threads for ONNX inference
    onnx_threads: usize,
}

impl ModelLoader {
    /// Create a new model loader with specified number of threads
    pub fn with_threads(onnx_threads: usize) -> Result<Self> {
        // Initialize ONNX Runtime
        ort::init().commit()?;
        info!(onnx_threads = onnx_threads, "ONNX Runtime initialized");
        Ok(Self { onnx_threads })
    }

    /// Load a classifier from file.
    ///
    /// Fails with [`PredictError::ModelNotFound`] when nothing exists at
    /// `path`; beyond that the artifact is handed to ONNX Runtime as-is.
    pub fn load_model<P: AsRef<Path>>(&self, path: P) -> Result<OnnxClassifier> {
        let path = path.as_ref();
        ensure_exists(path)?;

        info!(path = %path.display(), threads = self.onnx_threads, "Loading ONNX model");

        let session = Session::builder()
            .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|b| b.with_intra_threads(self.onnx_threads))
            .and_then(|b| b.commit_from_file(path))
            .map_err(|e| {
                PredictError::ModelLoad(format!("Failed to load model from {:?}: {}", path, e))
            })?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| DEFAULT_INPUT_NAME.to_string());

        let output_names: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();
        let label_output = pick_label_output(&output_names);
        let probability_output = pick_probability_output(&output_names)
            .ok_or_else(|| PredictError::ModelLoad("model declares no outputs".to_string()))?;

        info!(
            path = %path.display(),
            input = %input_name,
            label_output = ?label_output,
            probability_output = %probability_output,
            "Model loaded successfully"
        );

        Ok(OnnxClassifier::new(
            session,
            input_name,
            label_output,
            probability_output,
        ))
    }
}

/// Reject a missing artifact before touching ONNX Runtime
fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(PredictError::ModelNotFound(path.to_path_buf()))
    }
}

/// The `label` output, falling back to the first of several outputs.
///
/// A lone output is the probability output; such a graph has no label.
fn pick_label_output(outputs: &[String]) -> Option<String> {
    outputs
        .iter()
        .find(|name| name.contains("label"))
        .or_else(|| outputs.first().filter(|_| outputs.len() > 1))
        .cloned()
}

/// The `prob*` output, falling back to the last output
fn pick_probability_output(outputs: &[String]) -> Option<String> {
    outputs
        .iter()
        .find(|name| name.contains("prob"))
        .or_else(|| outputs.last())
        .cloned()
}

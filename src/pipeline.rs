//! Load -> Parse -> Infer -> Report, once per invocation

use crate::config::AppConfig;
use crate::error::Result;
use crate::input::parse_input;
use crate::models::classifier::Classifier;
use crate::models::inference::InferenceEngine;
use crate::models::loader::ModelLoader;
use crate::report::write_report;
use crate::types::prediction::PredictionReport;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Load the configured ONNX model, then score `input_arg` and write the report to `out`
pub fn run<W: Write>(config: &AppConfig, input_arg: &str, out: &mut W) -> Result<PredictionReport> {
    run_with_loader(config, input_arg, out, |path| {
        ModelLoader::with_threads(config.model.onnx_threads)?.load_model(path)
    })
}

/// Same as [`run`], with the model produced by `load` from the configured path
pub fn run_with_loader<C, W, F>(
    config: &AppConfig,
    input_arg: &str,
    out: &mut W,
    load: F,
) -> Result<PredictionReport>
where
    C: Classifier,
    W: Write,
    F: FnOnce(&Path) -> Result<C>,
{
    let model_path = config.model.path.as_path();
    let classifier = load(model_path)?;
    writeln!(out, "Model loaded from {}", model_path.display())?;

    run_with_classifier(classifier, input_arg, out)
}

/// Score `input_arg` with an already loaded classifier and write the report to `out`
pub fn run_with_classifier<C: Classifier, W: Write>(
    classifier: C,
    input_arg: &str,
    out: &mut W,
) -> Result<PredictionReport> {
    let features = parse_input(input_arg)?;

    let mut engine = InferenceEngine::new(classifier);
    let report = engine.predict(&features)?;

    info!(
        predicted_class = report.predicted_class,
        classes = report.prediction_probabilities.len(),
        "Prediction complete"
    );

    write_report(out, &report)?;
    Ok(report)
}

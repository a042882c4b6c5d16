//! Error types for model loading, input parsing and inference

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while running a single prediction
#[derive(Debug, Error)]
pub enum PredictError {
    /// The model artifact does not exist
    #[error("Model file not found at {}", .0.display())]
    ModelNotFound(PathBuf),

    /// ONNX Runtime could not build a session for the artifact
    #[error("Failed to load model: {0}")]
    ModelLoad(String),

    /// The user-supplied input was rejected before inference
    #[error("{0}")]
    Validation(String),

    /// The model ran but its outputs could not be interpreted
    #[error("Inference error: {0}")]
    Inference(String),

    /// Configuration could not be built or deserialized
    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl PredictError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn inference(message: impl Into<String>) -> Self {
        Self::Inference(message.into())
    }
}

impl From<ort::Error> for PredictError {
    fn from(err: ort::Error) -> Self {
        Self::Inference(err.to_string())
    }
}

impl From<config::ConfigError> for PredictError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, PredictError>;

//! Configuration management for the model runner

use crate::error::{PredictError, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Fixed location of the trained model artifact
pub const DEFAULT_MODEL_PATH: &str = "artifacts/model.onnx";

/// Config file picked up when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// Prefix for environment overrides, e.g. `RUN_MODEL__MODEL__PATH`
const ENV_PREFIX: &str = "RUN_MODEL";

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub model: ModelConfig,
    pub logging: LoggingConfig,
}

/// Model artifact configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Path to the ONNX model file
    pub path: PathBuf,
    /// Number of intra-op threads for ONNX inference (default: 1)
    #[serde(default = "default_onnx_threads")]
    pub onnx_threads: usize,
}

fn default_onnx_threads() -> usize {
    1
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl AppConfig {
    /// Load configuration from the default file, if present, plus the environment
    pub fn load() -> Result<Self> {
        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        Self::build(default_path.exists().then_some(default_path))
    }

    /// Load configuration from a specific path plus the environment.
    ///
    /// Unlike [`AppConfig::load`], a missing file is an error.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::build(Some(path.as_ref()))
    }

    fn build(file: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();

        let mut builder = Config::builder()
            .set_default("model.path", DEFAULT_MODEL_PATH)?
            .set_default("model.onnx_threads", defaults.model.onnx_threads as u64)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .map_err(|e| PredictError::Config(format!("Failed to build configuration: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| PredictError::Config(format!("Failed to deserialize configuration: {e}")))
    }

    /// Override the model path for this invocation
    pub fn with_model_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.model.path = path.into();
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig {
                path: PathBuf::from(DEFAULT_MODEL_PATH),
                onnx_threads: default_onnx_threads(),
            },
            logging: LoggingConfig {
                level: "warn".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}

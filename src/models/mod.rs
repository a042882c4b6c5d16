//! Model loading and inference components

pub mod classifier;
pub mod inference;
pub mod loader;

pub use classifier::Classifier;
pub use inference::{InferenceEngine, OnnxClassifier};
pub use loader::ModelLoader;

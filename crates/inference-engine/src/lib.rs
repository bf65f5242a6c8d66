//! ONNX Inference Engine
//!
//! Owns the premium-category classifier and mediates every inference call.

mod classifier;
mod manifest;
mod service;

pub use classifier::{Classifier, OnnxClassifier};
pub use manifest::{FeatureEncoding, FeatureSpec, ModelManifest};
pub use service::{PredictionService, MODEL_VERSION};

use thiserror::Error;

/// Errors during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("feature '{0}' expected by the model is missing from the record")]
    MissingFeature(String),
    #[error("feature '{name}' has the wrong kind: expected {expected}")]
    FeatureType { name: String, expected: &'static str },
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
}

/// Errors while loading the model at startup
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid model manifest: {0}")]
    Manifest(String),
    #[error("Model load failed: {0}")]
    Model(String),
}

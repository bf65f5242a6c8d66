//! Classifier Backends

use crate::manifest::ModelManifest;
use crate::{InferenceError, StartupError};
use feature_engine::FeatureRecord;
use std::path::Path;
use tract_onnx::prelude::*;
use tracing::{debug, info};

/// A trained premium-category classifier.
///
/// Implementations are immutable after construction and shared across
/// request handlers without locking.
pub trait Classifier: Send + Sync {
    /// Predict the category label for one record
    fn predict(&self, record: &FeatureRecord) -> Result<String, InferenceError>;
}

type OnnxPlan = TypedRunnableModel<TypedModel>;

/// Classifier backed by an ONNX graph executed with tract
pub struct OnnxClassifier {
    plan: OnnxPlan,
    manifest: ModelManifest,
}

impl OnnxClassifier {
    /// Load the graph and its manifest. The manifest's row width fixes the
    /// graph's input shape to `[1, width]`.
    pub fn load(model_path: &Path, manifest_path: &Path) -> Result<Self, StartupError> {
        info!(
            "Loading classifier from {} (manifest {})",
            model_path.display(),
            manifest_path.display()
        );

        let manifest = ModelManifest::load(manifest_path)?;
        if !model_path.is_file() {
            return Err(StartupError::Io {
                path: model_path.display().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "model file not found"),
            });
        }

        let width = manifest.width();
        let plan = tract_onnx::onnx()
            .model_for_path(model_path)
            .and_then(|model| model.with_input_fact(0, f32::fact([1, width]).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| StartupError::Model(e.to_string()))?;

        info!("Model loaded successfully (input width {})", width);
        Ok(Self { plan, manifest })
    }

    pub fn manifest(&self) -> &ModelManifest {
        &self.manifest
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, record: &FeatureRecord) -> Result<String, InferenceError> {
        let row = self.manifest.encode(record)?;
        let input = Tensor::from_shape(&[1, row.len()], &row)
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        let first = outputs
            .first()
            .ok_or_else(|| InferenceError::InferenceFailed("model produced no outputs".to_string()))?;
        decode_label(first, &self.manifest)
    }
}

/// Turn the graph's first output into a label.
///
/// * `i64`: class id of the first row
/// * `f32`: per-class scores of the first row, argmax wins
/// * `String`: the label itself
pub(crate) fn decode_label(output: &Tensor, manifest: &ModelManifest) -> Result<String, InferenceError> {
    let failed = |msg: String| InferenceError::InferenceFailed(msg);

    match output.datum_type() {
        DatumType::String => {
            let view = output.as_slice::<String>().map_err(|e| failed(e.to_string()))?;
            view.first()
                .cloned()
                .ok_or_else(|| failed("empty label output".to_string()))
        }
        DatumType::I64 => {
            let view = output.as_slice::<i64>().map_err(|e| failed(e.to_string()))?;
            let id = *view.first().ok_or_else(|| failed("empty label output".to_string()))?;
            let index = usize::try_from(id).map_err(|_| failed(format!("negative class id {}", id)))?;
            class_label(manifest, index)
        }
        DatumType::F32 => {
            let scores = output.as_slice::<f32>().map_err(|e| failed(e.to_string()))?;
            let row_len = match output.shape() {
                [_, n] => *n,
                _ => scores.len(),
            };
            let index = scores
                .iter()
                .take(row_len)
                .enumerate()
                .fold(None, |best: Option<(usize, f32)>, (i, &s)| match best {
                    Some((_, b)) if b >= s => best,
                    _ => Some((i, s)),
                })
                .map(|(i, _)| i)
                .ok_or_else(|| failed("empty score output".to_string()))?;
            debug!(class = index, "argmax over {} scores", row_len);
            class_label(manifest, index)
        }
        other => Err(failed(format!("unsupported output type {:?}", other))),
    }
}

fn class_label(manifest: &ModelManifest, index: usize) -> Result<String, InferenceError> {
    manifest.label(index).map(str::to_string).ok_or_else(|| {
        InferenceError::InferenceFailed(format!(
            "class id {} outside the {} known classes",
            index,
            manifest.classes.len()
        ))
    })
}

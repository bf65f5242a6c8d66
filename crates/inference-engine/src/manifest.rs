//! Model Manifest and Feature Encoding
//!
//! The ONNX graph takes one `[1, width]` f32 row. The manifest, shipped next
//! to the graph, says which record column fills which slot and lists the
//! class labels the graph's outputs index into.

use crate::{InferenceError, StartupError};
use feature_engine::{FeatureRecord, FeatureValue};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

/// How one record column is laid out in the model row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "encoding", rename_all = "snake_case")]
pub enum FeatureEncoding {
    /// One slot holding the value as f32
    Numeric,
    /// One slot per category; unknown values encode as all zeros
    OneHot { categories: Vec<String> },
}

impl FeatureEncoding {
    pub fn width(&self) -> usize {
        match self {
            FeatureEncoding::Numeric => 1,
            FeatureEncoding::OneHot { categories } => categories.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSpec {
    pub name: String,
    #[serde(flatten)]
    pub encoding: FeatureEncoding,
}

/// Input layout and output labels of a trained classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelManifest {
    pub features: Vec<FeatureSpec>,
    /// Labels, indexed by class id
    #[serde(default)]
    pub classes: Vec<String>,
}

impl ModelManifest {
    /// Read and check a manifest file
    pub fn load(path: &Path) -> Result<Self, StartupError> {
        let text = std::fs::read_to_string(path).map_err(|source| StartupError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, StartupError> {
        let manifest: Self =
            serde_json::from_str(text).map_err(|e| StartupError::Manifest(e.to_string()))?;
        manifest.check()?;
        Ok(manifest)
    }

    fn check(&self) -> Result<(), StartupError> {
        if self.features.is_empty() {
            return Err(StartupError::Manifest("no features declared".to_string()));
        }

        let mut seen = HashSet::new();
        for spec in &self.features {
            if !seen.insert(spec.name.as_str()) {
                return Err(StartupError::Manifest(format!(
                    "feature '{}' declared twice",
                    spec.name
                )));
            }
            if spec.encoding.width() == 0 {
                return Err(StartupError::Manifest(format!(
                    "feature '{}' has an empty category list",
                    spec.name
                )));
            }
            if !FeatureRecord::FEATURE_NAMES.contains(&spec.name.as_str()) {
                warn!(feature = %spec.name, "manifest feature is not produced by the feature engine");
            }
        }

        debug!(
            features = self.features.len(),
            width = self.width(),
            classes = self.classes.len(),
            "model manifest loaded"
        );
        Ok(())
    }

    /// Length of the encoded input row
    pub fn width(&self) -> usize {
        self.features.iter().map(|f| f.encoding.width()).sum()
    }

    /// Encode a record as one model input row
    pub fn encode(&self, record: &FeatureRecord) -> Result<Vec<f32>, InferenceError> {
        let mut row = Vec::with_capacity(self.width());

        for spec in &self.features {
            let value = record
                .get(&spec.name)
                .ok_or_else(|| InferenceError::MissingFeature(spec.name.clone()))?;

            match (&spec.encoding, value) {
                (FeatureEncoding::Numeric, FeatureValue::Number(n)) => row.push(n as f32),
                (FeatureEncoding::Numeric, FeatureValue::Category(_)) => {
                    return Err(InferenceError::FeatureType {
                        name: spec.name.clone(),
                        expected: "number",
                    });
                }
                (FeatureEncoding::OneHot { categories }, value) => {
                    let key = value.category_key();
                    row.extend(
                        categories
                            .iter()
                            .map(|c| if *c == key { 1.0 } else { 0.0 }),
                    );
                }
            }
        }

        Ok(row)
    }

    /// Label for a class id
    pub fn label(&self, index: usize) -> Option<&str> {
        self.classes.get(index).map(String::as_str)
    }
}

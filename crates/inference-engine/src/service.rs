//! Prediction Service

use crate::classifier::{Classifier, OnnxClassifier};
use crate::{InferenceError, StartupError};
use feature_engine::FeatureRecord;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Version reported by the health endpoint
pub const MODEL_VERSION: &str = "1.0.0";

/// Owns the classifier built at startup and mediates all inference calls
#[derive(Clone)]
pub struct PredictionService {
    classifier: Arc<dyn Classifier>,
}

impl PredictionService {
    /// Wrap an already-built classifier
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    /// Load the ONNX classifier from disk. Failure here must abort startup.
    pub fn load(model_path: &Path, manifest_path: &Path) -> Result<Self, StartupError> {
        let classifier = OnnxClassifier::load(model_path, manifest_path)?;
        Ok(Self::new(Arc::new(classifier)))
    }

    /// Run one prediction
    pub fn predict(&self, record: &FeatureRecord) -> Result<String, InferenceError> {
        let start = Instant::now();
        let result = self.classifier.predict(record);
        let latency_us = start.elapsed().as_micros() as u64;

        match &result {
            Ok(label) => debug!(%label, latency_us, "prediction completed"),
            Err(e) => warn!(error = %e, latency_us, "prediction failed"),
        }
        result
    }

    pub fn version(&self) -> &'static str {
        MODEL_VERSION
    }

    /// A service only exists once its classifier has been built
    pub fn is_loaded(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_engine::{DerivedFeatures, LifestyleRisk, Occupation};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Labels by lifestyle risk, counting calls
    struct RiskEcho {
        calls: AtomicUsize,
    }

    impl Classifier for RiskEcho {
        fn predict(&self, record: &FeatureRecord) -> Result<String, InferenceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(record.lifestyle_risk.as_str().to_string())
        }
    }

    struct Broken;

    impl Classifier for Broken {
        fn predict(&self, _record: &FeatureRecord) -> Result<String, InferenceError> {
            Err(InferenceError::InferenceFailed("feature names mismatch".to_string()))
        }
    }

    fn record(smoker: bool) -> FeatureRecord {
        let derived = DerivedFeatures::derive(40, 1.6, 90.0, smoker, "Delhi");
        FeatureRecord::new(&derived, Occupation::Freelancer, 8.0)
    }

    #[test]
    fn test_predict_delegates_once() {
        let classifier = Arc::new(RiskEcho {
            calls: AtomicUsize::new(0),
        });
        let service = PredictionService::new(classifier.clone());

        assert_eq!(service.predict(&record(true)).unwrap(), LifestyleRisk::High.as_str());
        assert_eq!(service.predict(&record(false)).unwrap(), LifestyleRisk::Medium.as_str());
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_errors_propagate() {
        let service = PredictionService::new(Arc::new(Broken));
        let err = service.predict(&record(false)).unwrap_err();
        assert!(err.to_string().contains("feature names mismatch"));
    }

    #[test]
    fn test_health_facts() {
        let service = PredictionService::new(Arc::new(Broken));
        assert_eq!(service.version(), "1.0.0");
        assert!(service.is_loaded());
    }

    #[test]
    fn test_shared_across_threads() {
        let service = PredictionService::new(Arc::new(RiskEcho {
            calls: AtomicUsize::new(0),
        }));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let service = service.clone();
                std::thread::spawn(move || service.predict(&record(i % 2 == 0)))
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap().is_ok());
        }
    }

    #[test]
    fn test_load_failure() {
        let result = PredictionService::load(
            Path::new("/nonexistent/insurance_model.onnx"),
            Path::new("/nonexistent/insurance_model.json"),
        );
        assert!(result.is_err());
    }
}

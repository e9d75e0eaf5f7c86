#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use cardio_risk::encoder::FeatureVector;
use cardio_risk::schema::feature_names;
use cardio_risk::{Classifier, PredictorConfig, RawRecord, Result, RiskPredictor};

/// Path of the sample model artifact shipped with the crate
#[must_use]
pub fn model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models/heart_attack_risk_model.json")
}

/// Default record with the elevated-risk values of the reference scenario
#[must_use]
pub fn high_risk_record() -> RawRecord {
    RawRecord::defaults()
        .with("age", 70)
        .with("smoking_status", "Current")
        .with("family_history", "Yes")
        .with("cholesterol_ldl", 350)
}

/// Classifier returning fixed outputs and counting how often it is called
pub struct StubClassifier {
    features: Vec<String>,
    class: u8,
    probabilities: [f64; 2],
    calls: AtomicUsize,
}

impl StubClassifier {
    #[must_use]
    pub fn new(class: u8, probabilities: [f64; 2]) -> Self {
        Self {
            features: feature_names().into_iter().map(String::from).collect(),
            class,
            probabilities,
            calls: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn with_features(mut self, features: Vec<String>) -> Self {
        self.features = features;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Classifier for StubClassifier {
    fn feature_names(&self) -> &[String] {
        &self.features
    }

    fn predict(&self, features: &FeatureVector) -> Result<u8> {
        assert_eq!(features.batch().num_rows(), 1);
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.class)
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<[f64; 2]> {
        assert_eq!(features.num_columns(), self.features.len());
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.probabilities)
    }
}

/// Predictor over a stub, returning the stub handle for call inspection
pub fn stub_predictor(class: u8, probabilities: [f64; 2]) -> (RiskPredictor, Arc<StubClassifier>) {
    let stub = Arc::new(StubClassifier::new(class, probabilities));
    let predictor = RiskPredictor::new(stub.clone(), PredictorConfig::default())
        .expect("stub uses the encoder's feature order");
    (predictor, stub)
}

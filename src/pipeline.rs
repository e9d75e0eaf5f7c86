//! The assessment pipeline: validate, encode, classify, interpret.
//!
//! [`RiskPredictor`] is the process-wide handle. It is built once at startup, checks
//! that the classifier expects exactly the encoder's columns, and is then shared by
//! reference across requests. Nothing in it is mutated after construction.

use std::sync::Arc;
use std::time::Instant;

use indicatif::ProgressBar;
use rayon::prelude::*;

use crate::classifier::{Classifier, load_classifier};
use crate::config::PredictorConfig;
use crate::encoder::{FeatureVector, check_feature_order, encode};
use crate::error::Result;
use crate::interpret::{Assessment, interpret};
use crate::models::patient::{PatientRecord, RawRecord};
use crate::schema::validate_with_policy;
use crate::utils::logging::{
    log_assessment, log_failure, log_operation_complete, log_operation_start,
};

/// Read-only handle pairing a loaded classifier with the pipeline configuration
#[derive(Clone)]
pub struct RiskPredictor {
    classifier: Arc<dyn Classifier>,
    config: PredictorConfig,
}

impl std::fmt::Debug for RiskPredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RiskPredictor")
            .field("features", &self.classifier.feature_names().len())
            .field("config", &self.config)
            .finish()
    }
}

impl RiskPredictor {
    /// Wrap an already loaded classifier
    ///
    /// # Errors
    /// Returns `Error::EncodingShape` if the classifier's feature order differs from
    /// the encoder's column order.
    pub fn new(classifier: Arc<dyn Classifier>, config: PredictorConfig) -> Result<Self> {
        check_feature_order(classifier.feature_names())?;
        log::info!(
            "Classifier feature order verified ({} columns)",
            classifier.feature_names().len()
        );
        Ok(Self { classifier, config })
    }

    /// Load the configured classifier artifact and wrap it
    pub fn from_config(config: &PredictorConfig) -> Result<Self> {
        log_operation_start("Loading model from", &config.model_path.display().to_string());
        let classifier = load_classifier(&config.model_path)?;
        Self::new(classifier, config.clone())
    }

    #[must_use]
    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    #[must_use]
    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    /// Assess one raw record
    ///
    /// Validation runs to completion before the classifier is touched, so an invalid
    /// record never produces an inference call.
    pub fn assess(&self, raw: &RawRecord) -> Result<Assessment> {
        let record = validate_with_policy(raw, self.config.range_policy)?;
        self.assess_record(&record)
    }

    /// Assess an already validated record
    pub fn assess_record(&self, record: &PatientRecord) -> Result<Assessment> {
        let features = encode(record)?;
        self.classify(&features)
    }

    /// Run the classifier on a feature vector and interpret its outputs
    pub fn classify(&self, features: &FeatureVector) -> Result<Assessment> {
        let predicted_class = self.classifier.predict(features)?;
        let probabilities = self.classifier.predict_proba(features)?;
        log::debug!("Classifier returned class {predicted_class}, probabilities {probabilities:?}");

        let assessment = interpret(predicted_class, probabilities)?;
        if self.config.log_assessments {
            log_assessment(&assessment);
        }
        Ok(assessment)
    }

    /// Assess many independent records in parallel
    ///
    /// Results keep the input order; one failing record does not affect the others.
    #[must_use]
    pub fn assess_many(&self, records: &[RawRecord]) -> Vec<Result<Assessment>> {
        self.assess_many_with_progress(records, None)
    }

    /// Like [`RiskPredictor::assess_many`], advancing `progress` once per record
    #[must_use]
    pub fn assess_many_with_progress(
        &self,
        records: &[RawRecord],
        progress: Option<&ProgressBar>,
    ) -> Vec<Result<Assessment>> {
        let start = Instant::now();

        let results: Vec<Result<Assessment>> = records
            .par_iter()
            .map(|raw| {
                let result = self.assess(raw);
                if let Err(err) = &result {
                    log_failure(err);
                }
                if let Some(pb) = progress {
                    pb.inc(1);
                }
                result
            })
            .collect();

        let assessed = results.iter().filter(|result| result.is_ok()).count();
        log_operation_complete("assessed", assessed, Some(start.elapsed()));
        results
    }
}

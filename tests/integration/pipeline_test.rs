#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use indicatif::ProgressBar;

    use cardio_risk::error::GENERIC_FAILURE_MESSAGE;
    use cardio_risk::schema::feature_names;
    use cardio_risk::{
        Error, PatientRecord, PredictorConfig, RangePolicy, RawRecord, RiskLabel, RiskPredictor,
        ValidationError,
    };

    use crate::utils::{StubClassifier, high_risk_record, model_path, stub_predictor};

    fn sample_predictor(policy: RangePolicy) -> RiskPredictor {
        let config = PredictorConfig::default()
            .with_model_path(model_path())
            .with_range_policy(policy);
        RiskPredictor::from_config(&config).unwrap()
    }

    #[test]
    fn test_end_to_end_with_stub() {
        let (predictor, stub) = stub_predictor(1, [0.18, 0.82]);

        let assessment = predictor.assess(&high_risk_record()).unwrap();
        assert!(assessment.positive());
        assert!((assessment.probability() - 0.82).abs() < f64::EPSILON);
        assert_eq!(assessment.label(), RiskLabel::AtRisk);
        assert_eq!(assessment.percentage_display(), "82.00%");
        assert_eq!(stub.calls(), 2);
    }

    #[test]
    fn test_invalid_record_never_reaches_classifier() {
        let (predictor, stub) = stub_predictor(0, [0.9, 0.1]);

        let raw = RawRecord::defaults().with("gender", "Other");
        let err = predictor.assess(&raw).unwrap_err();
        assert!(err.is_recoverable());
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidCategory { ref field, .. }) if field == "gender"
        ));

        let mut missing = RawRecord::defaults();
        missing.remove("region");
        assert!(predictor.assess(&missing).is_err());

        let out_of_range = PatientRecord {
            cholesterol_hdl: 5,
            ..PatientRecord::default()
        };
        assert!(predictor.assess_record(&out_of_range).is_err());

        assert_eq!(stub.calls(), 0);
    }

    #[test]
    fn test_feature_order_mismatch_fails_at_startup() {
        let mut swapped: Vec<String> = feature_names().into_iter().map(String::from).collect();
        swapped.swap(4, 5);
        let stub = StubClassifier::new(0, [1.0, 0.0]).with_features(swapped);

        let err = RiskPredictor::new(Arc::new(stub), PredictorConfig::default()).unwrap_err();
        assert!(matches!(err, Error::EncodingShape(_)), "{err}");
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_broken_classifier_output() {
        let (predictor, stub) = stub_predictor(1, [-0.2, 1.2]);

        let err = predictor.assess(&RawRecord::defaults()).unwrap_err();
        assert!(matches!(err, Error::ClassifierOutputRange { .. }), "{err}");
        assert!(!err.is_recoverable());
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
        assert_eq!(stub.calls(), 2);
    }

    #[test]
    fn test_assess_many_keeps_order() {
        let predictor = sample_predictor(RangePolicy::Reject);
        let records = vec![
            RawRecord::defaults(),
            RawRecord::defaults().with("age", 250),
            high_risk_record(),
            RawRecord::defaults().with("smoking_status", "Sometimes"),
        ];

        let results = predictor.assess_many(&records);
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].as_ref().unwrap().label(), RiskLabel::LowRisk);
        assert!(matches!(
            results[1],
            Err(Error::Validation(ValidationError::OutOfRange { value: 250, .. }))
        ));
        assert_eq!(results[2].as_ref().unwrap().label(), RiskLabel::AtRisk);
        assert!(matches!(
            results[3],
            Err(Error::Validation(ValidationError::InvalidCategory { .. }))
        ));
    }

    #[test]
    fn test_assess_many_advances_progress() {
        let (predictor, stub) = stub_predictor(0, [0.7, 0.3]);
        let records = vec![RawRecord::defaults(); 5];
        let pb = ProgressBar::hidden();
        pb.set_length(5);

        let results = predictor.assess_many_with_progress(&records, Some(&pb));
        assert!(results.iter().all(Result::is_ok));
        assert_eq!(pb.position(), 5);
        assert_eq!(stub.calls(), 10);
    }

    #[test]
    fn test_sample_model_scenarios() {
        let predictor = sample_predictor(RangePolicy::Reject);

        let low = predictor.assess(&RawRecord::defaults()).unwrap();
        assert!(!low.positive());
        assert_eq!(low.label(), RiskLabel::LowRisk);
        assert_eq!(low.percentage_display(), "10.78%");

        let high = predictor.assess(&high_risk_record()).unwrap();
        assert!(high.positive());
        assert!(high.probability() > 0.5);
        assert_eq!(high.label(), RiskLabel::AtRisk);
        assert_eq!(high.percentage_display(), "96.03%");
    }

    #[test]
    fn test_clamp_policy() {
        let raw = RawRecord::defaults().with("age", 130);

        let err = sample_predictor(RangePolicy::Reject).assess(&raw).unwrap_err();
        assert_eq!(err.user_message(), "Age must be between 1 and 100 (got 130).");

        let clamped = sample_predictor(RangePolicy::Clamp).assess(&raw).unwrap();
        let at_max = sample_predictor(RangePolicy::Reject)
            .assess(&RawRecord::defaults().with("age", 100))
            .unwrap();
        assert_eq!(clamped, at_max);
    }

    #[test]
    fn test_mistyped_weights_fail_at_startup() {
        let sample = std::fs::read_to_string(model_path()).unwrap();
        let mut artifact: serde_json::Value = serde_json::from_str(&sample).unwrap();
        let weights = artifact["numeric"]
            .as_object_mut()
            .unwrap()
            .remove("age")
            .unwrap();
        assert!(weights.is_object());
        artifact["categorical"]["age"] = serde_json::json!({ "45": 0.1 });

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, artifact.to_string()).unwrap();

        let config = PredictorConfig::default().with_model_path(&path);
        let err = RiskPredictor::from_config(&config).unwrap_err();
        assert!(
            matches!(&err, Error::ModelLoad { reason, .. } if reason.contains("'age'")),
            "{err}"
        );
    }

    #[test]
    fn test_missing_model_is_fatal() {
        let config = PredictorConfig::default().with_model_path("does/not/exist.json");
        let err = RiskPredictor::from_config(&config).unwrap_err();
        assert!(matches!(err, Error::ModelLoad { .. }));
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }
}

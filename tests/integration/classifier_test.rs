#[cfg(test)]
mod tests {
    use std::fs;

    use cardio_risk::schema::feature_names;
    use cardio_risk::{
        Classifier, Error, LogisticModel, PatientRecord, encode, load_classifier, validate,
    };

    use crate::utils::{high_risk_record, model_path};

    fn model_load_reason(err: Error) -> String {
        match err {
            Error::ModelLoad { reason, .. } => reason,
            other => panic!("expected a model load error, got {other}"),
        }
    }

    #[test]
    fn test_load_sample_artifact() {
        let model = LogisticModel::load(&model_path()).unwrap();
        assert_eq!(model.feature_names(), feature_names().as_slice());
        assert!((model.threshold() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sample_artifact_probabilities() {
        let model = load_classifier(&model_path()).unwrap();

        let features = encode(&PatientRecord::default()).unwrap();
        let [p0, p1] = model.predict_proba(&features).unwrap();
        assert!((p0 + p1 - 1.0).abs() < 1e-12);
        assert!((p1 - 0.1078).abs() < 0.001, "default record gave {p1}");
        assert_eq!(model.predict(&features).unwrap(), 0);

        let record = validate(&high_risk_record()).unwrap();
        let features = encode(&record).unwrap();
        let [_, p1] = model.predict_proba(&features).unwrap();
        assert!((p1 - 0.9603).abs() < 0.001, "high-risk record gave {p1}");
        assert_eq!(model.predict(&features).unwrap(), 1);
    }

    #[test]
    fn test_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = LogisticModel::load(&path).unwrap_err();
        assert!(!err.is_recoverable());
        assert!(matches!(&err, Error::ModelLoad { path: p, .. } if p == &path));
        assert_eq!(model_load_reason(err), "model file not found");
    }

    #[test]
    fn test_corrupt_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        fs::write(&path, b"\x00\x01 definitely not json").unwrap();

        let reason = model_load_reason(load_classifier(&path).err().unwrap());
        assert!(reason.starts_with("corrupt model artifact"), "{reason}");
    }

    #[test]
    fn test_unsupported_version() {
        let sample = fs::read_to_string(model_path()).unwrap();
        let mut artifact: serde_json::Value = serde_json::from_str(&sample).unwrap();
        artifact["format_version"] = serde_json::json!(2);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model_v2.json");
        fs::write(&path, artifact.to_string()).unwrap();

        let reason = model_load_reason(LogisticModel::load(&path).unwrap_err());
        assert!(reason.contains("unsupported format version 2"), "{reason}");
    }

    #[test]
    fn test_weight_kind_must_match_column_type() {
        let sample = fs::read_to_string(model_path()).unwrap();
        let mut artifact: serde_json::Value = serde_json::from_str(&sample).unwrap();
        let gender = artifact["categorical"]
            .as_object_mut()
            .unwrap()
            .remove("gender")
            .unwrap();
        assert!(gender.is_object());
        artifact["numeric"]["gender"] =
            serde_json::json!({ "mean": 0.5, "scale": 0.5, "weight": 0.25 });

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model_gender_numeric.json");
        fs::write(&path, artifact.to_string()).unwrap();

        let reason = model_load_reason(load_classifier(&path).err().unwrap());
        assert_eq!(
            reason,
            "feature 'gender' has numeric weights but its column is Category"
        );
    }

    #[test]
    fn test_rejects_vector_of_other_shape() {
        let model = LogisticModel::from_json(
            r#"{
                "format_version": 1,
                "feature_order": ["age", "gender"],
                "intercept": 0.0,
                "numeric": { "age": { "mean": 45.0, "scale": 10.0, "weight": 1.0 } },
                "categorical": { "gender": { "Female": 2.0 } }
            }"#,
        )
        .unwrap();

        assert_eq!(model.feature_names().len(), 2);
        assert!(
            matches!(
                model.predict(&encode(&PatientRecord::default()).unwrap()),
                Err(Error::EncodingShape(_))
            ),
            "27 columns against a 2-feature model"
        );
    }
}

#[cfg(test)]
mod tests {
    use cardio_risk::models::{Category, Gender, Region};
    use cardio_risk::schema::{FieldDomain, IntRange, PATIENT_FIELDS};
    use cardio_risk::{
        PatientRecord, RangePolicy, RawRecord, ValidationError, validate, validate_with_policy,
    };
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_gender_other_is_rejected() {
        let raw = RawRecord::defaults().with("gender", "Other");
        assert_eq!(
            validate(&raw),
            Err(ValidationError::InvalidCategory {
                field: "gender".to_string(),
                value: "Other".to_string(),
                allowed: vec!["Male".to_string(), "Female".to_string()],
            })
        );
    }

    #[test]
    fn test_every_field_is_mandatory() {
        for def in &PATIENT_FIELDS {
            let mut raw = RawRecord::defaults();
            raw.remove(def.name);
            assert_eq!(
                validate(&raw),
                Err(ValidationError::MissingField {
                    field: def.name.to_string()
                }),
                "removing {} should fail",
                def.name
            );
        }
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let raw = RawRecord::defaults().with("bmi", 31);
        assert_eq!(
            validate(&raw),
            Err(ValidationError::UnknownField {
                field: "bmi".to_string()
            })
        );
    }

    #[test]
    fn test_boolean_fields_accept_only_yes_no() {
        let boolean_fields: Vec<&str> = PATIENT_FIELDS
            .iter()
            .filter(|def| def.domain == FieldDomain::Boolean)
            .map(|def| def.name)
            .collect();
        assert_eq!(boolean_fields.len(), 8);

        for name in boolean_fields {
            let yes = validate(&RawRecord::defaults().with(name, "Yes")).unwrap();
            let no = validate(&RawRecord::defaults().with(name, "No")).unwrap();
            assert_ne!(yes, no, "{name} should change the record");

            for label in ["yes", "NO", "true", "1", "Y", ""] {
                let err = validate(&RawRecord::defaults().with(name, label)).unwrap_err();
                assert!(
                    matches!(&err, ValidationError::InvalidCategory { field, allowed, .. }
                        if field == name && allowed == &["Yes".to_string(), "No".to_string()]),
                    "{name}={label} gave {err:?}"
                );
            }
        }
    }

    #[test]
    fn test_categories_reject_unknown_labels() {
        for def in &PATIENT_FIELDS {
            let FieldDomain::Category(options) = def.domain else {
                continue;
            };

            for option in options {
                assert!(validate(&RawRecord::defaults().with(def.name, *option)).is_ok());
            }

            let bogus = format!("{} ", options[0]);
            let err = validate(&RawRecord::defaults().with(def.name, bogus.clone())).unwrap_err();
            assert_eq!(
                err,
                ValidationError::InvalidCategory {
                    field: def.name.to_string(),
                    value: bogus,
                    allowed: options.iter().map(|o| (*o).to_string()).collect(),
                }
            );
        }
    }

    #[test]
    fn test_numeric_bounds_are_inclusive() {
        for def in &PATIENT_FIELDS {
            let FieldDomain::Integer(range) = def.domain else {
                continue;
            };

            for value in [range.min, range.max] {
                assert!(validate(&RawRecord::defaults().with(def.name, value)).is_ok());
            }
            for value in [range.min - 1, range.max + 1] {
                assert_eq!(
                    validate(&RawRecord::defaults().with(def.name, value)),
                    Err(ValidationError::OutOfRange {
                        field: def.name.to_string(),
                        value,
                        range,
                    })
                );
            }
        }
    }

    #[test]
    fn test_clamped_records_stay_in_domain() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let mut raw = RawRecord::defaults();
            for def in &PATIENT_FIELDS {
                if let FieldDomain::Integer(_) = def.domain {
                    raw.insert(def.name, rng.random_range(-500..=2000_i64));
                }
            }

            let record = validate_with_policy(&raw, RangePolicy::Clamp).unwrap();
            assert!(record.ensure_in_domain().is_ok());
            assert!((1..=100).contains(&record.age));
            assert!(IntRange::new(50, 1000).contains(record.triglycerides));
        }
    }

    #[test]
    fn test_repeated_json_field_is_rejected() {
        let body = serde_json::to_string(&RawRecord::defaults()).unwrap();
        let json = format!("{{\"age\": 999, {}", &body[1..]);

        let err = serde_json::from_str::<RawRecord>(&json).unwrap_err();
        assert!(err.to_string().contains("duplicate field 'age'"), "{err}");
    }

    #[test]
    fn test_json_float_is_an_invalid_number() {
        let body = serde_json::to_string(&RawRecord::defaults().with("age", "x")).unwrap();
        let raw: RawRecord = serde_json::from_str(&body.replace("\"x\"", "45.0")).unwrap();
        assert_eq!(
            validate(&raw),
            Err(ValidationError::InvalidNumber {
                field: "age".to_string(),
                value: "45.0".to_string(),
            })
        );
    }

    #[test]
    fn test_from_json() {
        let raw: RawRecord = serde_json::from_str(
            r#"{
                "age": 58, "gender": "Female", "waist_circumference": 102, "obesity": "No",
                "blood_pressure_systolic": 145, "blood_pressure_diastolic": 92,
                "cholesterol_level": 240, "cholesterol_ldl": 160, "cholesterol_hdl": 38,
                "triglycerides": 210, "diabetes": "Yes", "hypertension": "Yes",
                "family_history": "No", "previous_heart_disease": "No",
                "fasting_blood_sugar": "Yes", "medication_usage": "Yes",
                "EKG_results": "ST-T wave abnormality", "dietary_habits": "Average",
                "physical_activity": "Moderate", "smoking_status": "Past",
                "sleep_hours": 6, "stress_level": 8, "alcohol_consumption": "Low",
                "air_pollution_exposure": "High", "income_level": "Medium",
                "region": "Central", "participated_in_free_screening": "Yes"
            }"#,
        )
        .unwrap();

        let record = validate(&raw).unwrap();
        assert_eq!(record.gender, Gender::Female);
        assert_eq!(record.region, Region::Central);
        assert_eq!(record.region.label(), "Central");
        assert!(record.diabetes);
        assert!(!record.family_history);
        assert_eq!(RawRecord::from(&record), raw);
        assert_ne!(record, PatientRecord::default());
    }
}

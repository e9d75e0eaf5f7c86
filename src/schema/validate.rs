//! Record validation against the patient schema
//!
//! Validation is pure: it either produces a [`PatientRecord`] whose every field lies
//! in its declared domain, or the first [`ValidationError`] found in feature order.

use crate::config::RangePolicy;
use crate::error::ValidationError;
use crate::models::patient::{FieldValue, PatientRecord, RawRecord, RawValue};
use crate::models::types::{Category, YES_NO_OPTIONS, parse_yes_no};
use crate::schema::{FieldDefinition, FieldDomain, field};

/// Validate a raw record, rejecting out-of-range numbers
pub fn validate(raw: &RawRecord) -> Result<PatientRecord, ValidationError> {
    validate_with_policy(raw, RangePolicy::Reject)
}

/// Validate a raw record with an explicit range policy
///
/// # Arguments
/// * `raw` - The untyped record from the presentation layer
/// * `policy` - Whether out-of-range numbers are rejected or clamped
///
/// # Returns
/// * `Ok(PatientRecord)` - A record satisfying every domain constraint
/// * `Err(ValidationError)` - The first problem found
pub fn validate_with_policy(
    raw: &RawRecord,
    policy: RangePolicy,
) -> Result<PatientRecord, ValidationError> {
    if let Some(unknown) = raw.field_names().find(|name| field(name).is_none()) {
        return Err(ValidationError::UnknownField {
            field: unknown.to_string(),
        });
    }

    let reader = FieldReader { raw, policy };

    let record = PatientRecord {
        age: reader.integer("age")?,
        gender: reader.category("gender")?,
        waist_circumference: reader.integer("waist_circumference")?,
        obesity: reader.flag("obesity")?,
        blood_pressure_systolic: reader.integer("blood_pressure_systolic")?,
        blood_pressure_diastolic: reader.integer("blood_pressure_diastolic")?,
        cholesterol_level: reader.integer("cholesterol_level")?,
        cholesterol_ldl: reader.integer("cholesterol_ldl")?,
        cholesterol_hdl: reader.integer("cholesterol_hdl")?,
        triglycerides: reader.integer("triglycerides")?,
        diabetes: reader.flag("diabetes")?,
        hypertension: reader.flag("hypertension")?,
        family_history: reader.flag("family_history")?,
        previous_heart_disease: reader.flag("previous_heart_disease")?,
        fasting_blood_sugar: reader.flag("fasting_blood_sugar")?,
        medication_usage: reader.flag("medication_usage")?,
        ekg_results: reader.category("EKG_results")?,
        dietary_habits: reader.category("dietary_habits")?,
        physical_activity: reader.category("physical_activity")?,
        smoking_status: reader.category("smoking_status")?,
        sleep_hours: reader.integer("sleep_hours")?,
        stress_level: reader.integer("stress_level")?,
        alcohol_consumption: reader.category("alcohol_consumption")?,
        air_pollution_exposure: reader.category("air_pollution_exposure")?,
        income_level: reader.category("income_level")?,
        region: reader.category("region")?,
        participated_in_free_screening: reader.flag("participated_in_free_screening")?,
    };

    Ok(record)
}

impl PatientRecord {
    /// Re-assert that every numeric field lies in its declared range
    ///
    /// Categorical and Yes/No fields are closed by their types; numeric fields are
    /// plain integers and can be set out of range by direct construction.
    pub fn ensure_in_domain(&self) -> Result<(), ValidationError> {
        for (name, value) in self.values() {
            let FieldValue::Integer(value) = value else {
                continue;
            };
            let range = field(name).and_then(FieldDefinition::range);
            if let Some(range) = range.filter(|range| !range.contains(value)) {
                return Err(ValidationError::OutOfRange {
                    field: name.to_string(),
                    value,
                    range,
                });
            }
        }
        Ok(())
    }
}

/// Typed access to the fields of a raw record
struct FieldReader<'a> {
    raw: &'a RawRecord,
    policy: RangePolicy,
}

impl FieldReader<'_> {
    fn definition(name: &'static str) -> &'static FieldDefinition {
        field(name).unwrap_or_else(|| unreachable!("'{name}' is not in the patient schema"))
    }

    fn value(&self, name: &'static str) -> Result<&RawValue, ValidationError> {
        self.raw
            .get(name)
            .ok_or_else(|| ValidationError::MissingField {
                field: name.to_string(),
            })
    }

    fn integer(&self, name: &'static str) -> Result<i64, ValidationError> {
        let FieldDomain::Integer(range) = Self::definition(name).domain else {
            unreachable!("'{name}' is not an integer field");
        };

        let value = match self.value(name)? {
            RawValue::Integer(value) => *value,
            RawValue::Text(text) => text.parse::<i64>().map_err(|_| {
                ValidationError::InvalidNumber {
                    field: name.to_string(),
                    value: text.clone(),
                }
            })?,
            float @ RawValue::Float(_) => {
                return Err(ValidationError::InvalidNumber {
                    field: name.to_string(),
                    value: float.to_string(),
                });
            }
        };

        if range.contains(value) {
            return Ok(value);
        }

        match self.policy {
            RangePolicy::Reject => Err(ValidationError::OutOfRange {
                field: name.to_string(),
                value,
                range,
            }),
            RangePolicy::Clamp => {
                let clamped = range.clamp(value);
                log::warn!("Clamped {name} from {value} to {clamped} (allowed {range})");
                Ok(clamped)
            }
        }
    }

    fn flag(&self, name: &'static str) -> Result<bool, ValidationError> {
        let text = self.text(name)?;
        parse_yes_no(&text).ok_or_else(|| invalid_category(name, text, YES_NO_OPTIONS))
    }

    fn category<T: Category>(&self, name: &'static str) -> Result<T, ValidationError> {
        let text = self.text(name)?;
        T::from_label(&text).ok_or_else(|| invalid_category(name, text, T::OPTIONS))
    }

    /// Text of a label field; integers are rendered as text and so never match a label
    fn text(&self, name: &'static str) -> Result<String, ValidationError> {
        Ok(match self.value(name)? {
            RawValue::Text(text) => text.clone(),
            number @ (RawValue::Integer(_) | RawValue::Float(_)) => number.to_string(),
        })
    }
}

fn invalid_category(name: &str, value: String, allowed: &[&str]) -> ValidationError {
    ValidationError::InvalidCategory {
        field: name.to_string(),
        value,
        allowed: allowed.iter().map(|option| (*option).to_string()).collect(),
    }
}

//! Patient schema: the canonical field set, its domains and the feature order.
//!
//! [`PATIENT_FIELDS`] is the single source of truth. Its order is the column order
//! of the feature vector, which must match the order the classifier was trained on.

use std::sync::{Arc, LazyLock};

use arrow::datatypes::Schema;

use crate::models::types::{
    AlcoholConsumption, Category, DietaryHabits, EkgResult, Gender, Level, PhysicalActivity,
    Region, SmokingStatus,
};

pub mod field;
pub mod validate;

pub use field::{FieldDefinition, FieldDomain, FieldType, IntRange};
pub use validate::{validate, validate_with_policy};

/// Number of fields in a patient record
pub const FIELD_COUNT: usize = 27;

/// Every input field, in feature order
pub static PATIENT_FIELDS: [FieldDefinition; FIELD_COUNT] = [
    FieldDefinition::integer("age", "Age", 1, 100),
    FieldDefinition::category("gender", "Gender", Gender::OPTIONS),
    FieldDefinition::integer("waist_circumference", "Waist Circumference (cm)", 40, 200),
    FieldDefinition::boolean("obesity", "Obesity Status"),
    FieldDefinition::integer("blood_pressure_systolic", "Systolic BP", 80, 250),
    FieldDefinition::integer("blood_pressure_diastolic", "Diastolic BP", 40, 150),
    FieldDefinition::integer("cholesterol_level", "Total Cholesterol", 100, 600),
    FieldDefinition::integer("cholesterol_ldl", "LDL Cholesterol", 20, 400),
    FieldDefinition::integer("cholesterol_hdl", "HDL Cholesterol", 10, 150),
    FieldDefinition::integer("triglycerides", "Triglycerides", 50, 1000),
    FieldDefinition::boolean("diabetes", "Diabetes"),
    FieldDefinition::boolean("hypertension", "Hypertension"),
    FieldDefinition::boolean("family_history", "Family History"),
    FieldDefinition::boolean("previous_heart_disease", "Previous Heart Disease"),
    FieldDefinition::boolean("fasting_blood_sugar", "FBS > 120 mg/dl"),
    FieldDefinition::boolean("medication_usage", "Currently on Medication"),
    FieldDefinition::category("EKG_results", "EKG Results", EkgResult::OPTIONS),
    FieldDefinition::category("dietary_habits", "Dietary Habits", DietaryHabits::OPTIONS),
    FieldDefinition::category(
        "physical_activity",
        "Physical Activity Level",
        PhysicalActivity::OPTIONS,
    ),
    FieldDefinition::category("smoking_status", "Smoking Status", SmokingStatus::OPTIONS),
    FieldDefinition::integer("sleep_hours", "Sleep Hours", 1, 15),
    FieldDefinition::integer("stress_level", "Stress Level (1-10)", 1, 10),
    FieldDefinition::category(
        "alcohol_consumption",
        "Alcohol Consumption",
        AlcoholConsumption::OPTIONS,
    ),
    FieldDefinition::category(
        "air_pollution_exposure",
        "Air Pollution Exposure",
        Level::OPTIONS,
    ),
    FieldDefinition::category("income_level", "Income Level", Level::OPTIONS),
    FieldDefinition::category("region", "Region", Region::OPTIONS),
    FieldDefinition::boolean("participated_in_free_screening", "Participated in Screening"),
];

static PATIENT_SCHEMA: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Arc::new(Schema::new(
        PATIENT_FIELDS
            .iter()
            .map(FieldDefinition::to_arrow_field)
            .collect::<Vec<_>>(),
    ))
});

/// Get the Arrow schema of the feature vector
#[must_use]
pub fn patient_schema() -> Arc<Schema> {
    PATIENT_SCHEMA.clone()
}

/// Column names in feature order
#[must_use]
pub fn feature_names() -> Vec<&'static str> {
    PATIENT_FIELDS.iter().map(|def| def.name).collect()
}

/// Look up a field definition by exact name
#[must_use]
pub fn field(name: &str) -> Option<&'static FieldDefinition> {
    PATIENT_FIELDS.iter().find(|def| def.name == name)
}

/// Human label for a field, falling back to the raw name for unknown fields
#[must_use]
pub fn field_label(name: &str) -> &str {
    field(name).map_or(name, |def| def.label)
}

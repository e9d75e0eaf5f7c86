//! Patient input records
//!
//! [`RawRecord`] is the untyped field map handed over by the presentation layer.
//! [`PatientRecord`] is the statically typed record produced by validation; it lives
//! for one assessment and is never stored.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::models::types::{
    AlcoholConsumption, Category, DietaryHabits, EkgResult, Gender, Level, PhysicalActivity,
    Region, SmokingStatus, yes_no_label,
};

/// A single untyped input value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Integer value from a numeric control
    Integer(i64),
    /// Non-integral number; never valid for any field
    Float(f64),
    /// Text value from a select box or text input
    Text(String),
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:?}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Untyped input record: field name to raw value
///
/// Deserializing rejects a field that appears more than once.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RawRecord(BTreeMap<String, RawValue>);

impl<'de> Deserialize<'de> for RawRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RawRecordVisitor)
    }
}

struct RawRecordVisitor;

impl<'de> Visitor<'de> for RawRecordVisitor {
    type Value = RawRecord;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping field names to values")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut fields = BTreeMap::new();
        while let Some((field, value)) = map.next_entry::<String, RawValue>()? {
            match fields.entry(field) {
                Entry::Occupied(entry) => {
                    return Err(de::Error::custom(format_args!(
                        "duplicate field '{}'",
                        entry.key()
                    )));
                }
                Entry::Vacant(entry) => {
                    entry.insert(value);
                }
            }
        }
        Ok(RawRecord(fields))
    }
}

impl RawRecord {
    /// Create an empty record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A record holding the default value of every field
    #[must_use]
    pub fn defaults() -> Self {
        Self::from(&PatientRecord::default())
    }

    /// Set a field, replacing any previous value
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<RawValue>) {
        self.0.insert(field.into(), value.into());
    }

    /// Builder-style variant of [`RawRecord::insert`]
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Remove a field
    pub fn remove(&mut self, field: &str) -> Option<RawValue> {
        self.0.remove(field)
    }

    /// Look up a field
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&RawValue> {
        self.0.get(field)
    }

    /// Iterate over field names
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of fields present
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, RawValue)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (String, RawValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Typed value of one field as it enters the feature vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    /// Numeric measurement
    Integer(i64),
    /// Yes/No answer, encoded as 1/0
    Flag(bool),
    /// Categorical label
    Category(&'static str),
}

impl FieldValue {
    /// Convert back to the raw form a form control would produce
    #[must_use]
    pub fn to_raw(&self) -> RawValue {
        match self {
            Self::Integer(value) => RawValue::Integer(*value),
            Self::Flag(flag) => RawValue::Text(yes_no_label(*flag).to_string()),
            Self::Category(label) => RawValue::Text((*label).to_string()),
        }
    }
}

/// A validated patient record
///
/// Field order follows the feature order of the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientRecord {
    pub age: i64,
    pub gender: Gender,
    /// Waist circumference in cm
    pub waist_circumference: i64,
    pub obesity: bool,
    pub blood_pressure_systolic: i64,
    pub blood_pressure_diastolic: i64,
    /// Total cholesterol, mg/dL
    pub cholesterol_level: i64,
    pub cholesterol_ldl: i64,
    pub cholesterol_hdl: i64,
    pub triglycerides: i64,
    pub diabetes: bool,
    pub hypertension: bool,
    pub family_history: bool,
    pub previous_heart_disease: bool,
    /// Fasting blood sugar above 120 mg/dL
    pub fasting_blood_sugar: bool,
    pub medication_usage: bool,
    pub ekg_results: EkgResult,
    pub dietary_habits: DietaryHabits,
    pub physical_activity: PhysicalActivity,
    pub smoking_status: SmokingStatus,
    pub sleep_hours: i64,
    /// Self-reported stress on a 1-10 scale
    pub stress_level: i64,
    pub alcohol_consumption: AlcoholConsumption,
    pub air_pollution_exposure: Level,
    pub income_level: Level,
    pub region: Region,
    pub participated_in_free_screening: bool,
}

impl Default for PatientRecord {
    fn default() -> Self {
        Self {
            age: 45,
            gender: Gender::Male,
            waist_circumference: 90,
            obesity: true,
            blood_pressure_systolic: 120,
            blood_pressure_diastolic: 80,
            cholesterol_level: 200,
            cholesterol_ldl: 100,
            cholesterol_hdl: 50,
            triglycerides: 150,
            diabetes: false,
            hypertension: false,
            family_history: false,
            previous_heart_disease: false,
            fasting_blood_sugar: false,
            medication_usage: false,
            ekg_results: EkgResult::Normal,
            dietary_habits: DietaryHabits::Healthy,
            physical_activity: PhysicalActivity::Low,
            smoking_status: SmokingStatus::Never,
            sleep_hours: 7,
            stress_level: 5,
            alcohol_consumption: AlcoholConsumption::NonDrinker,
            air_pollution_exposure: Level::Low,
            income_level: Level::Low,
            region: Region::North,
            participated_in_free_screening: false,
        }
    }
}

impl PatientRecord {
    /// Every field with its typed value, in feature order
    #[must_use]
    pub fn values(&self) -> Vec<(&'static str, FieldValue)> {
        use FieldValue::{Category as Cat, Flag, Integer};

        vec![
            ("age", Integer(self.age)),
            ("gender", Cat(self.gender.label())),
            ("waist_circumference", Integer(self.waist_circumference)),
            ("obesity", Flag(self.obesity)),
            ("blood_pressure_systolic", Integer(self.blood_pressure_systolic)),
            ("blood_pressure_diastolic", Integer(self.blood_pressure_diastolic)),
            ("cholesterol_level", Integer(self.cholesterol_level)),
            ("cholesterol_ldl", Integer(self.cholesterol_ldl)),
            ("cholesterol_hdl", Integer(self.cholesterol_hdl)),
            ("triglycerides", Integer(self.triglycerides)),
            ("diabetes", Flag(self.diabetes)),
            ("hypertension", Flag(self.hypertension)),
            ("family_history", Flag(self.family_history)),
            ("previous_heart_disease", Flag(self.previous_heart_disease)),
            ("fasting_blood_sugar", Flag(self.fasting_blood_sugar)),
            ("medication_usage", Flag(self.medication_usage)),
            ("EKG_results", Cat(self.ekg_results.label())),
            ("dietary_habits", Cat(self.dietary_habits.label())),
            ("physical_activity", Cat(self.physical_activity.label())),
            ("smoking_status", Cat(self.smoking_status.label())),
            ("sleep_hours", Integer(self.sleep_hours)),
            ("stress_level", Integer(self.stress_level)),
            ("alcohol_consumption", Cat(self.alcohol_consumption.label())),
            ("air_pollution_exposure", Cat(self.air_pollution_exposure.label())),
            ("income_level", Cat(self.income_level.label())),
            ("region", Cat(self.region.label())),
            (
                "participated_in_free_screening",
                Flag(self.participated_in_free_screening),
            ),
        ]
    }
}

impl From<&PatientRecord> for RawRecord {
    fn from(record: &PatientRecord) -> Self {
        record
            .values()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value.to_raw()))
            .collect()
    }
}

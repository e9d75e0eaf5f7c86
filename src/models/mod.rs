//! Domain models for patient input
//!
//! Categorical option sets and the raw and validated patient records.

pub mod patient;
pub mod types;

pub use patient::{FieldValue, PatientRecord, RawRecord, RawValue};
pub use types::{
    AlcoholConsumption, Category, DietaryHabits, EkgResult, Gender, Level, PhysicalActivity,
    Region, SmokingStatus,
};

//! Field definitions for the patient schema
//!
//! Each input field is described once: its name, the label shown to users, its
//! semantic type and its domain. The Arrow schema of the feature vector is derived
//! from these definitions.

use arrow::datatypes::{DataType, Field};
use std::fmt;

/// Semantic type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Integer measurement
    Integer,
    /// Yes/No answer
    Boolean,
    /// Categorical label
    Category,
}

impl FieldType {
    /// Convert to Arrow `DataType`
    ///
    /// Booleans are carried as 0/1 integers, categoricals as their label text.
    #[must_use]
    pub fn to_arrow_type(&self) -> DataType {
        match self {
            FieldType::Integer | FieldType::Boolean => DataType::Int64,
            FieldType::Category => DataType::Utf8,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Integer => write!(f, "Integer"),
            FieldType::Boolean => write!(f, "Boolean"),
            FieldType::Category => write!(f, "Category"),
        }
    }
}

/// Inclusive integer range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
}

impl IntRange {
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Clamp a value to the nearest bound
    #[must_use]
    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }
}

impl fmt::Display for IntRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Domain of accepted values for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDomain {
    /// Integer within an inclusive range
    Integer(IntRange),
    /// Exactly `Yes` or `No`
    Boolean,
    /// One of a fixed set of labels
    Category(&'static [&'static str]),
}

/// Definition of one input field
#[derive(Debug, Clone, Copy)]
pub struct FieldDefinition {
    /// Column name, identical to the name the classifier was trained with
    pub name: &'static str,
    /// Human label used in user-facing messages
    pub label: &'static str,
    /// Domain of accepted values
    pub domain: FieldDomain,
}

impl FieldDefinition {
    /// Integer field with an inclusive range
    #[must_use]
    pub const fn integer(name: &'static str, label: &'static str, min: i64, max: i64) -> Self {
        Self {
            name,
            label,
            domain: FieldDomain::Integer(IntRange::new(min, max)),
        }
    }

    /// Yes/No field
    #[must_use]
    pub const fn boolean(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            domain: FieldDomain::Boolean,
        }
    }

    /// Categorical field with the given options
    #[must_use]
    pub const fn category(
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            label,
            domain: FieldDomain::Category(options),
        }
    }

    /// Semantic type of this field
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        match self.domain {
            FieldDomain::Integer(_) => FieldType::Integer,
            FieldDomain::Boolean => FieldType::Boolean,
            FieldDomain::Category(_) => FieldType::Category,
        }
    }

    /// Range of an integer field
    #[must_use]
    pub fn range(&self) -> Option<IntRange> {
        match self.domain {
            FieldDomain::Integer(range) => Some(range),
            _ => None,
        }
    }

    /// Convert to a non-nullable Arrow Field
    #[must_use]
    pub fn to_arrow_field(&self) -> Field {
        Field::new(self.name, self.field_type().to_arrow_type(), false)
    }
}

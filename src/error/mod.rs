//! Error handling for the risk assessment pipeline.
//!
//! Errors fall into two groups. [`ValidationError`] covers bad input data and is
//! recoverable: the caller should ask for a corrected record. Every other variant of
//! [`Error`] signals a broken collaborator or a programming error and aborts the
//! current request without producing an assessment.

use std::path::PathBuf;

use arrow::error::ArrowError;

use crate::schema::{self, IntRange};

/// Generic message shown to users when an assessment cannot be produced
pub const GENERIC_FAILURE_MESSAGE: &str =
    "The risk assessment could not be completed. Please try again later.";

/// Input-data errors detected before any inference call is attempted
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A mandatory field is absent from the record
    #[error("Missing required field '{field}'")]
    MissingField { field: String },

    /// A numeric value lies outside its declared inclusive range
    #[error("Field '{field}' has value {value} outside the allowed range {range}")]
    OutOfRange {
        field: String,
        value: i64,
        range: IntRange,
    },

    /// A categorical or Yes/No value is not one of the declared options
    #[error("Field '{field}' has value '{value}', expected one of: {}", .allowed.join(", "))]
    InvalidCategory {
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    /// A numeric field received something that is not an integer
    #[error("Field '{field}' has value '{value}', expected an integer")]
    InvalidNumber { field: String, value: String },

    /// The record carries a field the schema does not declare
    #[error("Unknown field '{field}'")]
    UnknownField { field: String },
}

impl ValidationError {
    /// Name of the offending field
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField { field }
            | Self::OutOfRange { field, .. }
            | Self::InvalidCategory { field, .. }
            | Self::InvalidNumber { field, .. }
            | Self::UnknownField { field } => field,
        }
    }

    /// Field-specific corrective message for display next to the input control
    #[must_use]
    pub fn user_message(&self) -> String {
        let label = schema::field_label(self.field());
        match self {
            Self::MissingField { .. } => format!("Please provide a value for {label}."),
            Self::OutOfRange { value, range, .. } => format!(
                "{label} must be between {} and {} (got {value}).",
                range.min, range.max
            ),
            Self::InvalidCategory { value, allowed, .. } => format!(
                "{label} must be one of {} (got '{value}').",
                allowed.join(", ")
            ),
            Self::InvalidNumber { value, .. } => {
                format!("{label} must be a whole number (got '{value}').")
            }
            Self::UnknownField { field } => {
                format!("'{field}' is not part of the assessment form.")
            }
        }
    }
}

/// Crate-wide error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input record
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The classifier artifact could not be loaded
    #[error("Failed to load model from {}: {reason}", .path.display())]
    ModelLoad { path: PathBuf, reason: String },

    /// Feature vector shape disagrees with what the classifier expects
    #[error("Feature vector shape mismatch: {0}")]
    EncodingShape(String),

    /// The classifier produced an output outside its contract
    #[error("Classifier output out of range: {output} = {value}")]
    ClassifierOutputRange { output: String, value: f64 },

    /// Error building or reading Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),
}

impl Error {
    /// Create a model load error for the given artifact path
    pub fn model_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ModelLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a classifier output error
    pub fn classifier_output(output: impl Into<String>, value: f64) -> Self {
        Self::ClassifierOutputRange {
            output: output.into(),
            value,
        }
    }

    /// Whether the caller can recover by re-prompting for corrected input
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Message suitable for the presentation layer
    ///
    /// Validation errors produce a field-specific message; every fatal error
    /// collapses to [`GENERIC_FAILURE_MESSAGE`].
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.user_message(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Result type for risk pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

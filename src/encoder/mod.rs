//! Feature encoding
//!
//! Turns a validated [`PatientRecord`] into the single-row Arrow batch the classifier
//! consumes. Encoding is structural only: numbers pass through, Yes/No becomes 1/0 and
//! categorical labels pass through as text for the classifier's own preprocessing.

use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use itertools::{EitherOrBoth, Itertools};

use crate::error::{Error, Result};
use crate::models::patient::{FieldValue, PatientRecord};
use crate::schema::{FieldType, PATIENT_FIELDS, patient_schema};
use crate::utils::arrow::extract_as_text;

/// Encoded features of one patient, ready for inference
///
/// Read-only: the batch has exactly one row and the patient schema's columns.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    batch: RecordBatch,
}

impl FeatureVector {
    /// The underlying single-row batch
    #[must_use]
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    #[must_use]
    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    /// Column names in order
    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|field| field.name().clone())
            .collect()
    }

    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    /// Textual echo of every submitted value as `(field, value)` pairs
    ///
    /// Yes/No fields appear as their encoded `1`/`0`, the way the model sees them.
    pub fn summary(&self) -> Result<Vec<(String, String)>> {
        self.column_names()
            .into_iter()
            .map(|name| {
                let value = extract_as_text(&self.batch, 0, &name)?;
                Ok((name, value))
            })
            .collect()
    }
}

/// Encode a validated record into a feature vector
///
/// The record's numeric ranges are re-checked first, so an out-of-range value never
/// reaches the classifier even if the record was built by hand.
///
/// # Errors
/// * `Error::Validation` - A numeric field lies outside its declared range
/// * `Error::EncodingShape` - The record does not line up with the patient schema
pub fn encode(record: &PatientRecord) -> Result<FeatureVector> {
    record.ensure_in_domain()?;

    let values = record.values();
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(PATIENT_FIELDS.len());

    for (position, pair) in PATIENT_FIELDS.iter().zip_longest(values).enumerate() {
        let (def, (name, value)) = match pair {
            EitherOrBoth::Both(def, entry) => (def, entry),
            EitherOrBoth::Left(def) => {
                return Err(Error::EncodingShape(format!(
                    "record has no value for column '{}'",
                    def.name
                )));
            }
            EitherOrBoth::Right((name, _)) => {
                return Err(Error::EncodingShape(format!(
                    "record has extra column '{name}' at position {position}"
                )));
            }
        };

        if def.name != name {
            return Err(Error::EncodingShape(format!(
                "column {position} is '{name}', expected '{}'",
                def.name
            )));
        }

        let column: ArrayRef = match (def.field_type(), value) {
            (FieldType::Integer, FieldValue::Integer(number)) => {
                Arc::new(Int64Array::from(vec![number]))
            }
            (FieldType::Boolean, FieldValue::Flag(flag)) => {
                Arc::new(Int64Array::from(vec![i64::from(flag)]))
            }
            (FieldType::Category, FieldValue::Category(label)) => {
                Arc::new(StringArray::from(vec![label]))
            }
            (field_type, value) => {
                return Err(Error::EncodingShape(format!(
                    "column '{name}' is {field_type} but the record holds {value:?}"
                )));
            }
        };
        columns.push(column);
    }

    let batch = RecordBatch::try_new(patient_schema(), columns)?;
    log::debug!("Encoded feature vector with {} columns", batch.num_columns());

    Ok(FeatureVector { batch })
}

/// Assert that a classifier expects exactly the encoder's columns, in order
///
/// Run once at startup so an order mismatch fails before the first request.
pub fn check_feature_order<S: AsRef<str>>(expected: &[S]) -> Result<()> {
    let encoded = PATIENT_FIELDS.iter().map(|def| def.name);
    let expected = expected.iter().map(AsRef::as_ref);

    for (position, pair) in encoded.zip_longest(expected).enumerate() {
        match pair {
            EitherOrBoth::Both(ours, theirs) if ours == theirs => {}
            EitherOrBoth::Both(ours, theirs) => {
                return Err(Error::EncodingShape(format!(
                    "column {position}: encoder produces '{ours}', model expects '{theirs}'"
                )));
            }
            EitherOrBoth::Left(ours) => {
                return Err(Error::EncodingShape(format!(
                    "model does not expect column '{ours}' (position {position})"
                )));
            }
            EitherOrBoth::Right(theirs) => {
                return Err(Error::EncodingShape(format!(
                    "model expects column '{theirs}' (position {position}) which the encoder does not produce"
                )));
            }
        }
    }

    Ok(())
}

//! Utilities for working with Arrow arrays.
//!
//! Column access here is strict: a missing column or a column of the wrong type is a
//! shape error. Feature data is never converted on the fly.

use arrow::array::{Array, ArrayRef};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::{Error, Result};

/// Get a column from a record batch, checking its data type
///
/// # Arguments
///
/// * `batch` - The record batch containing the column
/// * `column_name` - The name of the column to extract
/// * `expected_type` - The data type the column must have
///
/// # Returns
///
/// * `Ok(ArrayRef)` - The column array
/// * `Err(Error::EncodingShape)` - If the column is missing or has another type
pub fn get_column(
    batch: &RecordBatch,
    column_name: &str,
    expected_type: &DataType,
) -> Result<ArrayRef> {
    let column = get_column_by_name(batch, column_name)?;

    let actual_type = column.data_type();
    if actual_type != expected_type {
        return Err(Error::EncodingShape(format!(
            "column '{column_name}' has type {actual_type:?}, expected {expected_type:?}"
        )));
    }

    Ok(column)
}

/// Downcast a column to a specific array type with clear error messages
///
/// # Type Parameters
///
/// * `A` - The target array type to downcast to
///
/// # Arguments
///
/// * `array` - The array reference to downcast
/// * `column_name` - The name of the column (for error messages)
/// * `expected_type_name` - A human-readable name of the expected type (for error messages)
pub fn downcast_array<'a, A: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
    expected_type_name: &str,
) -> Result<&'a A> {
    array.as_any().downcast_ref::<A>().ok_or_else(|| {
        Error::EncodingShape(format!(
            "column '{column_name}' could not be read as {expected_type_name}"
        ))
    })
}

/// Get the column index by name from a record batch
///
/// # Errors
/// Returns an error if the column does not exist
pub fn get_column_index(batch: &RecordBatch, column_name: &str) -> Result<usize> {
    batch
        .schema()
        .index_of(column_name)
        .map_err(|_| Error::EncodingShape(format!("column '{column_name}' not found")))
}

/// Get a column from a record batch by name
pub fn get_column_by_name(batch: &RecordBatch, column_name: &str) -> Result<ArrayRef> {
    let idx = get_column_index(batch, column_name)?;
    Ok(batch.column(idx).clone())
}

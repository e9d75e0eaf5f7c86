//! Field extraction utilities for Arrow record batches
//!
//! This module provides typed access to single values of a record batch. A null or
//! out-of-bounds value is reported as a shape error, since feature vectors never
//! carry nulls.

use arrow::array::{Array, Int64Array, StringArray};
use arrow::compute::kernels::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::{Error, Result};
use crate::utils::arrow::array_utils::{downcast_array, get_column, get_column_by_name};

/// Extract an int64 value from a record batch
///
/// # Arguments
///
/// * `batch` - The record batch to extract from
/// * `row` - The row index
/// * `column_name` - The name of the column
///
/// # Returns
///
/// * `Ok(i64)` - The extracted value
/// * `Err` - If the column is missing, mistyped, or the value is null
pub fn extract_int64(batch: &RecordBatch, row: usize, column_name: &str) -> Result<i64> {
    let array = get_column(batch, column_name, &DataType::Int64)?;
    let int_array = downcast_array::<Int64Array>(&array, column_name, "Int64")?;

    check_row(int_array, row, column_name)?;
    Ok(int_array.value(row))
}

/// Extract a string value from a record batch
///
/// # Arguments
///
/// * `batch` - The record batch to extract from
/// * `row` - The row index
/// * `column_name` - The name of the column
///
/// # Returns
///
/// * `Ok(String)` - The extracted value
/// * `Err` - If the column is missing, mistyped, or the value is null
pub fn extract_string(batch: &RecordBatch, row: usize, column_name: &str) -> Result<String> {
    let array = get_column(batch, column_name, &DataType::Utf8)?;
    let string_array = downcast_array::<StringArray>(&array, column_name, "String")?;

    check_row(string_array, row, column_name)?;
    Ok(string_array.value(row).to_string())
}

/// Render any value as text using Arrow's cast kernel
pub fn extract_as_text(batch: &RecordBatch, row: usize, column_name: &str) -> Result<String> {
    let array = get_column_by_name(batch, column_name)?;
    let text = cast::cast(&array, &DataType::Utf8)?;
    let string_array = downcast_array::<StringArray>(&text, column_name, "String")?;

    check_row(string_array, row, column_name)?;
    Ok(string_array.value(row).to_string())
}

fn check_row(array: &dyn Array, row: usize, column_name: &str) -> Result<()> {
    if row >= array.len() {
        return Err(Error::EncodingShape(format!(
            "row {row} out of bounds for column '{column_name}' with {} rows",
            array.len()
        )));
    }
    if array.is_null(row) {
        return Err(Error::EncodingShape(format!(
            "column '{column_name}' is null at row {row}"
        )));
    }
    Ok(())
}

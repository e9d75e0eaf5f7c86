//! Arrow data handling utilities
//!
//! Helpers for reading typed values out of record batches.

pub mod array_utils;
pub mod extractors;

// Re-export commonly used functions for convenience
pub use array_utils::{downcast_array, get_column, get_column_by_name};
pub use extractors::{extract_as_text, extract_int64, extract_string};

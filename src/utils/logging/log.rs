//! Logging utilities
//!
//! Standardized logging functions for pipeline operations.

use std::time::Duration;

use crate::error::Error;
use crate::interpret::Assessment;

/// Log an operation start with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `subject` - What is being operated on
pub fn log_operation_start(operation: &str, subject: &str) {
    log::info!("{operation} {subject}");
}

/// Log an operation completion with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `items` - Number of items processed
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(operation: &str, items: usize, elapsed: Option<Duration>) {
    if let Some(duration) = elapsed {
        log::info!("Successfully {operation} {items} records in {duration:?}");
    } else {
        log::info!("Successfully {operation} {items} records");
    }
}

/// Log a produced assessment
pub fn log_assessment(assessment: &Assessment) {
    log::info!(
        "Assessment: {} (p1 = {:.4})",
        assessment.label(),
        assessment.probability()
    );
}

/// Log a failed assessment at a level matching its severity
///
/// Input-data errors are expected and logged as warnings; everything else is an error.
pub fn log_failure(err: &Error) {
    if err.is_recoverable() {
        log::warn!("Rejected record: {err}");
    } else {
        log::error!("Assessment aborted: {err}");
    }
}

//! Console output utilities
//!
//! Plain-text rendering of a submitted record and its assessment.

use crate::interpret::Assessment;

/// Print the submitted-data summary as an aligned two-column table
pub fn print_record_summary(rows: &[(String, String)]) {
    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

    println!("Submitted data:");
    for (name, value) in rows {
        println!("  {name:<width$}  {value}");
    }
}

/// Print an assessment the way the result panel shows it
pub fn print_assessment(assessment: &Assessment) {
    println!("Assessment: {}", assessment.headline());
    println!("Risk probability: {}", assessment.percentage_display());
    println!("{}", assessment.recommendation());
}

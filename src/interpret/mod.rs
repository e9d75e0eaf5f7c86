//! Risk interpretation
//!
//! Converts the classifier's raw outputs into an [`Assessment`]. The label follows the
//! classifier's own binary decision; the probability is reported next to it and never
//! overrides it.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};

/// Allowed deviation of `p0 + p1` from 1
pub const PROBABILITY_SUM_TOLERANCE: f64 = 1e-4;

/// Risk category of an assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLabel {
    /// The classifier predicted the positive class
    AtRisk,
    /// The classifier predicted the negative class
    LowRisk,
}

impl RiskLabel {
    /// Machine-readable label
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AtRisk => "AT_RISK",
            Self::LowRisk => "LOW_RISK",
        }
    }

    /// Headline shown to the user
    #[must_use]
    pub fn headline(&self) -> &'static str {
        match self {
            Self::AtRisk => "AT RISK",
            Self::LowRisk => "LOW RISK",
        }
    }

    /// Guidance shown with the headline
    #[must_use]
    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::AtRisk => {
                "Immediate consultation with a healthcare provider is recommended."
            }
            Self::LowRisk => {
                "The patient is in a low-risk category. Maintaining a healthy lifestyle is encouraged."
            }
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final risk assessment of one patient
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Assessment {
    positive: bool,
    probability: f64,
    label: RiskLabel,
}

impl Assessment {
    /// Whether the classifier predicted the "at risk" class
    #[must_use]
    pub fn positive(&self) -> bool {
        self.positive
    }

    /// Probability of the positive class, in [0, 1]
    #[must_use]
    pub fn probability(&self) -> f64 {
        self.probability
    }

    #[must_use]
    pub fn label(&self) -> RiskLabel {
        self.label
    }

    /// Probability as a percentage rounded to two decimals
    #[must_use]
    pub fn percentage(&self) -> f64 {
        round_percentage(self.probability)
    }

    /// Percentage formatted for display, e.g. `77.34%`
    #[must_use]
    pub fn percentage_display(&self) -> String {
        format!("{:.2}%", self.percentage())
    }

    #[must_use]
    pub fn headline(&self) -> &'static str {
        self.label.headline()
    }

    #[must_use]
    pub fn recommendation(&self) -> &'static str {
        self.label.recommendation()
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.percentage_display())
    }
}

/// Round a probability to a percentage with two decimals (half away from zero)
#[must_use]
pub fn round_percentage(probability: f64) -> f64 {
    (probability * 10_000.0).round() / 100.0
}

/// Interpret the classifier's outputs
///
/// # Arguments
/// * `predicted_class` - The classifier's decision, 0 or 1
/// * `probabilities` - `[p0, p1]` as returned by predict_proba
///
/// # Errors
/// Returns `Error::ClassifierOutputRange` when the class is not 0/1, a probability is
/// not finite or outside [0, 1], or the two probabilities do not sum to 1.
pub fn interpret(predicted_class: u8, probabilities: [f64; 2]) -> Result<Assessment> {
    if predicted_class > 1 {
        return Err(Error::classifier_output(
            "predicted class",
            f64::from(predicted_class),
        ));
    }

    let [p0, p1] = probabilities;
    for (name, value) in [("p0", p0), ("p1", p1)] {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(Error::classifier_output(name, value));
        }
    }

    let total = p0 + p1;
    if (total - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
        return Err(Error::classifier_output("p0 + p1", total));
    }

    let positive = predicted_class == 1;
    let label = if positive {
        RiskLabel::AtRisk
    } else {
        RiskLabel::LowRisk
    };

    Ok(Assessment {
        positive,
        probability: p1,
        label,
    })
}

//! Categorical domain types
//!
//! Each categorical input field has a closed option set. The labels are the exact
//! strings the classifier was trained on, so matching is byte-for-byte: no trimming,
//! no case folding.

use std::fmt;

/// A closed set of labelled options
pub trait Category: Sized + Copy + 'static {
    /// Every accepted label, in display order
    const OPTIONS: &'static [&'static str];

    /// The canonical label of this option
    fn label(&self) -> &'static str;

    /// Parse an exact label
    fn from_label(label: &str) -> Option<Self>;
}

/// Declare a categorical enum together with its label table
macro_rules! category {
    (
        $(#[$meta:meta])*
        $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $label:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
        }

        impl Category for $name {
            const OPTIONS: &'static [&'static str] = &[$($label),+];

            fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            fn from_label(label: &str) -> Option<Self> {
                match label {
                    $($label => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

category! {
    /// Gender of the patient
    Gender {
        /// Male
        Male => "Male",
        /// Female
        Female => "Female",
    }
}

category! {
    /// Resting electrocardiogram result
    EkgResult {
        /// Normal trace
        Normal => "Normal",
        /// Abnormal trace
        Abnormal => "Abnormal",
        /// ST-T wave abnormality
        StTWaveAbnormality => "ST-T wave abnormality",
    }
}

category! {
    /// Self-reported dietary habits
    DietaryHabits {
        Healthy => "Healthy",
        Average => "Average",
        Unhealthy => "Unhealthy",
    }
}

category! {
    /// Physical activity level
    PhysicalActivity {
        Low => "Low",
        Moderate => "Moderate",
        High => "High",
    }
}

category! {
    /// Smoking history
    SmokingStatus {
        /// Never smoked
        Never => "Never",
        /// Former smoker
        Past => "Past",
        /// Current smoker
        Current => "Current",
    }
}

category! {
    /// Alcohol consumption
    AlcoholConsumption {
        NonDrinker => "Non-drinker",
        Low => "Low",
        Moderate => "Moderate",
        High => "High",
    }
}

category! {
    /// Three-step level used for air pollution exposure and income
    Level {
        Low => "Low",
        Medium => "Medium",
        High => "High",
    }
}

category! {
    /// Geographic region of residence
    Region {
        North => "North",
        South => "South",
        East => "East",
        West => "West",
        Central => "Central",
    }
}

/// Labels accepted for Yes/No fields
pub const YES_NO_OPTIONS: &[&str] = &["Yes", "No"];

/// Normalize a Yes/No label to a flag
///
/// Only the two canonical labels are accepted; `"yes"`, `"1"`, `"true"` and
/// friends are all rejected.
#[must_use]
pub fn parse_yes_no(label: &str) -> Option<bool> {
    match label {
        "Yes" => Some(true),
        "No" => Some(false),
        _ => None,
    }
}

/// Render a flag back to its Yes/No label
#[must_use]
pub fn yes_no_label(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

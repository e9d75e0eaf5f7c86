//! Standardized logistic regression loaded from a JSON artifact
//!
//! The artifact stores its own feature order next to the weights, so the pipeline
//! can verify at startup that the encoder produces exactly those columns.
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "feature_order": ["age", "gender", ...],
//!   "intercept": -1.2,
//!   "threshold": 0.5,
//!   "numeric": { "age": { "mean": 50.0, "scale": 20.0, "weight": 0.9 } },
//!   "categorical": { "gender": { "Male": 0.25, "Female": 0.0 } }
//! }
//! ```

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;

use crate::classifier::Classifier;
use crate::encoder::FeatureVector;
use crate::error::{Error, Result};
use crate::schema::{self, FieldType};
use crate::utils::arrow::{extract_int64, extract_string};

/// Artifact format version understood by this loader
pub const SUPPORTED_FORMAT_VERSION: u32 = 1;

/// Standardization and weight of one numeric feature
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct NumericWeight {
    pub mean: f64,
    pub scale: f64,
    pub weight: f64,
}

impl NumericWeight {
    fn contribution(&self, value: f64) -> f64 {
        self.weight * (value - self.mean) / self.scale
    }
}

#[derive(Debug, Deserialize)]
struct Artifact {
    format_version: u32,
    feature_order: Vec<String>,
    intercept: f64,
    #[serde(default = "default_threshold")]
    threshold: f64,
    #[serde(default)]
    numeric: FxHashMap<String, NumericWeight>,
    #[serde(default)]
    categorical: FxHashMap<String, FxHashMap<String, f64>>,
}

fn default_threshold() -> f64 {
    0.5
}

/// How a single column enters the linear score
#[derive(Debug, Clone)]
enum Term {
    Numeric(NumericWeight),
    Categorical(FxHashMap<String, f64>),
}

impl Term {
    fn kind(&self) -> &'static str {
        match self {
            Self::Numeric(_) => "numeric",
            Self::Categorical(_) => "categorical",
        }
    }

    /// Numeric weights need an Int64 column, label weights a Utf8 column
    fn fits(&self, field_type: FieldType) -> bool {
        matches!(
            (self, field_type),
            (Self::Numeric(_), FieldType::Integer | FieldType::Boolean)
                | (Self::Categorical(_), FieldType::Category)
        )
    }
}

/// Logistic regression over standardized numeric features and one-hot categories
#[derive(Debug, Clone)]
pub struct LogisticModel {
    feature_order: Vec<String>,
    terms: Vec<Term>,
    intercept: f64,
    threshold: f64,
}

impl LogisticModel {
    /// Load and check a model artifact
    ///
    /// # Errors
    /// Returns `Error::ModelLoad` if the file is missing or unreadable, is not valid
    /// JSON, has an unsupported version, or describes its features inconsistently.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|err| {
            let reason = match err.kind() {
                io::ErrorKind::NotFound => "model file not found".to_string(),
                io::ErrorKind::PermissionDenied => {
                    "permission denied - check file permissions".to_string()
                }
                _ => format!("failed to open model file: {err}"),
            };
            Error::model_load(path, reason)
        })?;

        let artifact: Artifact = serde_json::from_reader(BufReader::new(file))
            .map_err(|err| Error::model_load(path, format!("corrupt model artifact: {err}")))?;

        let model = Self::from_artifact(artifact).map_err(|reason| Error::model_load(path, reason))?;
        log::info!(
            "Loaded logistic model with {} features (threshold {})",
            model.feature_order.len(),
            model.threshold
        );
        Ok(model)
    }

    /// Parse a model from an in-memory JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: Artifact = serde_json::from_str(json)
            .map_err(|err| Error::model_load("<memory>", format!("corrupt model artifact: {err}")))?;
        Self::from_artifact(artifact).map_err(|reason| Error::model_load("<memory>", reason))
    }

    fn from_artifact(mut artifact: Artifact) -> std::result::Result<Self, String> {
        if artifact.format_version != SUPPORTED_FORMAT_VERSION {
            return Err(format!(
                "unsupported format version {} (expected {SUPPORTED_FORMAT_VERSION})",
                artifact.format_version
            ));
        }
        if !(0.0..=1.0).contains(&artifact.threshold) {
            return Err(format!("threshold {} outside [0, 1]", artifact.threshold));
        }
        if !artifact.intercept.is_finite() {
            return Err("intercept is not finite".to_string());
        }

        let mut seen = FxHashSet::default();
        let mut terms = Vec::with_capacity(artifact.feature_order.len());

        for name in &artifact.feature_order {
            if !seen.insert(name.as_str()) {
                return Err(format!("feature '{name}' listed twice in feature_order"));
            }

            let term = match (artifact.numeric.remove(name), artifact.categorical.remove(name)) {
                (Some(weight), None) => {
                    if !(weight.scale.is_finite() && weight.scale > 0.0) {
                        return Err(format!("feature '{name}' has non-positive scale"));
                    }
                    Term::Numeric(weight)
                }
                (None, Some(levels)) => Term::Categorical(levels),
                (Some(_), Some(_)) => {
                    return Err(format!("feature '{name}' is both numeric and categorical"));
                }
                (None, None) => return Err(format!("no weights for feature '{name}'")),
            };

            if let Some(def) = schema::field(name).filter(|def| !term.fits(def.field_type())) {
                return Err(format!(
                    "feature '{name}' has {} weights but its column is {}",
                    term.kind(),
                    def.field_type()
                ));
            }
            terms.push(term);
        }

        if let Some(extra) = artifact
            .numeric
            .keys()
            .chain(artifact.categorical.keys())
            .next()
        {
            return Err(format!("weights for '{extra}' which is not in feature_order"));
        }

        Ok(Self {
            feature_order: artifact.feature_order,
            terms,
            intercept: artifact.intercept,
            threshold: artifact.threshold,
        })
    }

    /// Decision threshold on the positive-class probability
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Probability of the positive class
    fn positive_probability(&self, features: &FeatureVector) -> Result<f64> {
        let batch = features.batch();
        if batch.num_rows() != 1 {
            return Err(Error::EncodingShape(format!(
                "expected a single row, got {}",
                batch.num_rows()
            )));
        }

        let columns = features.column_names();
        if columns != self.feature_order {
            return Err(Error::EncodingShape(format!(
                "columns [{}] do not match the model's feature order",
                columns.join(", ")
            )));
        }

        let mut score = self.intercept;
        for (name, term) in self.feature_order.iter().zip(&self.terms) {
            score += match term {
                Term::Numeric(weight) => {
                    #[allow(clippy::cast_precision_loss)]
                    let value = extract_int64(batch, 0, name)? as f64;
                    weight.contribution(value)
                }
                // Unseen labels contribute nothing, like an ignored one-hot column
                Term::Categorical(levels) => {
                    let label = extract_string(batch, 0, name)?;
                    levels.get(&label).copied().unwrap_or(0.0)
                }
            };
        }

        Ok(sigmoid(score))
    }
}

impl Classifier for LogisticModel {
    fn feature_names(&self) -> &[String] {
        &self.feature_order
    }

    fn predict(&self, features: &FeatureVector) -> Result<u8> {
        let p1 = self.positive_probability(features)?;
        Ok(u8::from(p1 >= self.threshold))
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<[f64; 2]> {
        let p1 = self.positive_probability(features)?;
        Ok([1.0 - p1, p1])
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

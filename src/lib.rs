//! Heart attack risk assessment core: schema validation of patient records,
//! deterministic feature encoding for a pre-trained binary classifier, and
//! interpretation of the classifier's output as a risk assessment.

pub mod classifier;
pub mod config;
pub mod encoder;
pub mod error;
pub mod interpret;
pub mod models;
pub mod pipeline;
pub mod schema;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{PredictorConfig, RangePolicy};
pub use error::{Error, Result, ValidationError};
pub use models::patient::{PatientRecord, RawRecord, RawValue};
pub use pipeline::RiskPredictor;

// Pipeline stages
pub use classifier::{Classifier, LogisticModel, load_classifier};
pub use encoder::{FeatureVector, check_feature_order, encode};
pub use interpret::{Assessment, RiskLabel, interpret};
pub use schema::{validate, validate_with_policy};

// Arrow types
pub use arrow::datatypes::Schema as ArrowSchema;
pub use arrow::record_batch::RecordBatch;

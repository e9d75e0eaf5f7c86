//! Classifier collaborator
//!
//! The trained model is owned outside this crate. [`Classifier`] is the seam: any
//! binary classifier exposing predict / predict_proba over a [`FeatureVector`] and
//! publishing the feature order it was trained with can drive the pipeline.

use std::path::Path;
use std::sync::Arc;

use crate::encoder::FeatureVector;
use crate::error::Result;

pub mod linear;

pub use linear::LogisticModel;

/// A pre-trained binary classifier
///
/// Implementations must be reentrant: the same instance serves concurrent requests
/// through a shared reference.
pub trait Classifier: Send + Sync {
    /// Feature columns the model was trained on, in order
    fn feature_names(&self) -> &[String];

    /// Predicted class, 0 or 1
    fn predict(&self, features: &FeatureVector) -> Result<u8>;

    /// Class probabilities `[p0, p1]`
    fn predict_proba(&self, features: &FeatureVector) -> Result<[f64; 2]>;
}

/// Load the classifier artifact at `path`
///
/// # Errors
/// Returns `Error::ModelLoad` when the file is missing, corrupt or of an
/// unsupported version.
pub fn load_classifier(path: &Path) -> Result<Arc<dyn Classifier>> {
    let model = LogisticModel::load(path)?;
    Ok(Arc::new(model))
}

//! Classifier port: Trait for the pre-trained churn model.
//!
//! This trait abstracts the model backend from the application logic.

use crate::domain::{ChurnLabel, CustomerFeatureRecord};

/// Errors that can occur while running the model on a record.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClassifierError {
    #[error("Found unknown category {value:?} in column {feature}")]
    UnknownCategory { feature: String, value: String },

    #[error("Model returned an invalid probability: {0}")]
    InvalidProbability(String),

    #[error("Inference failed: {0}")]
    Inference(String),
}

/// Trait for a binary churn classifier.
///
/// Implementations are loaded once at startup and shared read-only.
pub trait ChurnClassifier: Send + Sync {
    /// Predict the churn label for one customer.
    ///
    /// # Errors
    /// Returns `ClassifierError` if the model cannot score the record.
    fn predict(&self, record: &CustomerFeatureRecord) -> Result<ChurnLabel, ClassifierError>;

    /// Class probabilities `[p_no, p_yes]` for one customer.
    ///
    /// Models without a probability output keep the default, which
    /// returns `Ok(None)`.
    ///
    /// # Errors
    /// Returns `ClassifierError` if the model cannot score the record.
    fn predict_probability(
        &self,
        _record: &CustomerFeatureRecord,
    ) -> Result<Option<[f64; 2]>, ClassifierError> {
        Ok(None)
    }
}

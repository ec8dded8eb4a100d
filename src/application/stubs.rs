//! Stub classifiers shared by unit tests.

use crate::domain::{ChurnLabel, CustomerFeatureRecord};
use crate::ports::{ChurnClassifier, ClassifierError};

/// Returns a fixed label and positive-class probability.
pub struct FixedClassifier {
    pub label: ChurnLabel,
    pub probability: f64,
}

impl ChurnClassifier for FixedClassifier {
    fn predict(&self, _record: &CustomerFeatureRecord) -> Result<ChurnLabel, ClassifierError> {
        Ok(self.label)
    }

    fn predict_probability(
        &self,
        _record: &CustomerFeatureRecord,
    ) -> Result<Option<[f64; 2]>, ClassifierError> {
        Ok(Some([1.0 - self.probability, self.probability]))
    }
}

/// Only implements `predict`.
pub struct LabelOnlyClassifier(pub ChurnLabel);

impl ChurnClassifier for LabelOnlyClassifier {
    fn predict(&self, _record: &CustomerFeatureRecord) -> Result<ChurnLabel, ClassifierError> {
        Ok(self.0)
    }
}

/// Fails on every call.
pub struct FailingClassifier;

impl ChurnClassifier for FailingClassifier {
    fn predict(&self, _record: &CustomerFeatureRecord) -> Result<ChurnLabel, ClassifierError> {
        Err(ClassifierError::Inference("model exploded".to_string()))
    }
}

//! Prediction service: Runs the churn classifier on one submission.
//!
//! This service coordinates:
//! - Record validation
//! - Label prediction
//! - Optional probability prediction and its sanity checks

use std::sync::Arc;

use crate::domain::{ChurnPrediction, CustomerFeatureRecord};
use crate::ports::{ChurnClassifier, ClassifierError};
use crate::{ChurnError, Result};

/// Service for running churn inference.
///
/// Holds the process-wide model handle, which is read-only after load.
pub struct PredictionService<C>
where
    C: ChurnClassifier,
{
    classifier: Arc<C>,
}

impl<C> PredictionService<C>
where
    C: ChurnClassifier,
{
    /// Create a new prediction service.
    pub fn new(classifier: Arc<C>) -> Self {
        Self { classifier }
    }

    /// Predict churn for one customer.
    ///
    /// Performs the full pipeline:
    /// 1. Validate the record
    /// 2. Predict the label
    /// 3. Predict class probabilities, if the model supports it
    ///
    /// # Errors
    /// Returns `ChurnError::Validation` for out-of-domain input and
    /// `ChurnError::Classifier` for any model failure.
    pub fn predict(&self, record: &CustomerFeatureRecord) -> Result<ChurnPrediction> {
        record
            .validate()
            .map_err(|errors| ChurnError::Validation(errors.join(", ")))?;

        tracing::debug!("Step 1: Predicting label...");
        let label = self.classifier.predict(record)?;

        tracing::debug!("Step 2: Predicting probability...");
        let probability = match self.classifier.predict_probability(record)? {
            Some([_, p_yes]) => {
                if !p_yes.is_finite() || !(0.0..=1.0).contains(&p_yes) {
                    return Err(ClassifierError::InvalidProbability(p_yes.to_string()).into());
                }
                Some(p_yes)
            }
            None => None,
        };

        let prediction = ChurnPrediction::new(label, probability);

        match prediction.probability {
            Some(p) => tracing::info!(
                "Prediction complete: churn={}, probability={:.2}%",
                prediction.label,
                p * 100.0
            ),
            None => tracing::info!(
                "Prediction complete: churn={} (model has no probability output)",
                prediction.label
            ),
        }

        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::logistic::LogisticModel;
    use crate::application::stubs::{FailingClassifier, FixedClassifier, LabelOnlyClassifier};
    use crate::domain::ChurnLabel;
    use std::path::Path;

    #[test]
    fn test_fixed_positive_prediction() {
        let service = PredictionService::new(Arc::new(FixedClassifier {
            label: ChurnLabel::Yes,
            probability: 0.73,
        }));

        let prediction = service
            .predict(&CustomerFeatureRecord::default())
            .expect("Should predict");
        assert_eq!(prediction.label, ChurnLabel::Yes);
        assert_eq!(
            prediction.probability_line().as_deref(),
            Some("Churn Probability: 73.00%")
        );
    }

    #[test]
    fn test_label_only_classifier() {
        let service = PredictionService::new(Arc::new(LabelOnlyClassifier(ChurnLabel::No)));

        let prediction = service
            .predict(&CustomerFeatureRecord::default())
            .expect("Should predict");
        assert_eq!(prediction.label, ChurnLabel::No);
        assert!(prediction.probability.is_none());
    }

    #[test]
    fn test_classifier_failure_is_returned() {
        let service = PredictionService::new(Arc::new(FailingClassifier));

        let err = service
            .predict(&CustomerFeatureRecord::default())
            .expect_err("must fail");
        assert!(matches!(err, ChurnError::Classifier(_)));
        assert!(err.to_string().contains("model exploded"));
    }

    #[test]
    fn test_out_of_range_probability_is_rejected() {
        let service = PredictionService::new(Arc::new(FixedClassifier {
            label: ChurnLabel::Yes,
            probability: 1.5,
        }));

        let err = service
            .predict(&CustomerFeatureRecord::default())
            .expect_err("must fail");
        assert!(matches!(
            err,
            ChurnError::Classifier(ClassifierError::InvalidProbability(_))
        ));
    }

    #[test]
    fn test_invalid_record_never_reaches_model() {
        let service = PredictionService::new(Arc::new(FailingClassifier));
        let record = CustomerFeatureRecord {
            monthly_charges: -1.0,
            ..CustomerFeatureRecord::default()
        };

        let err = service.predict(&record).expect_err("must fail");
        assert!(matches!(err, ChurnError::Validation(_)));
    }

    #[test]
    fn test_bundled_model_pipeline() {
        let model = LogisticModel::load(Path::new("models")).expect("Model should load for tests");
        let service = PredictionService::new(Arc::new(model));

        let prediction = service
            .predict(&CustomerFeatureRecord::default())
            .expect("Should predict");
        let p = prediction.probability.expect("bundled model emits probabilities");
        assert!((0.0..=1.0).contains(&p));
        assert_eq!(prediction.label.is_churn(), p >= 0.5);
    }
}

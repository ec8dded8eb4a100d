//! Prediction result types.
//!
//! Represents the output of the churn classifier for one submission.

/// Binary churn label as produced by the model ("Yes" / "No").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChurnLabel {
    /// Customer is expected to leave
    Yes,
    /// Customer is expected to stay
    No,
}

impl ChurnLabel {
    #[must_use]
    pub fn is_churn(&self) -> bool {
        matches!(self, Self::Yes)
    }
}

impl std::fmt::Display for ChurnLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yes => write!(f, "YES"),
            Self::No => write!(f, "NO"),
        }
    }
}

/// Format a probability in `[0, 1]` as a percentage with two decimals.
#[must_use]
pub fn format_percent(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

/// Outcome of one prediction.
#[derive(Debug, Clone)]
pub struct ChurnPrediction {
    /// Predicted label
    pub label: ChurnLabel,

    /// Probability of the positive class, when the model exposes one
    pub probability: Option<f64>,

    /// Timestamp of the prediction
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl ChurnPrediction {
    #[must_use]
    pub fn new(label: ChurnLabel, probability: Option<f64>) -> Self {
        Self {
            label,
            probability,
            created_at: chrono::Utc::now(),
        }
    }

    /// "Churn Prediction: YES" / "Churn Prediction: NO"
    #[must_use]
    pub fn headline(&self) -> String {
        format!("Churn Prediction: {}", self.label)
    }

    /// "Churn Probability: 73.00%", or `None` for label-only models.
    #[must_use]
    pub fn probability_line(&self) -> Option<String> {
        self.probability
            .map(|p| format!("Churn Probability: {}", format_percent(p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_display() {
        assert_eq!(ChurnLabel::Yes.to_string(), "YES");
        assert_eq!(ChurnLabel::No.to_string(), "NO");
        assert!(ChurnLabel::Yes.is_churn());
        assert!(!ChurnLabel::No.is_churn());
    }

    #[test]
    fn test_percent_formatting() {
        assert_eq!(format_percent(0.73), "73.00%");
        assert_eq!(format_percent(0.0), "0.00%");
        assert_eq!(format_percent(1.0), "100.00%");
        assert_eq!(format_percent(0.5), "50.00%");
    }

    #[test]
    fn test_prediction_lines() {
        let positive = ChurnPrediction::new(ChurnLabel::Yes, Some(0.73));
        assert_eq!(positive.headline(), "Churn Prediction: YES");
        assert_eq!(
            positive.probability_line().as_deref(),
            Some("Churn Probability: 73.00%")
        );

        let label_only = ChurnPrediction::new(ChurnLabel::No, None);
        assert_eq!(label_only.headline(), "Churn Prediction: NO");
        assert!(label_only.probability_line().is_none());
    }
}

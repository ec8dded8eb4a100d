//! # Churnform
//!
//! Terminal form for telecom customer churn prediction.
//!
//! The crate collects the 19 customer attributes of the Telco churn dataset,
//! hands them to a pre-trained binary classifier and shows the predicted
//! label together with the churn probability when the model provides one.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Customer feature record and prediction types
//! - `ports`: The classifier trait the application depends on
//! - `adapters`: Concrete classifier loaded from an exported model artifact
//! - `application`: The prediction use case
//! - `config`: Environment-driven settings
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{ChurnLabel, ChurnPrediction, CustomerFeatureRecord};

/// Result type for Churnform operations
pub type Result<T> = std::result::Result<T, ChurnError>;

/// Main error type for Churnform
#[derive(Debug, thiserror::Error)]
pub enum ChurnError {
    #[error("Model could not be loaded: {0}")]
    ModelLoad(#[from] adapters::ModelLoadError),

    #[error("{0}")]
    Classifier(#[from] ports::ClassifierError),

    #[error("Invalid customer data: {0}")]
    Validation(String),
}

//! Domain layer: Core business types and logic.
//!
//! Pure Rust types describing a customer submission and the resulting
//! churn prediction. All input is validated against the fixed schema.

mod customer;
mod prediction;

pub use customer::{
    Categorical, Contract, CustomerFeatureRecord, FeatureDomain, FeatureSpec, FeatureValue,
    Gender, InternetAddon, InternetService, MultipleLines, PaymentMethod, YesNo, FEATURES,
    FEATURE_NAMES,
};
pub use prediction::{format_percent, ChurnLabel, ChurnPrediction};

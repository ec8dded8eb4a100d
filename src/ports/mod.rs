//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, the classifier trait defines the
//! boundary between the form and whatever model backs it.

mod classifier;

pub use classifier::{ChurnClassifier, ClassifierError};

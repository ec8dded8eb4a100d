//! Adapters layer: Concrete implementations of ports.
//!
//! - `logistic`: classifier backed by an exported logistic-regression
//!   pipeline (JSON artifact)

pub mod logistic;

// Re-export load error for lib.rs
pub use logistic::ModelLoadError;

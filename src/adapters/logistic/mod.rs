//! Logistic adapter: Implementation of ChurnClassifier from an exported model.
//!
//! The artifact is a JSON export of a fitted preprocessing + logistic
//! regression pipeline: numeric columns are standardized, categorical
//! columns are one-hot encoded (stored here as one weight per category).
//!
//! # Integrity
//!
//! The SHA-256 digest of the artifact is computed on load. When an expected
//! digest is configured, a mismatch refuses to load the model.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{ChurnLabel, CustomerFeatureRecord, FeatureDomain, FeatureValue, FEATURES};
use crate::ports::{ChurnClassifier, ClassifierError};

/// Artifact format understood by this adapter.
const SUPPORTED_FORMAT_VERSION: u32 = 1;

/// File names probed when the model path is a directory.
const MODEL_FILE_CANDIDATES: [&str; 2] = ["churn_model.json", "model.json"];

/// Error type for model loading.
#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("Model file '{}' not found. Please export the trained churn model first.", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid model JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid model: {0}")]
    Invalid(String),

    #[error("Model digest mismatch: expected {expected}, got {actual}")]
    DigestMismatch { expected: String, actual: String },
}

/// Standardized numeric term: `coef * (x - mean) / scale`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericTerm {
    pub name: String,
    pub mean: f64,
    pub scale: f64,
    pub coef: f64,
}

/// One-hot encoded term: one weight per category label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalTerm {
    pub name: String,
    pub coefs: BTreeMap<String, f64>,
}

fn default_threshold() -> f64 {
    0.5
}

fn default_emits_probability() -> bool {
    true
}

/// Model parameters exported by the training notebook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedChurnModel {
    pub format_version: u32,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// `false` for models that only expose `predict`
    #[serde(default = "default_emits_probability")]
    pub emits_probability: bool,
    pub intercept: f64,
    #[serde(default)]
    pub numeric: Vec<NumericTerm>,
    #[serde(default)]
    pub categorical: Vec<CategoricalTerm>,
}

impl ExportedChurnModel {
    /// Check the artifact against the input schema.
    fn validate(&self) -> Result<(), ModelLoadError> {
        let invalid = |msg: String| Err(ModelLoadError::Invalid(msg));

        if self.format_version != SUPPORTED_FORMAT_VERSION {
            return invalid(format!(
                "Unsupported format_version {} (expected {SUPPORTED_FORMAT_VERSION})",
                self.format_version
            ));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return invalid(format!("threshold {} outside [0, 1]", self.threshold));
        }
        if !self.intercept.is_finite() {
            return invalid("intercept must be finite".into());
        }
        if self.numeric.is_empty() && self.categorical.is_empty() {
            return invalid("model has no terms".into());
        }

        let mut seen: Vec<&str> = Vec::new();
        let mut claim = |name: &str| -> Result<FeatureDomain, ModelLoadError> {
            let spec = FEATURES
                .iter()
                .find(|f| f.name == name)
                .ok_or_else(|| ModelLoadError::Invalid(format!("unknown feature {name:?}")))?;
            if seen.contains(&spec.name) {
                return Err(ModelLoadError::Invalid(format!(
                    "feature {name:?} is used more than once"
                )));
            }
            seen.push(spec.name);
            Ok(spec.domain)
        };

        for term in &self.numeric {
            let domain = claim(&term.name)?;
            if !domain.is_numeric() {
                return invalid(format!("feature {:?} is not numeric", term.name));
            }
            if !(term.scale.is_finite() && term.scale > 0.0) {
                return invalid(format!("scale of {:?} must be > 0", term.name));
            }
            if !(term.mean.is_finite() && term.coef.is_finite()) {
                return invalid(format!("parameters of {:?} must be finite", term.name));
            }
        }

        for term in &self.categorical {
            let domain = claim(&term.name)?;
            let allowed: &[&str] = match domain {
                FeatureDomain::Choice(labels) => labels,
                FeatureDomain::Flag => &["0", "1"],
                _ => {
                    return invalid(format!(
                        "feature {:?} cannot be one-hot encoded",
                        term.name
                    ))
                }
            };
            for (category, coef) in &term.coefs {
                if !allowed.contains(&category.as_str()) {
                    return invalid(format!(
                        "category {category:?} is not valid for {:?}",
                        term.name
                    ));
                }
                if !coef.is_finite() {
                    return invalid(format!("weight of {:?} must be finite", term.name));
                }
            }
        }

        Ok(())
    }
}

fn sha256_hex_bytes(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

// Constant-time compare for ASCII strings (used for SHA-256 hex digests).
fn constant_time_eq_str(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for (x, y) in a.as_bytes().iter().zip(b.as_bytes().iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Resolve the artifact file from a file or directory path.
fn resolve_model_file(path: &Path) -> Result<PathBuf, ModelLoadError> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }
    if path.is_dir() {
        return MODEL_FILE_CANDIDATES
            .iter()
            .map(|name| path.join(name))
            .find(|p| p.is_file())
            .ok_or_else(|| ModelLoadError::NotFound(path.join(MODEL_FILE_CANDIDATES[0])));
    }
    Err(ModelLoadError::NotFound(path.to_path_buf()))
}

/// Churn classifier backed by an exported logistic-regression pipeline.
#[derive(Debug, Clone)]
pub struct LogisticModel {
    model: ExportedChurnModel,
    source: PathBuf,
    digest: String,
}

impl LogisticModel {
    /// Load a model artifact from a file, or a directory containing
    /// `churn_model.json` / `model.json`.
    ///
    /// # Errors
    /// Returns `ModelLoadError::NotFound` if no artifact exists at `path`,
    /// or another variant if it cannot be read or is malformed.
    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        Self::load_verified(path, None)
    }

    /// Load a model artifact and check its SHA-256 digest.
    ///
    /// # Errors
    /// Same as [`LogisticModel::load`], plus `DigestMismatch`.
    pub fn load_verified(
        path: &Path,
        expected_sha256: Option<&str>,
    ) -> Result<Self, ModelLoadError> {
        let model_path = resolve_model_file(path)?;
        let bytes = fs::read(&model_path)?;
        let digest = sha256_hex_bytes(&bytes);

        if let Some(expected) = expected_sha256 {
            let expected = expected.trim().to_ascii_lowercase();
            if !constant_time_eq_str(&expected, &digest) {
                tracing::error!("Model digest mismatch for {:?}", model_path);
                return Err(ModelLoadError::DigestMismatch {
                    expected,
                    actual: digest,
                });
            }
        }

        let model: ExportedChurnModel = serde_json::from_slice(&bytes)?;
        let mut loaded = Self::from_artifact(model)?;
        loaded.source = model_path;
        loaded.digest = digest;

        tracing::info!(
            "Loaded model from {:?} (numeric_terms={}, categorical_terms={}, probability={})",
            loaded.source,
            loaded.model.numeric.len(),
            loaded.model.categorical.len(),
            loaded.model.emits_probability
        );

        Ok(loaded)
    }

    /// Build a classifier from in-memory parameters.
    ///
    /// # Errors
    /// Returns `ModelLoadError::Invalid` if the parameters do not fit the schema.
    pub fn from_artifact(model: ExportedChurnModel) -> Result<Self, ModelLoadError> {
        model.validate()?;
        Ok(Self {
            model,
            source: PathBuf::new(),
            digest: String::new(),
        })
    }

    /// Path of the loaded artifact (empty for in-memory models).
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Hex SHA-256 of the loaded artifact (empty for in-memory models).
    #[must_use]
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Probability of churn for one record.
    fn churn_probability(&self, record: &CustomerFeatureRecord) -> Result<f64, ClassifierError> {
        let mut z = self.model.intercept;

        let missing =
            |name: &str| ClassifierError::Inference(format!("no value for column {name}"));

        for term in &self.model.numeric {
            let x = record
                .value(&term.name)
                .and_then(|v| v.as_f64())
                .ok_or_else(|| missing(&term.name))?;
            z += term.coef * (x - term.mean) / term.scale;
        }

        for term in &self.model.categorical {
            let category = match record.value(&term.name) {
                Some(FeatureValue::Text(s)) => s,
                Some(other) => other.to_string(),
                None => return Err(missing(&term.name)),
            };
            let weight = term.coefs.get(&category).ok_or_else(|| {
                ClassifierError::UnknownCategory {
                    feature: term.name.clone(),
                    value: category.clone(),
                }
            })?;
            z += weight;
        }

        if !z.is_finite() {
            return Err(ClassifierError::Inference(format!(
                "decision function is not finite ({z})"
            )));
        }

        let probability = sigmoid(z);
        tracing::debug!("Decision function={:.4}, probability={:.4}", z, probability);
        Ok(probability)
    }
}

impl ChurnClassifier for LogisticModel {
    fn predict(&self, record: &CustomerFeatureRecord) -> Result<ChurnLabel, ClassifierError> {
        let probability = self.churn_probability(record)?;
        Ok(if probability >= self.model.threshold {
            ChurnLabel::Yes
        } else {
            ChurnLabel::No
        })
    }

    fn predict_probability(
        &self,
        record: &CustomerFeatureRecord,
    ) -> Result<Option<[f64; 2]>, ClassifierError> {
        if !self.model.emits_probability {
            return Ok(None);
        }
        let p_yes = self.churn_probability(record)?;
        Ok(Some([1.0 - p_yes, p_yes]))
    }
}

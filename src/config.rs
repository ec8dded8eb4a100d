//! Runtime configuration read from the environment.

use std::path::PathBuf;

const MODEL_PATH_ENV: &str = "CHURNFORM_MODEL_PATH";
const MODEL_SHA256_ENV: &str = "CHURNFORM_MODEL_SHA256";
const LOG_MODE_ENV: &str = "CHURNFORM_LOG_MODE";
const LOG_FILE_ENV: &str = "CHURNFORM_LOG_FILE";

const DEFAULT_MODEL_PATH: &str = "models";
const DEFAULT_LOG_FILE: &str = "churnform.log";

/// Where log output goes.
///
/// Writing logs to the terminal corrupts the TUI (alternate screen), so
/// `Auto` picks a file when stdout is interactive and stdout otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Resolve to "log to file?" given whether stdout is a terminal.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

/// Application settings, collected once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Model artifact file, or a directory containing one
    pub model_path: PathBuf,
    /// Expected hex SHA-256 of the artifact
    pub model_sha256: Option<String>,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            model_sha256: None,
            log_mode: LogMode::Auto,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    /// Read settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            model_path: non_empty(MODEL_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            model_sha256: non_empty(MODEL_SHA256_ENV),
            log_mode: non_empty(LOG_MODE_ENV)
                .map(|v| LogMode::parse(&v))
                .unwrap_or(defaults.log_mode),
            log_file: non_empty(LOG_FILE_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.model_path, PathBuf::from("models"));
        assert!(config.model_sha256.is_none());
        assert_eq!(config.log_mode, LogMode::Auto);
        assert_eq!(config.log_file, PathBuf::from("churnform.log"));
    }

    #[test]
    fn test_overrides_from_lookup() {
        let env: HashMap<&str, &str> = [
            ("CHURNFORM_MODEL_PATH", "/srv/best_churn_model.json"),
            ("CHURNFORM_MODEL_SHA256", "abc123"),
            ("CHURNFORM_LOG_MODE", "STDOUT"),
            ("CHURNFORM_LOG_FILE", "  "),
        ]
        .into_iter()
        .collect();

        let config = AppConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.model_path, PathBuf::from("/srv/best_churn_model.json"));
        assert_eq!(config.model_sha256.as_deref(), Some("abc123"));
        assert_eq!(config.log_mode, LogMode::Stdout);
        // Blank values fall back to defaults.
        assert_eq!(config.log_file, PathBuf::from("churnform.log"));
    }

    #[test]
    fn test_log_mode_resolution() {
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
        assert!(!LogMode::Stdout.use_file(true));
        assert_eq!(LogMode::parse("bogus"), LogMode::Auto);
    }
}

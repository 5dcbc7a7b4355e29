//! Evaluator configuration.
//!
//! Layered in this order: built-in defaults, then an optional YAML file,
//! then `BKUP_*` environment variables. Call [`EvaluatorConfig::validate`]
//! once all layers are applied.

use std::path::Path;

use serde::{Deserialize, Serialize};

use bkup_core::ValidationError;

use crate::messages::Locale;
use crate::rules::RulePolicy;

/// Configuration for a [`ComplianceEvaluator`](crate::ComplianceEvaluator).
///
/// ```yaml
/// policy:
///   min_copies: 3
///   min_media_types: 2
///   warning_threshold: 3
/// locale: ja
/// alerts: true
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluatorConfig {
    pub policy: RulePolicy,
    pub locale: Locale,
    /// Raise alerts for violations when an alert sink is attached.
    pub alerts: bool,
}

impl EvaluatorConfig {
    /// Parse a YAML document. Missing keys keep their defaults.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as a map.
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source).map_err(|e| ConfigError::Yaml(e.to_string()))
    }

    /// Read and parse a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_yaml_str(&source)
    }

    /// Apply overrides from the process environment.
    ///
    /// Variables:
    /// - `BKUP_MIN_COPIES`
    /// - `BKUP_MIN_MEDIA_TYPES`
    /// - `BKUP_WARNING_THRESHOLD`
    /// - `BKUP_LOCALE` (`ja` or `en`)
    /// - `BKUP_ALERTS` (`true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`)
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_env_from(|var| std::env::var(var).ok())
    }

    /// Apply overrides read through `lookup` instead of the process
    /// environment.
    pub fn apply_env_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("BKUP_MIN_COPIES") {
            self.policy.min_copies = parse_count("BKUP_MIN_COPIES", &raw)?;
        }
        if let Some(raw) = lookup("BKUP_MIN_MEDIA_TYPES") {
            self.policy.min_media_types = parse_count("BKUP_MIN_MEDIA_TYPES", &raw)?;
        }
        if let Some(raw) = lookup("BKUP_WARNING_THRESHOLD") {
            self.policy.warning_threshold = parse_count("BKUP_WARNING_THRESHOLD", &raw)?;
        }
        if let Some(raw) = lookup("BKUP_LOCALE") {
            self.locale = raw.parse().map_err(|reason| ConfigError::InvalidEnv {
                var: "BKUP_LOCALE",
                value: raw.clone(),
                reason,
            })?;
        }
        if let Some(raw) = lookup("BKUP_ALERTS") {
            self.alerts = parse_flag("BKUP_ALERTS", &raw)?;
        }
        Ok(self)
    }

    /// Check the policy thresholds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.policy.validate().map_err(ConfigError::Policy)
    }
}

fn parse_count(var: &'static str, raw: &str) -> Result<usize, ConfigError> {
    raw.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError::InvalidEnv {
        var,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn parse_flag(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            var,
            value: raw.to_string(),
            reason: "expected a boolean".into(),
        }),
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: \"{value}\" ({reason})")]
    InvalidEnv {
        var: &'static str,
        value: String,
        reason: String,
    },
    #[error("invalid configuration YAML: {0}")]
    Yaml(String),
    #[error("cannot read configuration file {path}: {reason}")]
    Io { path: String, reason: String },
    #[error(transparent)]
    Policy(ValidationError),
}

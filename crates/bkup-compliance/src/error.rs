//! # Compliance Errors
//!
//! Only strict validation returns errors; every other evaluator operation
//! degrades to an `unknown` verdict instead. [`ErrorReport`] is the
//! serializable form handed to callers that log or display errors as data.

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use bkup_core::JobId;

use crate::config::ConfigError;
use crate::rules::RuleChecks;

/// Errors from strict validation and evaluator setup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComplianceError {
    /// The job id did not resolve to a job.
    #[error("backup job {0} not found")]
    JobNotFound(JobId),

    /// The job fails at least one rule.
    #[error("3-2-1-1-0 rule violation for job {job_id}: {}", issues.join(", "))]
    RuleViolation {
        job_id: JobId,
        checks: RuleChecks,
        /// Issue text of each failing rule, in rule order.
        issues: Vec<String>,
    },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ComplianceError {
    /// Stable machine-readable name of the error kind.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::JobNotFound(_) => "job_not_found",
            Self::RuleViolation { .. } => "compliance_violation",
            Self::Config(_) => "configuration_error",
        }
    }

    /// Serializable description of the error.
    pub fn report(&self) -> ErrorReport {
        let details = match self {
            Self::JobNotFound(job_id) => json!({ "job_id": job_id }),
            Self::RuleViolation {
                job_id,
                checks,
                issues,
            } => json!({
                "job_id": job_id,
                "checks": checks,
                "issues": issues,
            }),
            Self::Config(_) => json!({}),
        };
        ErrorReport {
            error_type: self.error_type().to_string(),
            message: self.to_string(),
            details,
        }
    }
}

/// Serializable error description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub error_type: String,
    pub message: String,
    pub details: serde_json::Value,
}

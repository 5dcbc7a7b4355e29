//! # Compliance Verdicts
//!
//! [`ComplianceVerdict`] is the value produced by every evaluation. It is
//! recomputed from the copy set each time and carries no wall-clock field,
//! so two evaluations over unchanged data compare equal.
//!
//! The persisted form is [`ComplianceSnapshot`], which adds the check time.
//! [`BatchResult`] and [`ComplianceSummary`] aggregate verdicts across jobs.

use std::fmt;

use serde::{Deserialize, Serialize};

use bkup_core::{BackupCopy, JobId, Timestamp};

use crate::messages::{issue_text, recommendation_text, Locale};
use crate::rules::{run_checks, RuleChecks, RulePolicy};

// ---------------------------------------------------------------------------
// ComplianceStatus
// ---------------------------------------------------------------------------

/// Overall status of a job against the 3-2-1-1-0 rule.
///
/// Statuses form a chain for pessimistic aggregation across jobs:
///
/// ```text
/// Ordering (worst → best): NonCompliant < Unknown < Warning < Compliant
/// ```
///
/// `meet` picks the worse of two statuses, so a single non-compliant job
/// makes a fleet non-compliant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    /// All five rules pass.
    Compliant,
    /// Enough rules pass to triage the job below outright failures.
    Warning,
    /// Fewer rules pass than the warning threshold.
    NonCompliant,
    /// The job id did not resolve to a job.
    Unknown,
}

impl ComplianceStatus {
    fn ordering(self) -> u8 {
        match self {
            Self::NonCompliant => 0,
            Self::Unknown => 1,
            Self::Warning => 2,
            Self::Compliant => 3,
        }
    }

    /// Classify a job from its rule checks.
    pub fn from_checks(checks: &RuleChecks, policy: &RulePolicy) -> Self {
        if checks.all_pass() {
            Self::Compliant
        } else if checks.passed_count() >= policy.warning_threshold {
            Self::Warning
        } else {
            Self::NonCompliant
        }
    }

    /// The worse of two statuses.
    pub fn meet(self, other: Self) -> Self {
        if self.ordering() <= other.ordering() {
            self
        } else {
            other
        }
    }

    /// The persisted string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compliant => "compliant",
            Self::Warning => "warning",
            Self::NonCompliant => "non_compliant",
            Self::Unknown => "unknown",
        }
    }
}

impl PartialOrd for ComplianceStatus {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ComplianceStatus {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.ordering().cmp(&other.ordering())
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ComplianceVerdict
// ---------------------------------------------------------------------------

/// Supporting facts behind a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VerdictDetails {
    pub total_copies: usize,
    /// Distinct media types, sorted.
    pub media_types: Vec<String>,
    /// Distinct copy types, sorted.
    pub copy_types: Vec<String>,
    pub failed_copies: usize,
}

/// Result of checking one job against the 3-2-1-1-0 rule.
///
/// Invariants:
/// - `compliant` iff every entry of `checks` passes.
/// - `status == Unknown` iff the job id did not resolve.
/// - `issues` and `recommendations` are 1:1 and follow rule order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceVerdict {
    pub job_id: JobId,
    pub compliant: bool,
    pub copies_count: usize,
    pub media_types_count: usize,
    pub has_offsite: bool,
    pub has_offline: bool,
    pub zero_errors: bool,
    /// Fraction of passing rules, in [0, 1].
    pub score: f64,
    pub status: ComplianceStatus,
    pub checks: RuleChecks,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
    pub details: VerdictDetails,
}

impl ComplianceVerdict {
    /// Evaluate a copy set.
    ///
    /// Pure: the result depends only on the arguments.
    pub fn assess(
        job_id: JobId,
        copies: &[BackupCopy],
        policy: &RulePolicy,
        locale: Locale,
    ) -> Self {
        let (checks, stats) = run_checks(copies, policy);
        let issues = checks
            .failing()
            .map(|rule| issue_text(rule, policy, locale))
            .collect();
        let recommendations = checks
            .failing()
            .map(|rule| recommendation_text(rule, policy, locale))
            .collect();

        Self {
            job_id,
            compliant: checks.all_pass(),
            copies_count: stats.total_copies,
            media_types_count: stats.media_types.len(),
            has_offsite: checks.offsite_copy,
            has_offline: checks.offline_copy,
            zero_errors: checks.zero_errors,
            score: checks.score(),
            status: ComplianceStatus::from_checks(&checks, policy),
            checks,
            issues,
            recommendations,
            details: VerdictDetails {
                total_copies: stats.total_copies,
                media_types: stats.media_types.into_iter().collect(),
                copy_types: stats.copy_types.into_iter().collect(),
                failed_copies: stats.failed_copies,
            },
        }
    }

    /// The degraded verdict for a job id that does not resolve.
    ///
    /// Every check reads as failing, counts are zero and the score is 0.0.
    /// Issues and recommendations are empty; callers wanting guidance for an
    /// unknown job use the evaluator's `recommendations()`.
    pub fn unknown(job_id: JobId) -> Self {
        Self {
            job_id,
            compliant: false,
            copies_count: 0,
            media_types_count: 0,
            has_offsite: false,
            has_offline: false,
            zero_errors: false,
            score: 0.0,
            status: ComplianceStatus::Unknown,
            checks: RuleChecks {
                min_copies: false,
                different_media: false,
                offsite_copy: false,
                offline_copy: false,
                zero_errors: false,
            },
            issues: Vec::new(),
            recommendations: Vec::new(),
            details: VerdictDetails::default(),
        }
    }

    /// Whether the job id resolved to a job.
    pub fn is_known(&self) -> bool {
        self.status != ComplianceStatus::Unknown
    }
}

// ---------------------------------------------------------------------------
// ComplianceSnapshot
// ---------------------------------------------------------------------------

/// The stored form of a job's latest verdict. One per job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceSnapshot {
    pub job_id: JobId,
    pub checked_at: Timestamp,
    pub overall_status: ComplianceStatus,
    #[serde(flatten)]
    pub checks: RuleChecks,
    pub copies_count: usize,
    pub media_types_count: usize,
    pub score: f64,
    #[serde(default)]
    pub issues: Vec<String>,
}

impl ComplianceSnapshot {
    /// Capture a verdict at the given check time.
    pub fn from_verdict(verdict: &ComplianceVerdict, checked_at: Timestamp) -> Self {
        Self {
            job_id: verdict.job_id,
            checked_at,
            overall_status: verdict.status,
            checks: verdict.checks,
            copies_count: verdict.copies_count,
            media_types_count: verdict.media_types_count,
            score: verdict.score,
            issues: verdict.issues.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Result of evaluating an explicit list of jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub total_jobs: usize,
    pub compliant_jobs: usize,
    /// One verdict per requested id, in request order.
    pub results: Vec<ComplianceVerdict>,
}

impl BatchResult {
    /// Aggregate a list of verdicts.
    pub fn from_results(results: Vec<ComplianceVerdict>) -> Self {
        Self {
            total_jobs: results.len(),
            compliant_jobs: results.iter().filter(|v| v.compliant).count(),
            results,
        }
    }
}

/// Fleet-wide summary over every active job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub total_jobs: usize,
    pub compliant_jobs: usize,
    pub warning_jobs: usize,
    pub non_compliant_jobs: usize,
    /// Worst status across jobs; `Unknown` when there are no jobs.
    pub overall_status: ComplianceStatus,
    /// Mean score across jobs; 0.0 when there are no jobs.
    pub score: f64,
    pub results: Vec<ComplianceVerdict>,
}

impl ComplianceSummary {
    /// Summarise a list of verdicts.
    pub fn from_results(results: Vec<ComplianceVerdict>) -> Self {
        let count_status =
            |status: ComplianceStatus| results.iter().filter(|v| v.status == status).count();

        let overall_status = if results.is_empty() {
            ComplianceStatus::Unknown
        } else {
            results
                .iter()
                .map(|v| v.status)
                .fold(ComplianceStatus::Compliant, ComplianceStatus::meet)
        };
        let score = if results.is_empty() {
            0.0
        } else {
            results.iter().map(|v| v.score).sum::<f64>() / results.len() as f64
        };

        Self {
            total_jobs: results.len(),
            compliant_jobs: count_status(ComplianceStatus::Compliant),
            warning_jobs: count_status(ComplianceStatus::Warning),
            non_compliant_jobs: count_status(ComplianceStatus::NonCompliant),
            overall_status,
            score,
            results,
        }
    }
}

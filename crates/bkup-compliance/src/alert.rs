//! # Violation Alerts
//!
//! A [`ComplianceAlert`] is raised when an evaluation finds a known job out
//! of compliance. Severity follows the verdict status: `warning` jobs raise
//! warning alerts, `non_compliant` jobs raise error alerts.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bkup_core::{BackupJob, JobId, Timestamp};

use crate::verdict::{ComplianceStatus, ComplianceVerdict};

/// Category of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// A 3-2-1-1-0 rule violation.
    Compliance,
}

impl AlertType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compliance => "compliance",
        }
    }
}

/// Alert severity, ascending.
///
/// Rule violations only raise `Warning` and `Error`. `Info` and `Critical`
/// complete the vocabulary shared with alert records from other sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }

    /// Severity for a verdict status, or `None` when no alert is due.
    pub fn for_status(status: ComplianceStatus) -> Option<Self> {
        match status {
            ComplianceStatus::Warning => Some(Self::Warning),
            ComplianceStatus::NonCompliant => Some(Self::Error),
            ComplianceStatus::Compliant | ComplianceStatus::Unknown => None,
        }
    }
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raised alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceAlert {
    pub id: Uuid,
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub job_id: JobId,
    pub title: String,
    pub message: String,
    pub issues: Vec<String>,
    pub created_at: Timestamp,
    #[serde(default)]
    pub acknowledged: bool,
}

impl ComplianceAlert {
    /// Build the alert for a verdict, if its status calls for one.
    ///
    /// Compliant and unknown verdicts yield `None`.
    pub fn for_verdict(job: &BackupJob, verdict: &ComplianceVerdict) -> Option<Self> {
        let severity = AlertSeverity::for_status(verdict.status)?;
        Some(Self {
            id: Uuid::new_v4(),
            alert_type: AlertType::Compliance,
            severity,
            job_id: job.id,
            title: format!("3-2-1-1-0 rule violation: {}", job.name),
            message: verdict.issues.join(", "),
            issues: verdict.issues.clone(),
            created_at: Timestamp::now(),
            acknowledged: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Locale;
    use crate::rules::RulePolicy;
    use bkup_core::BackupCopy;

    fn verdict_for(copies: &[BackupCopy]) -> ComplianceVerdict {
        ComplianceVerdict::assess(JobId(5), copies, &RulePolicy::default(), Locale::Ja)
    }

    #[test]
    fn non_compliant_verdict_raises_error_alert() {
        let job = BackupJob::new(JobId(5), "file-server");
        let alert = ComplianceAlert::for_verdict(&job, &verdict_for(&[])).unwrap();
        assert_eq!(alert.severity, AlertSeverity::Error);
        assert_eq!(alert.alert_type, AlertType::Compliance);
        assert_eq!(alert.job_id, JobId(5));
        assert!(alert.title.contains("file-server"));
        assert_eq!(alert.issues.len(), 4);
        assert!(alert.message.starts_with("最低3コピー未満, "));
        assert!(!alert.acknowledged);
    }

    #[test]
    fn warning_verdict_raises_warning_alert() {
        let job = BackupJob::new(JobId(5), "db");
        let verdict = verdict_for(&[
            BackupCopy::new(JobId(5), "primary", "disk", "success"),
            BackupCopy::new(JobId(5), "offsite", "cloud", "failed"),
            BackupCopy::new(JobId(5), "offline", "tape", "success"),
        ]);
        let alert = ComplianceAlert::for_verdict(&job, &verdict).unwrap();
        assert_eq!(alert.severity, AlertSeverity::Warning);
        assert_eq!(alert.message, "検証エラーあり");
    }

    #[test]
    fn compliant_and_unknown_verdicts_raise_nothing() {
        let job = BackupJob::new(JobId(5), "db");
        let compliant = verdict_for(&[
            BackupCopy::new(JobId(5), "primary", "disk", "success"),
            BackupCopy::new(JobId(5), "offsite", "cloud", "success"),
            BackupCopy::new(JobId(5), "offline", "tape", "success"),
        ]);
        assert!(ComplianceAlert::for_verdict(&job, &compliant).is_none());
        assert!(ComplianceAlert::for_verdict(&job, &ComplianceVerdict::unknown(JobId(5))).is_none());
    }

    #[test]
    fn alert_ids_are_unique() {
        let job = BackupJob::new(JobId(5), "db");
        let verdict = verdict_for(&[]);
        let a = ComplianceAlert::for_verdict(&job, &verdict).unwrap();
        let b = ComplianceAlert::for_verdict(&job, &verdict).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn severity_ordering_and_strings() {
        assert!(AlertSeverity::Info < AlertSeverity::Critical);
        assert_eq!(
            serde_json::to_string(&AlertSeverity::Error).unwrap(),
            "\"error\""
        );
        assert_eq!(AlertType::Compliance.as_str(), "compliance");
    }

    #[test]
    fn stored_info_and_critical_severities_decode() {
        let decoded: Vec<AlertSeverity> =
            serde_json::from_str(r#"["info", "critical"]"#).unwrap();
        assert_eq!(decoded, vec![AlertSeverity::Info, AlertSeverity::Critical]);
        assert_eq!(AlertSeverity::Critical.as_str(), "critical");
    }
}

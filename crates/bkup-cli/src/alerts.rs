//! Alert sink that writes alerts to the log.

use bkup_compliance::{AlertSeverity, AlertSink, ComplianceAlert};
use bkup_core::StoreError;

/// Emits each alert as a `tracing` event.
///
/// Error and critical alerts log at `error`; the rest at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAlertSink;

impl AlertSink for TracingAlertSink {
    fn raise(&self, alert: ComplianceAlert) -> Result<(), StoreError> {
        match alert.severity {
            AlertSeverity::Error | AlertSeverity::Critical => tracing::error!(
                alert_id = %alert.id,
                job_id = %alert.job_id,
                severity = %alert.severity,
                issues = %alert.message,
                "{}",
                alert.title
            ),
            AlertSeverity::Info | AlertSeverity::Warning => tracing::warn!(
                alert_id = %alert.id,
                job_id = %alert.job_id,
                severity = %alert.severity,
                issues = %alert.message,
                "{}",
                alert.title
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bkup_compliance::{ComplianceVerdict, Locale, RulePolicy};
    use bkup_core::{BackupJob, JobId};

    #[test]
    fn raising_never_fails() {
        let job = BackupJob::new(JobId(1), "web");
        let verdict = ComplianceVerdict::assess(JobId(1), &[], &RulePolicy::default(), Locale::En);
        let alert = ComplianceAlert::for_verdict(&job, &verdict).unwrap();
        assert!(TracingAlertSink.raise(alert).is_ok());
    }
}

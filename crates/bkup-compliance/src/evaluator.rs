//! # Compliance Evaluator
//!
//! [`ComplianceEvaluator`] ties the rule checks to the collaborators: it
//! reads a job's copies from a [`CopyStore`], builds a
//! [`ComplianceVerdict`], stores it through a [`StatusSink`] and, when an
//! [`AlertSink`] is attached, raises an alert for every violation.
//!
//! ## Operations
//!
//! | Operation          | Persists | Alerts | Errors                   |
//! |--------------------|----------|--------|--------------------------|
//! | `evaluate`         | yes      | yes    | never                    |
//! | `batch_evaluate`   | yes      | yes    | never                    |
//! | `check_all`        | yes      | yes    | never                    |
//! | `validate`         | yes      | yes    | not found, rule violated |
//! | `score`            | no       | no     | never                    |
//! | `recommendations`  | no       | no     | never                    |
//!
//! Unknown job ids are never persisted and never alert.
//!
//! Sink failures are logged at `warn` and do not change the returned
//! verdict. The evaluator holds no locks of its own, so any number of
//! threads may share one instance.

use bkup_core::{BackupJob, JobId};

use crate::alert::ComplianceAlert;
use crate::config::EvaluatorConfig;
use crate::error::ComplianceError;
use crate::messages::{generic_guidance, Locale};
use crate::ports::{AlertSink, CopyStore, StatusSink};
use crate::rules::RulePolicy;
use crate::verdict::{BatchResult, ComplianceSummary, ComplianceVerdict};

/// Checks backup jobs against the 3-2-1-1-0 rule.
pub struct ComplianceEvaluator<S, K> {
    store: S,
    sink: K,
    policy: RulePolicy,
    locale: Locale,
    alerts: Option<Box<dyn AlertSink>>,
}

impl<S: std::fmt::Debug, K: std::fmt::Debug> std::fmt::Debug for ComplianceEvaluator<S, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComplianceEvaluator")
            .field("store", &self.store)
            .field("sink", &self.sink)
            .field("policy", &self.policy)
            .field("locale", &self.locale)
            .field("alerts", &self.alerts.is_some())
            .finish()
    }
}

impl<S: CopyStore, K: StatusSink> ComplianceEvaluator<S, K> {
    /// Create an evaluator with the default policy and Japanese texts.
    pub fn new(store: S, sink: K) -> Self {
        Self {
            store,
            sink,
            policy: RulePolicy::default(),
            locale: Locale::default(),
            alerts: None,
        }
    }

    /// Create an evaluator from a validated configuration.
    ///
    /// `config.alerts` is not acted on here: alerts need a sink, which the
    /// caller attaches with [`with_alerts`](Self::with_alerts).
    pub fn from_config(
        store: S,
        sink: K,
        config: &EvaluatorConfig,
    ) -> Result<Self, ComplianceError> {
        config.validate()?;
        Ok(Self::new(store, sink)
            .with_policy(config.policy)
            .with_locale(config.locale))
    }

    /// Replace the rule thresholds.
    pub fn with_policy(mut self, policy: RulePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the language of issue and recommendation texts.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Attach a sink that receives an alert for every violation.
    pub fn with_alerts(mut self, alerts: Box<dyn AlertSink>) -> Self {
        self.alerts = Some(alerts);
        self
    }

    /// Thresholds applied by the rule checks.
    pub fn policy(&self) -> &RulePolicy {
        &self.policy
    }

    /// Language of issue and recommendation texts.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// The job and copy store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The verdict sink.
    pub fn sink(&self) -> &K {
        &self.sink
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Evaluate one job, store the verdict and raise an alert if needed.
    ///
    /// An unknown job id yields [`ComplianceVerdict::unknown`].
    pub fn evaluate(&self, job_id: JobId) -> ComplianceVerdict {
        match self.assess_job(job_id) {
            Some((job, verdict)) => {
                self.record(&job, &verdict);
                verdict
            }
            None => ComplianceVerdict::unknown(job_id),
        }
    }

    /// The compliance score of one job, in [0, 1]. `0.0` for unknown jobs.
    pub fn score(&self, job_id: JobId) -> f64 {
        self.assess_job(job_id)
            .map_or(0.0, |(_, verdict)| verdict.score)
    }

    /// Evaluate each job in order.
    ///
    /// `results[i]` equals `evaluate(job_ids[i])`; duplicate ids are
    /// evaluated once per occurrence.
    pub fn batch_evaluate(&self, job_ids: &[JobId]) -> BatchResult {
        let results: Vec<ComplianceVerdict> =
            job_ids.iter().map(|&job_id| self.evaluate(job_id)).collect();
        let batch = BatchResult::from_results(results);
        tracing::info!(
            total_jobs = batch.total_jobs,
            compliant_jobs = batch.compliant_jobs,
            "batch evaluation complete"
        );
        batch
    }

    /// Remediation steps for a job.
    ///
    /// Known jobs get one recommendation per failing rule (empty when
    /// compliant). Unknown jobs get generic guidance.
    pub fn recommendations(&self, job_id: JobId) -> Vec<String> {
        match self.assess_job(job_id) {
            Some((_, verdict)) => verdict.recommendations,
            None => generic_guidance(self.locale),
        }
    }

    /// Evaluate a job and fail unless it is fully compliant.
    ///
    /// The verdict is stored (and alerted on) before a violation is
    /// returned.
    pub fn validate(&self, job_id: JobId) -> Result<ComplianceVerdict, ComplianceError> {
        let (job, verdict) = self
            .assess_job(job_id)
            .ok_or(ComplianceError::JobNotFound(job_id))?;
        self.record(&job, &verdict);
        if verdict.compliant {
            Ok(verdict)
        } else {
            Err(ComplianceError::RuleViolation {
                job_id,
                checks: verdict.checks,
                issues: verdict.issues,
            })
        }
    }

    /// Evaluate every active job in ascending id order.
    pub fn check_all(&self) -> ComplianceSummary {
        let mut jobs: Vec<BackupJob> = self
            .store
            .list_jobs()
            .into_iter()
            .filter(|job| job.active)
            .collect();
        jobs.sort_by_key(|job| job.id);

        let results = jobs
            .iter()
            .map(|job| {
                let verdict = self.assess(job);
                self.record(job, &verdict);
                verdict
            })
            .collect();
        let summary = ComplianceSummary::from_results(results);
        tracing::info!(
            total_jobs = summary.total_jobs,
            compliant_jobs = summary.compliant_jobs,
            warning_jobs = summary.warning_jobs,
            non_compliant_jobs = summary.non_compliant_jobs,
            overall_status = %summary.overall_status,
            "compliance check of all active jobs complete"
        );
        summary
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Resolve and assess a job without side effects.
    fn assess_job(&self, job_id: JobId) -> Option<(BackupJob, ComplianceVerdict)> {
        let Some(job) = self.store.get_job(job_id) else {
            tracing::debug!(job_id = %job_id, "backup job not found");
            return None;
        };
        let verdict = self.assess(&job);
        Some((job, verdict))
    }

    fn assess(&self, job: &BackupJob) -> ComplianceVerdict {
        let copies = self.store.get_copies(job.id);
        let verdict = ComplianceVerdict::assess(job.id, &copies, &self.policy, self.locale);
        tracing::debug!(
            job_id = %job.id,
            status = %verdict.status,
            score = verdict.score,
            copies = verdict.copies_count,
            "evaluated backup job"
        );
        verdict
    }

    /// Store the verdict and raise an alert for a violation.
    fn record(&self, job: &BackupJob, verdict: &ComplianceVerdict) {
        if let Err(e) = self.sink.upsert_verdict(job.id, verdict) {
            tracing::warn!(job_id = %job.id, error = %e, "failed to store compliance verdict");
        }

        let Some(alerts) = &self.alerts else {
            return;
        };
        let Some(alert) = ComplianceAlert::for_verdict(job, verdict) else {
            return;
        };
        tracing::warn!(
            job_id = %job.id,
            severity = %alert.severity,
            issues = %alert.message,
            "3-2-1-1-0 rule violation"
        );
        if let Err(e) = alerts.raise(alert) {
            tracing::warn!(job_id = %job.id, error = %e, "failed to raise compliance alert");
        }
    }
}

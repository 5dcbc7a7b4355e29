//! # Collaborator Traits
//!
//! The evaluator reads jobs and copies through [`CopyStore`] and writes
//! results through [`StatusSink`] and [`AlertSink`]. Implementations are
//! injected at construction; `bkup-store` provides in-memory and
//! file-backed ones.
//!
//! Reads are infallible from the evaluator's point of view: a store that
//! cannot answer reports the job as absent. Writes return [`StoreError`] so
//! the evaluator can log the failure and carry on.

use std::sync::Arc;

use bkup_core::{BackupCopy, BackupJob, JobId, StoreError};

use crate::alert::ComplianceAlert;
use crate::verdict::ComplianceVerdict;

/// Read access to jobs and their copy history.
pub trait CopyStore: Send + Sync {
    /// Look up a job by id.
    fn get_job(&self, job_id: JobId) -> Option<BackupJob>;

    /// Every copy recorded for a job, failed ones included.
    ///
    /// Returns an empty list for a job with no copies or an unknown id.
    fn get_copies(&self, job_id: JobId) -> Vec<BackupCopy>;

    /// All jobs, in ascending id order.
    fn list_jobs(&self) -> Vec<BackupJob>;
}

/// Destination for the latest verdict per job.
pub trait StatusSink: Send + Sync {
    /// Insert or overwrite the stored verdict for `job_id`.
    fn upsert_verdict(&self, job_id: JobId, verdict: &ComplianceVerdict)
        -> Result<(), StoreError>;
}

/// Destination for violation alerts.
pub trait AlertSink: Send + Sync {
    fn raise(&self, alert: ComplianceAlert) -> Result<(), StoreError>;
}

/// A status sink that drops every verdict.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardStatus;

impl StatusSink for DiscardStatus {
    fn upsert_verdict(&self, _: JobId, _: &ComplianceVerdict) -> Result<(), StoreError> {
        Ok(())
    }
}

// Shared handles delegate, so one store can back several evaluators.

impl<T: CopyStore + ?Sized> CopyStore for Arc<T> {
    fn get_job(&self, job_id: JobId) -> Option<BackupJob> {
        (**self).get_job(job_id)
    }

    fn get_copies(&self, job_id: JobId) -> Vec<BackupCopy> {
        (**self).get_copies(job_id)
    }

    fn list_jobs(&self) -> Vec<BackupJob> {
        (**self).list_jobs()
    }
}

impl<T: StatusSink + ?Sized> StatusSink for Arc<T> {
    fn upsert_verdict(
        &self,
        job_id: JobId,
        verdict: &ComplianceVerdict,
    ) -> Result<(), StoreError> {
        (**self).upsert_verdict(job_id, verdict)
    }
}

impl<T: AlertSink + ?Sized> AlertSink for Arc<T> {
    fn raise(&self, alert: ComplianceAlert) -> Result<(), StoreError> {
        (**self).raise(alert)
    }
}

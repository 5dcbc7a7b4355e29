//! # In-Memory Job Catalog
//!
//! Jobs and their append-only copy histories, served to the evaluator
//! through [`CopyStore`].

use bkup_compliance::CopyStore;
use bkup_core::{BackupCopy, BackupJob, JobId, StoreError};

use crate::store::Store;

/// Thread-safe catalog of backup jobs and copies.
///
/// Cloning yields a handle to the same catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    jobs: Store<JobId, BackupJob>,
    copies: Store<JobId, Vec<BackupCopy>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a job.
    ///
    /// # Errors
    ///
    /// [`StoreError::DuplicateJob`] if a job with the same id exists.
    pub fn insert_job(&self, job: BackupJob) -> Result<(), StoreError> {
        let job_id = job.id;
        if !self.jobs.insert_new(job_id, job) {
            return Err(StoreError::DuplicateJob(job_id));
        }
        self.copies.insert_new(job_id, Vec::new());
        Ok(())
    }

    /// Replace a job's metadata, keeping its copies.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownJob`] if the job is not registered.
    pub fn update_job(&self, job: BackupJob) -> Result<(), StoreError> {
        let job_id = job.id;
        self.jobs
            .update(&job_id, |existing| *existing = job)
            .map(|_| ())
            .ok_or(StoreError::UnknownJob(job_id))
    }

    /// Append a copy to its job's history.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownJob`] if the copy's job is not registered.
    pub fn add_copy(&self, copy: BackupCopy) -> Result<(), StoreError> {
        let job_id = copy.job_id;
        self.copies
            .try_update(&job_id, |history| {
                history.push(copy);
                Ok(())
            })
            .unwrap_or(Err(StoreError::UnknownJob(job_id)))
    }

    /// Number of registered jobs.
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    /// Number of recorded copies across all jobs.
    pub fn copy_count(&self) -> usize {
        self.copies.list().iter().map(Vec::len).sum()
    }
}

impl CopyStore for InMemoryCatalog {
    fn get_job(&self, job_id: JobId) -> Option<BackupJob> {
        self.jobs.get(&job_id)
    }

    fn get_copies(&self, job_id: JobId) -> Vec<BackupCopy> {
        self.copies.get(&job_id).unwrap_or_default()
    }

    fn list_jobs(&self) -> Vec<BackupJob> {
        self.jobs
            .entries_sorted()
            .into_iter()
            .map(|(_, job)| job)
            .collect()
    }
}

//! In-memory alert log.

use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use bkup_compliance::{AlertSink, ComplianceAlert};
use bkup_core::{JobId, StoreError};

/// Ordered log of raised alerts. Cloning yields a handle to the same log.
#[derive(Debug, Clone, Default)]
pub struct MemoryAlertLog {
    alerts: Arc<RwLock<Vec<ComplianceAlert>>>,
}

impl MemoryAlertLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every alert, oldest first.
    pub fn list(&self) -> Vec<ComplianceAlert> {
        self.alerts.read().clone()
    }

    /// Alerts not yet acknowledged, oldest first.
    pub fn unacknowledged(&self) -> Vec<ComplianceAlert> {
        self.alerts
            .read()
            .iter()
            .filter(|alert| !alert.acknowledged)
            .cloned()
            .collect()
    }

    /// Alerts raised for one job, oldest first.
    pub fn for_job(&self, job_id: JobId) -> Vec<ComplianceAlert> {
        self.alerts
            .read()
            .iter()
            .filter(|alert| alert.job_id == job_id)
            .cloned()
            .collect()
    }

    /// Mark an alert as acknowledged. Returns `false` if no alert has `id`.
    pub fn acknowledge(&self, id: Uuid) -> bool {
        match self.alerts.write().iter_mut().find(|alert| alert.id == id) {
            Some(alert) => {
                alert.acknowledged = true;
                true
            }
            None => false,
        }
    }

    /// Drop every alert.
    pub fn clear(&self) {
        self.alerts.write().clear();
    }

    pub fn len(&self) -> usize {
        self.alerts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.read().is_empty()
    }
}

impl AlertSink for MemoryAlertLog {
    fn raise(&self, alert: ComplianceAlert) -> Result<(), StoreError> {
        self.alerts.write().push(alert);
        Ok(())
    }
}

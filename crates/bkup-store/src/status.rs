//! # Verdict Stores
//!
//! Two [`StatusSink`] implementations holding the latest
//! [`ComplianceSnapshot`] per job:
//!
//! - [`MemoryStatusStore`] keeps snapshots in memory.
//! - [`JsonStatusFile`] also mirrors them to a pretty-printed JSON file,
//!   replaced atomically on every upsert and reloaded on open. A failed
//!   write leaves both the file and the in-memory view unchanged.
//!
//! Both are last-writer-wins per job.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tempfile::NamedTempFile;

use bkup_compliance::{ComplianceSnapshot, ComplianceVerdict, StatusSink};
use bkup_core::{JobId, StoreError, Timestamp};

use crate::store::Store;

// ---------------------------------------------------------------------------
// MemoryStatusStore
// ---------------------------------------------------------------------------

/// In-memory snapshot store. Cloning yields a handle to the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStatusStore {
    snapshots: Store<JobId, ComplianceSnapshot>,
}

impl MemoryStatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest snapshot for a job.
    pub fn get(&self, job_id: JobId) -> Option<ComplianceSnapshot> {
        self.snapshots.get(&job_id)
    }

    /// All snapshots, sorted by job id.
    pub fn list(&self) -> Vec<ComplianceSnapshot> {
        self.snapshots
            .entries_sorted()
            .into_iter()
            .map(|(_, snapshot)| snapshot)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl StatusSink for MemoryStatusStore {
    fn upsert_verdict(
        &self,
        job_id: JobId,
        verdict: &ComplianceVerdict,
    ) -> Result<(), StoreError> {
        let snapshot = ComplianceSnapshot::from_verdict(verdict, Timestamp::now());
        self.snapshots.insert(job_id, snapshot);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JsonStatusFile
// ---------------------------------------------------------------------------

/// Snapshot store persisted as a JSON array sorted by job id.
#[derive(Debug)]
pub struct JsonStatusFile {
    path: PathBuf,
    snapshots: Mutex<BTreeMap<JobId, ComplianceSnapshot>>,
}

impl JsonStatusFile {
    /// Open a status file, loading its snapshots if it exists.
    ///
    /// A missing file starts empty and is created on the first upsert.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let snapshots = if path.exists() {
            read_snapshots(&path)?
        } else {
            BTreeMap::new()
        };
        tracing::debug!(path = %path.display(), snapshots = snapshots.len(), "opened status file");
        Ok(Self {
            path,
            snapshots: Mutex::new(snapshots),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Latest snapshot for a job.
    pub fn get(&self, job_id: JobId) -> Option<ComplianceSnapshot> {
        self.snapshots.lock().get(&job_id).cloned()
    }

    /// All snapshots, sorted by job id.
    pub fn list(&self) -> Vec<ComplianceSnapshot> {
        self.snapshots.lock().values().cloned().collect()
    }
}

impl StatusSink for JsonStatusFile {
    fn upsert_verdict(
        &self,
        job_id: JobId,
        verdict: &ComplianceVerdict,
    ) -> Result<(), StoreError> {
        let snapshot = ComplianceSnapshot::from_verdict(verdict, Timestamp::now());
        // Held across the write so concurrent upserts cannot interleave files.
        let mut snapshots = self.snapshots.lock();
        let mut next = snapshots.clone();
        next.insert(job_id, snapshot);
        write_snapshots(&self.path, &next)?;
        *snapshots = next;
        Ok(())
    }
}

/// Replace the file at `path` with `snapshots`.
///
/// The array is written to a temporary file in the same directory and
/// renamed over the target, so readers see either the old or the new file.
fn write_snapshots(
    path: &Path,
    snapshots: &BTreeMap<JobId, ComplianceSnapshot>,
) -> Result<(), StoreError> {
    let records: Vec<&ComplianceSnapshot> = snapshots.values().collect();
    let json = serde_json::to_vec_pretty(&records).map_err(|e| StoreError::Parse {
        source_name: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(&json)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn read_snapshots(path: &Path) -> Result<BTreeMap<JobId, ComplianceSnapshot>, StoreError> {
    let raw = std::fs::read_to_string(path)?;
    if raw.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    let records: Vec<ComplianceSnapshot> =
        serde_json::from_str(&raw).map_err(|e| StoreError::Parse {
            source_name: path.display().to_string(),
            reason: e.to_string(),
        })?;
    Ok(records
        .into_iter()
        .map(|snapshot| (snapshot.job_id, snapshot))
        .collect())
}

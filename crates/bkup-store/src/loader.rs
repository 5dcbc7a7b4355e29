//! # Catalog Files
//!
//! Loads an [`InMemoryCatalog`] from a YAML or JSON document listing jobs
//! with their copies nested inside:
//!
//! ```yaml
//! jobs:
//!   - id: 1
//!     name: file-server
//!     schedule_type: daily
//!     copies:
//!       - { copy_type: primary, media_type: disk, status: success }
//!       - { copy_type: offsite, media_type: cloud, status: success }
//!       - { copy_type: offline, media_type: tape, status: failed }
//! ```
//!
//! The format is chosen by file extension: `.yaml`/`.yml` for YAML,
//! anything else for JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use bkup_core::{
    BackupCopy, BackupJob, CopyStatus, CopyType, MediaType, StoreError, Timestamp,
};

use crate::catalog::InMemoryCatalog;

/// Serialization format of a catalog document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Yaml,
    Json,
}

impl CatalogFormat {
    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    jobs: Vec<JobEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct JobEntry {
    #[serde(flatten)]
    job: BackupJob,
    #[serde(default)]
    copies: Vec<CopyEntry>,
}

/// A copy as written under its job; the job id comes from the parent.
#[derive(Debug, Serialize, Deserialize)]
struct CopyEntry {
    copy_type: CopyType,
    media_type: MediaType,
    status: CopyStatus,
    #[serde(default)]
    storage_path: Option<String>,
    #[serde(default)]
    size_bytes: Option<u64>,
    #[serde(default)]
    is_encrypted: bool,
    #[serde(default)]
    created_at: Option<Timestamp>,
}

/// Read a catalog file.
///
/// # Errors
///
/// - [`StoreError::Io`] if the file cannot be read.
/// - [`StoreError::Parse`] if the document is malformed.
/// - [`StoreError::DuplicateJob`] if two jobs share an id.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<InMemoryCatalog, StoreError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    let catalog = parse_catalog(
        &source,
        CatalogFormat::from_path(path),
        &path.display().to_string(),
    )?;
    tracing::info!(
        path = %path.display(),
        jobs = catalog.job_count(),
        copies = catalog.copy_count(),
        "loaded backup catalog"
    );
    Ok(catalog)
}

/// Parse a catalog document. `source_name` labels parse errors.
pub fn parse_catalog(
    source: &str,
    format: CatalogFormat,
    source_name: &str,
) -> Result<InMemoryCatalog, StoreError> {
    let parse_error = |reason: String| StoreError::Parse {
        source_name: source_name.to_string(),
        reason,
    };
    let document: CatalogDocument = match format {
        CatalogFormat::Yaml => {
            serde_yaml::from_str(source).map_err(|e| parse_error(e.to_string()))?
        }
        CatalogFormat::Json => {
            serde_json::from_str(source).map_err(|e| parse_error(e.to_string()))?
        }
    };

    let catalog = InMemoryCatalog::new();
    for entry in document.jobs {
        let job_id = entry.job.id;
        catalog.insert_job(entry.job)?;
        for copy in entry.copies {
            catalog.add_copy(BackupCopy {
                job_id,
                copy_type: copy.copy_type,
                media_type: copy.media_type,
                status: copy.status,
                storage_path: copy.storage_path,
                size_bytes: copy.size_bytes,
                is_encrypted: copy.is_encrypted,
                created_at: copy.created_at,
            })?;
        }
    }
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bkup_compliance::CopyStore;
    use bkup_core::JobId;

    const YAML: &str = r#"
jobs:
  - id: 1
    name: file-server
    schedule_type: daily
    retention_days: 30
    copies:
      - { copy_type: primary, media_type: disk, status: success, size_bytes: 1024 }
      - { copy_type: offsite, media_type: cloud, status: success, is_encrypted: true }
      - copy_type: offline
        media_type: tape
        status: failed
        created_at: "2026-02-01T03:00:00+09:00"
  - id: 2
    name: archive
    active: false
"#;

    #[test]
    fn yaml_catalog_loads_jobs_and_copies() {
        let catalog = parse_catalog(YAML, CatalogFormat::Yaml, "inline.yaml").unwrap();
        assert_eq!(catalog.job_count(), 2);
        assert_eq!(catalog.copy_count(), 3);

        let job = catalog.get_job(JobId(1)).unwrap();
        assert_eq!(job.schedule_type.as_deref(), Some("daily"));
        assert_eq!(job.retention_days, Some(30));
        assert!(job.active);
        assert!(!catalog.get_job(JobId(2)).unwrap().active);

        let copies = catalog.get_copies(JobId(1));
        assert_eq!(copies[0].size_bytes, Some(1024));
        assert!(copies[1].is_encrypted);
        assert!(copies[2].status.is_failure());
        assert_eq!(
            copies[2].created_at.unwrap().to_iso8601(),
            "2026-01-31T18:00:00Z"
        );
        assert!(copies.iter().all(|c| c.job_id == JobId(1)));
    }

    #[test]
    fn json_catalog_loads() {
        let json = r#"{"jobs": [{"id": 5, "name": "db", "copies": [
            {"copy_type": "primary", "media_type": "disk", "status": "success"}
        ]}]}"#;
        let catalog = parse_catalog(json, CatalogFormat::Json, "inline.json").unwrap();
        assert_eq!(catalog.get_copies(JobId(5)).len(), 1);
    }

    #[test]
    fn duplicate_job_ids_are_rejected() {
        let yaml = "jobs:\n  - { id: 1, name: a }\n  - { id: 1, name: b }\n";
        let err = parse_catalog(yaml, CatalogFormat::Yaml, "dup.yaml").unwrap_err();
        assert!(matches!(err, StoreError::DuplicateJob(JobId(1))));
    }

    #[test]
    fn malformed_document_names_its_source() {
        let err = parse_catalog("{\"jobs\": [", CatalogFormat::Json, "broken.json").unwrap_err();
        match err {
            StoreError::Parse { source_name, .. } => assert_eq!(source_name, "broken.json"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(CatalogFormat::from_path(Path::new("a.yaml")), CatalogFormat::Yaml);
        assert_eq!(CatalogFormat::from_path(Path::new("a.YML")), CatalogFormat::Yaml);
        assert_eq!(CatalogFormat::from_path(Path::new("a.json")), CatalogFormat::Json);
        assert_eq!(CatalogFormat::from_path(Path::new("catalog")), CatalogFormat::Json);
    }

    #[test]
    fn load_catalog_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yml");
        std::fs::write(&path, YAML).unwrap();
        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.list_jobs().len(), 2);

        let missing = load_catalog(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(missing, StoreError::Io(_)));
    }
}

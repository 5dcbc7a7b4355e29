//! # Backup Job and Copy Records
//!
//! The records the compliance engine reads. Jobs and copies are owned by the
//! surrounding application; nothing in this workspace creates a job or
//! rewrites a copy after it has been recorded.
//!
//! ## Typed Vocabularies
//!
//! Copy type, media type and copy status were free-form strings in the job
//! database. They are modelled here as closed enums for the values the rule
//! engine reasons about, each with an `Other(String)` variant. Parsing is
//! exact on the persisted lowercase strings, and `as_str()` returns the
//! original text, so records written by older tooling survive a load/save
//! cycle byte-for-byte.

use serde::{Deserialize, Serialize};

use crate::identity::JobId;
use crate::temporal::Timestamp;

// ---------------------------------------------------------------------------
// Vocabulary macro
// ---------------------------------------------------------------------------

/// Generates `as_str`, `From<&str>`, `From<String>`, `From<T> for String`,
/// `Display` and the `is_known` helper for a string-backed vocabulary enum.
macro_rules! string_vocabulary {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            /// The persisted string value.
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $text,)+
                    Self::Other(raw) => raw.as_str(),
                }
            }

            /// Whether the value is one of the recognised variants.
            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                match raw {
                    $($text => Self::$variant,)+
                    other => Self::Other(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self::from(raw.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(raw) => raw,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

// ---------------------------------------------------------------------------
// CopyType
// ---------------------------------------------------------------------------

/// Role of a copy within a job's copy set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CopyType {
    /// The production-side copy.
    Primary,
    /// An additional on-site copy.
    Secondary,
    /// A copy stored at a geographically distinct location.
    Offsite,
    /// An air-gapped copy with no network connectivity.
    Offline,
    /// Any other value found in the records.
    Other(String),
}

string_vocabulary!(CopyType {
    Primary => "primary",
    Secondary => "secondary",
    Offsite => "offsite",
    Offline => "offline",
});

// ---------------------------------------------------------------------------
// MediaType
// ---------------------------------------------------------------------------

/// Storage medium a copy lives on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaType {
    /// Disk or NAS storage.
    Disk,
    /// Tape cartridge or library.
    Tape,
    /// Object or block storage at a cloud provider.
    Cloud,
    /// Any other value found in the records.
    Other(String),
}

string_vocabulary!(MediaType {
    Disk => "disk",
    Tape => "tape",
    Cloud => "cloud",
});

// ---------------------------------------------------------------------------
// CopyStatus
// ---------------------------------------------------------------------------

/// Outcome of the backup run that produced a copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CopyStatus {
    /// The copy was written and verified.
    Success,
    /// The copy failed to write or failed verification.
    Failed,
    /// The copy is still being written.
    Pending,
    /// Any other value found in the records.
    Other(String),
}

string_vocabulary!(CopyStatus {
    Success => "success",
    Failed => "failed",
    Pending => "pending",
});

impl CopyStatus {
    /// Whether this copy counts as a verification error.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

// ---------------------------------------------------------------------------
// BackupJob
// ---------------------------------------------------------------------------

/// A configured backup job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupJob {
    /// Primary key.
    pub id: JobId,
    /// Operator-facing job name.
    pub name: String,
    /// Inactive jobs are skipped by fleet-wide checks.
    #[serde(default = "default_active")]
    pub active: bool,
    /// Owning user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,
    /// Kind of job, e.g. `full`, `database`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    /// Schedule descriptor, e.g. `daily`, `manual`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_type: Option<String>,
    /// Days a copy is retained.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_days: Option<u32>,
}

fn default_active() -> bool {
    true
}

impl BackupJob {
    /// Create an active job with only the required fields set.
    pub fn new(id: JobId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            active: true,
            owner_id: None,
            job_type: None,
            schedule_type: None,
            retention_days: None,
        }
    }
}

// ---------------------------------------------------------------------------
// BackupCopy
// ---------------------------------------------------------------------------

/// One recorded copy of a job's data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupCopy {
    /// Owning job.
    pub job_id: JobId,
    /// Role of the copy.
    pub copy_type: CopyType,
    /// Storage medium.
    pub media_type: MediaType,
    /// Outcome of the run that produced the copy.
    pub status: CopyStatus,
    /// Where the copy is stored (path, bucket, library slot).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<String>,
    /// Size of the copy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(default)]
    pub is_encrypted: bool,
    /// When the copy was recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl BackupCopy {
    /// Create a copy record with the three fields the rule engine reads.
    pub fn new(
        job_id: JobId,
        copy_type: impl Into<CopyType>,
        media_type: impl Into<MediaType>,
        status: impl Into<CopyStatus>,
    ) -> Self {
        Self {
            job_id,
            copy_type: copy_type.into(),
            media_type: media_type.into(),
            status: status.into(),
            storage_path: None,
            size_bytes: None,
            is_encrypted: false,
            created_at: None,
        }
    }
}

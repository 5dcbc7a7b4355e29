//! # bkup-core: Foundational Types for the bkup Stack
//!
//! The leaf crate of the workspace. It defines the records the compliance
//! engine reads (backup jobs and their copies) and the shared error types.
//! It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Typed vocabularies with preserved strings.** `CopyType`, `MediaType`
//!    and `CopyStatus` are closed enums for the values the rule engine cares
//!    about, plus an `Other(String)` variant so that unrecognised values from
//!    existing records load and round-trip unchanged.
//!
//! 2. **Newtype identifiers.** `JobId` wraps the integer primary key so a job
//!    id cannot be confused with an owner id or a byte count.
//!
//! 3. **UTC-only timestamps.** `Timestamp` normalises every instant to UTC
//!    with seconds precision.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `bkup-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod model;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use error::{StoreError, ValidationError};
pub use identity::JobId;
pub use model::{BackupCopy, BackupJob, CopyStatus, CopyType, MediaType};
pub use temporal::Timestamp;

//! # bkup-compliance: The 3-2-1-1-0 Rule Engine
//!
//! Checks a backup job's copy set against the 3-2-1-1-0 rule:
//!
//! | Rule              | Passes when                                   |
//! |-------------------|-----------------------------------------------|
//! | `min_copies`      | at least 3 copies exist                       |
//! | `different_media` | copies span at least 2 distinct media types   |
//! | `offsite_copy`    | at least one copy has type `offsite`          |
//! | `offline_copy`    | at least one copy has type `offline`          |
//! | `zero_errors`     | no copy has status `failed`                   |
//!
//! Each passing rule adds 0.2 to the score. A job passing all five is
//! `compliant`; one passing at least the warning threshold (3 by default) is
//! `warning`; anything less is `non_compliant`. A job id that does not
//! resolve is `unknown`.
//!
//! ## Layout
//!
//! - [`rules`]: the rules, thresholds and the pure check function.
//! - [`messages`]: issue and recommendation texts per locale.
//! - [`verdict`]: verdicts, statuses, snapshots and aggregates.
//! - [`alert`]: violation alerts.
//! - [`ports`]: traits for the job store and the result sinks.
//! - [`evaluator`]: [`ComplianceEvaluator`], which wires the above together.
//! - [`config`]: layered evaluator configuration.
//!
//! ## Example
//!
//! ```
//! use bkup_compliance::{ComplianceVerdict, Locale, RulePolicy};
//! use bkup_core::{BackupCopy, JobId};
//!
//! let job = JobId(1);
//! let copies = vec![
//!     BackupCopy::new(job, "primary", "disk", "success"),
//!     BackupCopy::new(job, "offsite", "cloud", "success"),
//!     BackupCopy::new(job, "offline", "tape", "success"),
//! ];
//! let verdict = ComplianceVerdict::assess(job, &copies, &RulePolicy::default(), Locale::Ja);
//! assert!(verdict.compliant);
//! assert_eq!(verdict.score, 1.0);
//! ```

pub mod alert;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod messages;
pub mod ports;
pub mod rules;
pub mod verdict;

pub use alert::{AlertSeverity, AlertType, ComplianceAlert};
pub use config::{ConfigError, EvaluatorConfig};
pub use error::{ComplianceError, ErrorReport};
pub use evaluator::ComplianceEvaluator;
pub use messages::Locale;
pub use ports::{AlertSink, CopyStore, DiscardStatus, StatusSink};
pub use rules::{run_checks, CopyStats, Rule, RuleChecks, RulePolicy};
pub use verdict::{
    BatchResult, ComplianceSnapshot, ComplianceStatus, ComplianceSummary, ComplianceVerdict,
    VerdictDetails,
};

//! # bkup-cli: CLI Tool for the bkup Stack
//!
//! Provides the `bkup` command-line interface over a catalog file of backup
//! jobs and their copies.
//!
//! ## Subcommands
//!
//! - `bkup check <JOB_ID>...` evaluates jobs; `--strict` fails on violations.
//! - `bkup score <JOB_ID>` prints a job's compliance score.
//! - `bkup recommend <JOB_ID>` prints remediation steps.
//! - `bkup report` summarises every active job.
//!
//! ## Exit Codes
//!
//! | Code | Meaning                                   |
//! |------|-------------------------------------------|
//! | 0    | success                                   |
//! | 1    | operational error (bad config, bad file)  |
//! | 2    | strict-mode violation                     |
//!
//! ```bash
//! bkup --catalog jobs.yaml --status-file status.json check 1 2 3
//! BKUP_LOCALE=en bkup --catalog jobs.yaml --json report
//! ```

pub mod alerts;
pub mod check;
pub mod context;
pub mod logging;
pub mod output;
pub mod report;
pub mod score;

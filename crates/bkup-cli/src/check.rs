//! # Check Subcommand
//!
//! Evaluates the given jobs against the 3-2-1-1-0 rule and records their
//! verdicts.
//!
//! ```bash
//! bkup --catalog jobs.yaml check 1 2 3
//! bkup --catalog jobs.yaml check --strict 1
//! ```
//!
//! In strict mode any violation or unknown job exits with code 2.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use bkup_compliance::{ComplianceVerdict, ErrorReport};
use bkup_core::JobId;

use crate::context::{build_evaluator, Evaluator, GlobalOpts};
use crate::output::{write_json, write_verdict};

/// Exit code for a strict-mode violation.
pub const EXIT_VIOLATION: u8 = 2;

/// Arguments for the `bkup check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Job ids to check.
    #[arg(
        value_name = "JOB_ID",
        required = true,
        num_args = 1..,
        allow_negative_numbers = true
    )]
    pub job_ids: Vec<JobId>,

    /// Fail with exit code 2 unless every job is fully compliant.
    #[arg(long)]
    pub strict: bool,
}

/// Outcome of one job in strict mode.
#[derive(Debug, Serialize)]
struct StrictOutcome {
    job_id: JobId,
    passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    verdict: Option<ComplianceVerdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorReport>,
}

/// Execute the check subcommand.
///
/// Returns exit code: 0 on success, 2 on a strict-mode violation.
pub fn run_check(args: &CheckArgs, opts: &GlobalOpts, out: &mut dyn Write) -> Result<u8> {
    let evaluator = build_evaluator(opts)?;
    check_jobs(&evaluator, args, opts.json, out)
}

/// Run the check against an existing evaluator.
pub fn check_jobs(
    evaluator: &Evaluator,
    args: &CheckArgs,
    json: bool,
    out: &mut dyn Write,
) -> Result<u8> {
    if args.strict {
        return check_strict(evaluator, &args.job_ids, json, out);
    }

    let batch = evaluator.batch_evaluate(&args.job_ids);
    if json {
        write_json(out, &batch)?;
    } else {
        writeln!(out, "3-2-1-1-0 compliance check")?;
        for verdict in &batch.results {
            write_verdict(out, verdict)?;
        }
        writeln!(
            out,
            "\n{}/{} job(s) compliant.",
            batch.compliant_jobs, batch.total_jobs
        )?;
    }
    Ok(0)
}

fn check_strict(
    evaluator: &Evaluator,
    job_ids: &[JobId],
    json: bool,
    out: &mut dyn Write,
) -> Result<u8> {
    let outcomes: Vec<StrictOutcome> = job_ids
        .iter()
        .map(|&job_id| match evaluator.validate(job_id) {
            Ok(verdict) => StrictOutcome {
                job_id,
                passed: true,
                verdict: Some(verdict),
                error: None,
            },
            Err(e) => StrictOutcome {
                job_id,
                passed: false,
                verdict: None,
                error: Some(e.report()),
            },
        })
        .collect();
    let failed = outcomes.iter().filter(|o| !o.passed).count();

    if json {
        write_json(out, &outcomes)?;
    } else {
        writeln!(out, "3-2-1-1-0 compliance check (strict)")?;
        for outcome in &outcomes {
            match (&outcome.verdict, &outcome.error) {
                (Some(verdict), _) => write_verdict(out, verdict)?,
                (None, Some(report)) => writeln!(out, "  FAIL: {}", report.message)?,
                (None, None) => {}
            }
        }
        writeln!(
            out,
            "\n{} of {} job(s) failed strict validation.",
            failed,
            outcomes.len()
        )?;
    }

    if failed > 0 {
        tracing::warn!(failed, total = outcomes.len(), "strict compliance check failed");
        Ok(EXIT_VIOLATION)
    } else {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::build_evaluator_with;
    use bkup_compliance::EvaluatorConfig;

    const CATALOG: &str = r#"
jobs:
  - id: 1
    name: web
    copies:
      - { copy_type: primary, media_type: disk, status: success }
      - { copy_type: offsite, media_type: cloud, status: success }
      - { copy_type: offline, media_type: tape, status: success }
  - id: 2
    name: db
    copies:
      - { copy_type: primary, media_type: disk, status: success }
      - { copy_type: secondary, media_type: disk, status: success }
"#;

    fn evaluator(dir: &tempfile::TempDir) -> Evaluator {
        let path = dir.path().join("catalog.yaml");
        std::fs::write(&path, CATALOG).unwrap();
        let opts = GlobalOpts {
            catalog: Some(path),
            ..GlobalOpts::default()
        };
        build_evaluator_with(&opts, &EvaluatorConfig::default()).unwrap()
    }

    fn run(args: &CheckArgs, json: bool) -> (u8, String) {
        let dir = tempfile::tempdir().unwrap();
        let evaluator = evaluator(&dir);
        let mut buf = Vec::new();
        let code = check_jobs(&evaluator, args, json, &mut buf).unwrap();
        (code, String::from_utf8(buf).unwrap())
    }

    fn args(ids: &[i64], strict: bool) -> CheckArgs {
        CheckArgs {
            job_ids: ids.iter().map(|&id| JobId(id)).collect(),
            strict,
        }
    }

    #[test]
    fn plain_check_exits_zero_with_violations() {
        let (code, text) = run(&args(&[1, 2], false), false);
        assert_eq!(code, 0);
        assert!(text.contains("OK: job 1 compliant"));
        assert!(text.contains("FAIL: job 2 non_compliant"));
        assert!(text.contains("最低3コピー未満"));
        assert!(text.contains("1/2 job(s) compliant."));
    }

    #[test]
    fn json_check_prints_batch_result() {
        let (code, text) = run(&args(&[1, 999], false), true);
        assert_eq!(code, 0);
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["total_jobs"], 2);
        assert_eq!(json["compliant_jobs"], 1);
        assert_eq!(json["results"][1]["status"], "unknown");
    }

    #[test]
    fn strict_check_passes_for_compliant_job() {
        let (code, _) = run(&args(&[1], true), false);
        assert_eq!(code, 0);
    }

    #[test]
    fn strict_check_exits_two_on_violation() {
        let (code, text) = run(&args(&[1, 2], true), false);
        assert_eq!(code, EXIT_VIOLATION);
        assert!(text.contains("rule violation for job 2"));
        assert!(text.contains("1 of 2 job(s) failed"));
    }

    #[test]
    fn strict_check_reports_unknown_job_as_json() {
        let (code, text) = run(&args(&[404], true), true);
        assert_eq!(code, EXIT_VIOLATION);
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json[0]["passed"], false);
        assert_eq!(json[0]["error"]["error_type"], "job_not_found");
    }

    #[test]
    fn negative_job_ids_parse_as_values() {
        use clap::Parser;

        #[derive(Parser)]
        struct Cmd {
            #[command(flatten)]
            check: CheckArgs,
        }

        let cmd = Cmd::try_parse_from(["check", "-1", "2", "--strict"]).unwrap();
        assert_eq!(cmd.check.job_ids, vec![JobId(-1), JobId(2)]);
        assert!(cmd.check.strict);
    }
}

//! # Score and Recommend Subcommands
//!
//! Read-only queries for a single job: neither records a verdict nor
//! raises an alert.
//!
//! ```bash
//! bkup --catalog jobs.yaml score 3
//! bkup --catalog jobs.yaml recommend 3
//! ```

use std::io::Write;

use anyhow::Result;
use clap::Args;
use serde_json::json;

use bkup_core::JobId;

use crate::context::{build_evaluator, Evaluator, GlobalOpts};
use crate::output::write_json;

/// Arguments for the `bkup score` and `bkup recommend` subcommands.
#[derive(Args, Debug)]
pub struct JobArgs {
    /// Job id to query.
    #[arg(value_name = "JOB_ID")]
    pub job_id: JobId,
}

/// Execute the score subcommand.
pub fn run_score(args: &JobArgs, opts: &GlobalOpts, out: &mut dyn Write) -> Result<u8> {
    let evaluator = build_evaluator(opts)?;
    print_score(&evaluator, args.job_id, opts.json, out)
}

/// Execute the recommend subcommand.
pub fn run_recommend(args: &JobArgs, opts: &GlobalOpts, out: &mut dyn Write) -> Result<u8> {
    let evaluator = build_evaluator(opts)?;
    print_recommendations(&evaluator, args.job_id, opts.json, out)
}

pub fn print_score(
    evaluator: &Evaluator,
    job_id: JobId,
    json: bool,
    out: &mut dyn Write,
) -> Result<u8> {
    let score = evaluator.score(job_id);
    if json {
        write_json(out, &json!({ "job_id": job_id, "score": score }))?;
    } else {
        writeln!(out, "{score:.1}")?;
    }
    Ok(0)
}

pub fn print_recommendations(
    evaluator: &Evaluator,
    job_id: JobId,
    json: bool,
    out: &mut dyn Write,
) -> Result<u8> {
    let recommendations = evaluator.recommendations(job_id);
    if json {
        write_json(
            out,
            &json!({ "job_id": job_id, "recommendations": recommendations }),
        )?;
    } else if recommendations.is_empty() {
        writeln!(out, "Job {job_id} meets the 3-2-1-1-0 rule; nothing to do.")?;
    } else {
        for (n, text) in recommendations.iter().enumerate() {
            writeln!(out, "{}. {text}", n + 1)?;
        }
    }
    Ok(0)
}

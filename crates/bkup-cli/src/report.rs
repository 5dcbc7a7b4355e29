//! # Report Subcommand
//!
//! Checks every active job in the catalog and prints a fleet summary.

use std::io::Write;

use anyhow::Result;

use crate::context::{build_evaluator, Evaluator, GlobalOpts};
use crate::output::{write_json, write_verdict};

/// Execute the report subcommand.
pub fn run_report(opts: &GlobalOpts, out: &mut dyn Write) -> Result<u8> {
    let evaluator = build_evaluator(opts)?;
    print_report(&evaluator, opts.json, out)
}

pub fn print_report(evaluator: &Evaluator, json: bool, out: &mut dyn Write) -> Result<u8> {
    let summary = evaluator.check_all();
    if json {
        write_json(out, &summary)?;
        return Ok(0);
    }

    writeln!(out, "3-2-1-1-0 compliance report")?;
    for verdict in &summary.results {
        write_verdict(out, verdict)?;
    }
    writeln!(out)?;
    writeln!(out, "Jobs:          {}", summary.total_jobs)?;
    writeln!(out, "Compliant:     {}", summary.compliant_jobs)?;
    writeln!(out, "Warning:       {}", summary.warning_jobs)?;
    writeln!(out, "Non-compliant: {}", summary.non_compliant_jobs)?;
    writeln!(out, "Mean score:    {:.2}", summary.score)?;
    writeln!(out, "Overall:       {}", summary.overall_status)?;
    Ok(0)
}

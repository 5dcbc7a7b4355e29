//! Text and JSON rendering shared by the subcommands.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use bkup_compliance::{ComplianceStatus, ComplianceVerdict};

/// Write a value as pretty JSON followed by a newline.
pub fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Status tag used in text output.
pub fn status_tag(status: ComplianceStatus) -> &'static str {
    match status {
        ComplianceStatus::Compliant => "OK",
        ComplianceStatus::Warning => "WARN",
        ComplianceStatus::NonCompliant => "FAIL",
        ComplianceStatus::Unknown => "UNKNOWN",
    }
}

/// Write one verdict: a status line, then each issue with its fix.
pub fn write_verdict(out: &mut dyn Write, verdict: &ComplianceVerdict) -> Result<()> {
    if !verdict.is_known() {
        writeln!(out, "  {}: job {} not found", status_tag(verdict.status), verdict.job_id)?;
        return Ok(());
    }
    writeln!(
        out,
        "  {}: job {} {} (score {:.1}, {} copies, {} media)",
        status_tag(verdict.status),
        verdict.job_id,
        verdict.status,
        verdict.score,
        verdict.copies_count,
        verdict.media_types_count,
    )?;
    for (issue, fix) in verdict.issues.iter().zip(&verdict.recommendations) {
        writeln!(out, "      - {issue}")?;
        writeln!(out, "        fix: {fix}")?;
    }
    Ok(())
}

//! # bkup CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use bkup_cli::check::{run_check, CheckArgs};
use bkup_cli::context::GlobalOpts;
use bkup_cli::logging::{self, LogFormat};
use bkup_cli::report::run_report;
use bkup_cli::score::{run_recommend, run_score, JobArgs};

/// Checks backup jobs against the 3-2-1-1-0 rule: 3 copies, 2 media types,
/// 1 offsite copy, 1 offline copy, 0 verification errors.
#[derive(Parser, Debug)]
#[command(name = "bkup", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog of jobs and copies (YAML or JSON).
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// JSON file recording the latest verdict per job.
    #[arg(long, global = true)]
    status_file: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Log line format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate jobs and record their verdicts.
    Check(CheckArgs),

    /// Print the compliance score of a job.
    Score(JobArgs),

    /// Print remediation steps for a job.
    Recommend(JobArgs),

    /// Evaluate every active job and print a summary.
    Report,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_format);

    tracing::debug!("bkup CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let opts = GlobalOpts {
        config: cli.config,
        catalog: cli.catalog,
        status_file: cli.status_file,
        json: cli.json,
    };
    let mut stdout = std::io::stdout().lock();

    let result = match &cli.command {
        Commands::Check(args) => run_check(args, &opts, &mut stdout),
        Commands::Score(args) => run_score(args, &opts, &mut stdout),
        Commands::Recommend(args) => run_recommend(args, &opts, &mut stdout),
        Commands::Report => run_report(&opts, &mut stdout),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

//! # Command Context
//!
//! Builds the evaluator every subcommand runs against: configuration from
//! `--config` and `BKUP_*` variables, jobs from `--catalog`, verdicts into
//! `--status-file` (or memory), and alerts into the log when enabled.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use bkup_compliance::{
    ComplianceEvaluator, ComplianceVerdict, EvaluatorConfig, StatusSink,
};
use bkup_core::{JobId, StoreError};
use bkup_store::{load_catalog, InMemoryCatalog, JsonStatusFile, MemoryStatusStore};

use crate::alerts::TracingAlertSink;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOpts {
    pub config: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    pub status_file: Option<PathBuf>,
    pub json: bool,
}

/// Where verdicts are recorded for this run.
#[derive(Debug)]
pub enum StatusTarget {
    Memory(MemoryStatusStore),
    File(JsonStatusFile),
}

impl StatusSink for StatusTarget {
    fn upsert_verdict(
        &self,
        job_id: JobId,
        verdict: &ComplianceVerdict,
    ) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.upsert_verdict(job_id, verdict),
            Self::File(file) => file.upsert_verdict(job_id, verdict),
        }
    }
}

pub type Evaluator = ComplianceEvaluator<InMemoryCatalog, StatusTarget>;

/// Load configuration: defaults, then the YAML file, then the environment.
pub fn load_config(path: Option<&Path>) -> Result<EvaluatorConfig> {
    load_config_with(path, |var| std::env::var(var).ok())
}

/// [`load_config`] with an explicit variable lookup.
pub fn load_config_with<F>(path: Option<&Path>, lookup: F) -> Result<EvaluatorConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let base = match path {
        Some(path) => EvaluatorConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EvaluatorConfig::default(),
    };
    let config = base
        .apply_env_from(lookup)
        .context("invalid BKUP_* environment override")?;
    config.validate().context("invalid compliance policy")?;
    tracing::debug!(?config, "resolved evaluator configuration");
    Ok(config)
}

/// Build the evaluator for a run.
pub fn build_evaluator(opts: &GlobalOpts) -> Result<Evaluator> {
    let config = load_config(opts.config.as_deref())?;
    build_evaluator_with(opts, &config)
}

/// [`build_evaluator`] with an already resolved configuration.
pub fn build_evaluator_with(opts: &GlobalOpts, config: &EvaluatorConfig) -> Result<Evaluator> {
    let catalog_path = opts
        .catalog
        .as_deref()
        .context("no catalog given (use --catalog <FILE>)")?;
    let catalog = load_catalog(catalog_path)
        .with_context(|| format!("failed to load catalog {}", catalog_path.display()))?;

    let status = match &opts.status_file {
        Some(path) => StatusTarget::File(
            JsonStatusFile::open(path)
                .with_context(|| format!("failed to open status file {}", path.display()))?,
        ),
        None => StatusTarget::Memory(MemoryStatusStore::new()),
    };

    let evaluator = ComplianceEvaluator::from_config(catalog, status, config)?;
    Ok(if config.alerts {
        evaluator.with_alerts(Box::new(TracingAlertSink))
    } else {
        evaluator
    })
}

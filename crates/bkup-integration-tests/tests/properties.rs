//! # Evaluator Properties
//!
//! Property tests over arbitrary copy sets, run through the full evaluator
//! with in-memory stores.

use bkup_compliance::{ComplianceEvaluator, ComplianceStatus, CopyStore, Rule};
use bkup_core::{BackupCopy, BackupJob, JobId};
use bkup_store::{InMemoryCatalog, MemoryStatusStore};
use proptest::prelude::*;

type CopySpec = (&'static str, &'static str, &'static str);

fn arb_copy() -> impl Strategy<Value = CopySpec> {
    (
        prop::sample::select(vec!["primary", "secondary", "offsite", "offline", "archive"]),
        prop::sample::select(vec!["disk", "tape", "cloud", "optical"]),
        prop::sample::select(vec!["success", "failed", "pending"]),
    )
}

fn arb_success_copy() -> impl Strategy<Value = CopySpec> {
    (
        prop::sample::select(vec!["primary", "secondary", "offsite", "offline"]),
        prop::sample::select(vec!["disk", "tape", "cloud"]),
        Just("success"),
    )
}

fn catalog(jobs: &[Vec<CopySpec>]) -> InMemoryCatalog {
    let catalog = InMemoryCatalog::new();
    for (n, copies) in jobs.iter().enumerate() {
        let job_id = JobId(n as i64 + 1);
        catalog
            .insert_job(BackupJob::new(job_id, format!("job-{}", n + 1)))
            .unwrap();
        for &(copy_type, media_type, status) in copies {
            catalog
                .add_copy(BackupCopy::new(job_id, copy_type, media_type, status))
                .unwrap();
        }
    }
    catalog
}

proptest! {
    #[test]
    fn evaluate_is_idempotent(copies in prop::collection::vec(arb_copy(), 0..10)) {
        let evaluator = ComplianceEvaluator::new(catalog(&[copies]), MemoryStatusStore::new());
        let first = evaluator.evaluate(JobId(1));
        let second = evaluator.evaluate(JobId(1));
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(evaluator.sink().len(), 1);
    }

    #[test]
    fn adding_a_successful_copy_never_lowers_the_verdict(
        copies in prop::collection::vec(arb_copy(), 0..10),
        extra in arb_success_copy(),
    ) {
        let before = ComplianceEvaluator::new(catalog(&[copies.clone()]), MemoryStatusStore::new())
            .evaluate(JobId(1));
        let mut more = copies;
        more.push(extra);
        let after = ComplianceEvaluator::new(catalog(&[more]), MemoryStatusStore::new())
            .evaluate(JobId(1));

        prop_assert!(after.score >= before.score);
        prop_assert!(after.status >= before.status);
        for rule in Rule::ALL {
            prop_assert!(!before.checks.get(rule) || after.checks.get(rule), "{} regressed", rule);
        }
    }

    #[test]
    fn batch_equals_individual_evaluations(
        jobs in prop::collection::vec(prop::collection::vec(arb_copy(), 0..6), 1..5),
        picks in prop::collection::vec(0i64..7, 0..8),
    ) {
        let evaluator = ComplianceEvaluator::new(catalog(&jobs), MemoryStatusStore::new());
        let ids: Vec<JobId> = picks.into_iter().map(JobId).collect();
        let batch = evaluator.batch_evaluate(&ids);

        prop_assert_eq!(batch.total_jobs, ids.len());
        for (verdict, &id) in batch.results.iter().zip(&ids) {
            prop_assert_eq!(verdict, &evaluator.evaluate(id));
        }
        prop_assert_eq!(
            batch.compliant_jobs,
            batch.results.iter().filter(|v| v.compliant).count()
        );
    }

    #[test]
    fn unknown_status_only_for_unresolved_ids(
        jobs in prop::collection::vec(prop::collection::vec(arb_copy(), 0..6), 0..4),
        id in -2i64..8,
    ) {
        let evaluator = ComplianceEvaluator::new(catalog(&jobs), MemoryStatusStore::new());
        let verdict = evaluator.evaluate(JobId(id));
        let known = evaluator.store().get_job(JobId(id)).is_some();
        prop_assert_eq!(verdict.status == ComplianceStatus::Unknown, !known);
        if !known {
            prop_assert_eq!(verdict.score, 0.0);
        }
    }

    #[test]
    fn summary_status_is_the_worst_job_status(
        jobs in prop::collection::vec(prop::collection::vec(arb_copy(), 0..6), 1..5),
    ) {
        let evaluator = ComplianceEvaluator::new(catalog(&jobs), MemoryStatusStore::new());
        let summary = evaluator.check_all();
        let worst = summary.results.iter().map(|v| v.status).min();
        prop_assert_eq!(Some(summary.overall_status), worst);
        prop_assert_eq!(
            summary.compliant_jobs + summary.warning_jobs + summary.non_compliant_jobs,
            summary.total_jobs
        );
    }
}

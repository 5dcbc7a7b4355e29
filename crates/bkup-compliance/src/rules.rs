//! # The 3-2-1-1-0 Rules
//!
//! Defines the five [`Rule`]s, the [`RulePolicy`] thresholds they are
//! measured against, and [`run_checks`], the pure function that turns a
//! job's copy set into a [`RuleChecks`] record.
//!
//! ## Rule Order
//!
//! [`Rule::ALL`] fixes the evaluation order: min copies, different media,
//! offsite copy, offline copy, zero errors. Issue and recommendation lists
//! follow this order, which keeps them stable for persisted snapshots and
//! for tests.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use bkup_core::{BackupCopy, CopyType, ValidationError};

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

/// One dimension of the 3-2-1-1-0 backup rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// At least `min_copies` copies exist.
    MinCopies,
    /// Copies span at least `min_media_types` distinct media.
    DifferentMedia,
    /// At least one copy is stored offsite.
    OffsiteCopy,
    /// At least one copy is offline (air-gapped).
    OfflineCopy,
    /// No copy has a failed status.
    ZeroErrors,
}

impl Rule {
    /// All rules in evaluation order.
    pub const ALL: [Rule; 5] = [
        Self::MinCopies,
        Self::DifferentMedia,
        Self::OffsiteCopy,
        Self::OfflineCopy,
        Self::ZeroErrors,
    ];

    /// The total number of rules.
    pub const COUNT: usize = 5;

    /// The persisted key for this rule.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MinCopies => "min_copies",
            Self::DifferentMedia => "different_media",
            Self::OffsiteCopy => "offsite_copy",
            Self::OfflineCopy => "offline_copy",
            Self::ZeroErrors => "zero_errors",
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RulePolicy
// ---------------------------------------------------------------------------

/// Thresholds applied by the rule checks.
///
/// The defaults are the 3-2-1-1-0 rule itself. A `warning_threshold` of 3
/// means a job passing three or four of the five checks is reported as
/// `warning` rather than `non_compliant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulePolicy {
    /// Minimum number of copies.
    pub min_copies: usize,
    /// Minimum number of distinct media types.
    pub min_media_types: usize,
    /// Passing checks needed for a non-compliant job to rank as `warning`.
    pub warning_threshold: usize,
}

impl Default for RulePolicy {
    fn default() -> Self {
        Self {
            min_copies: 3,
            min_media_types: 2,
            warning_threshold: 3,
        }
    }
}

impl RulePolicy {
    /// Check that every threshold is in range.
    ///
    /// `warning_threshold` must be in `1..=4`: five passing checks is full
    /// compliance, and zero would rank every job as at least `warning`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_copies == 0 {
            return Err(ValidationError::InvalidPolicy {
                field: "min_copies",
                value: self.min_copies,
                reason: "must be at least 1".into(),
            });
        }
        if self.min_media_types == 0 {
            return Err(ValidationError::InvalidPolicy {
                field: "min_media_types",
                value: self.min_media_types,
                reason: "must be at least 1".into(),
            });
        }
        if !(1..Rule::COUNT).contains(&self.warning_threshold) {
            return Err(ValidationError::InvalidPolicy {
                field: "warning_threshold",
                value: self.warning_threshold,
                reason: format!("must be between 1 and {}", Rule::COUNT - 1),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// RuleChecks
// ---------------------------------------------------------------------------

/// Pass/fail outcome of each rule for one job.
///
/// Serializes as a flat map keyed by [`Rule::as_str`], the same shape the
/// violation records have always used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleChecks {
    pub min_copies: bool,
    pub different_media: bool,
    pub offsite_copy: bool,
    pub offline_copy: bool,
    pub zero_errors: bool,
}

impl RuleChecks {
    /// Outcome of a single rule.
    pub fn get(&self, rule: Rule) -> bool {
        match rule {
            Rule::MinCopies => self.min_copies,
            Rule::DifferentMedia => self.different_media,
            Rule::OffsiteCopy => self.offsite_copy,
            Rule::OfflineCopy => self.offline_copy,
            Rule::ZeroErrors => self.zero_errors,
        }
    }

    /// Number of passing rules.
    pub fn passed_count(&self) -> usize {
        Rule::ALL.iter().filter(|&&rule| self.get(rule)).count()
    }

    /// Whether every rule passes.
    pub fn all_pass(&self) -> bool {
        self.passed_count() == Rule::COUNT
    }

    /// Failing rules, in evaluation order.
    pub fn failing(&self) -> impl Iterator<Item = Rule> + '_ {
        Rule::ALL.into_iter().filter(move |&rule| !self.get(rule))
    }

    /// Score in [0, 1]: each passing rule contributes `1 / Rule::COUNT`.
    pub fn score(&self) -> f64 {
        self.passed_count() as f64 / Rule::COUNT as f64
    }
}

// ---------------------------------------------------------------------------
// CopyStats
// ---------------------------------------------------------------------------

/// Aggregate facts about a copy set, gathered in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CopyStats {
    /// Number of copies, failed ones included.
    pub total_copies: usize,
    /// Distinct media type strings, sorted.
    pub media_types: BTreeSet<String>,
    /// Distinct copy type strings, sorted.
    pub copy_types: BTreeSet<String>,
    /// Whether any copy is `offsite`.
    pub has_offsite: bool,
    /// Whether any copy is `offline`.
    pub has_offline: bool,
    /// Number of copies with `failed` status.
    pub failed_copies: usize,
}

impl CopyStats {
    /// Collect stats over a copy set.
    pub fn collect(copies: &[BackupCopy]) -> Self {
        let mut stats = Self {
            total_copies: copies.len(),
            ..Self::default()
        };
        for copy in copies {
            stats.media_types.insert(copy.media_type.as_str().to_string());
            stats.copy_types.insert(copy.copy_type.as_str().to_string());
            match copy.copy_type {
                CopyType::Offsite => stats.has_offsite = true,
                CopyType::Offline => stats.has_offline = true,
                CopyType::Primary | CopyType::Secondary | CopyType::Other(_) => {}
            }
            if copy.status.is_failure() {
                stats.failed_copies += 1;
            }
        }
        stats
    }
}

/// Run all five rule checks over a copy set.
///
/// Total over its input: an empty copy set yields only `zero_errors`
/// passing, and unrecognised copy or media types fall through without
/// matching any category.
pub fn run_checks(copies: &[BackupCopy], policy: &RulePolicy) -> (RuleChecks, CopyStats) {
    let stats = CopyStats::collect(copies);
    let checks = RuleChecks {
        min_copies: stats.total_copies >= policy.min_copies,
        different_media: stats.media_types.len() >= policy.min_media_types,
        offsite_copy: stats.has_offsite,
        offline_copy: stats.has_offline,
        zero_errors: stats.failed_copies == 0,
    };
    (checks, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bkup_core::JobId;

    fn copy(copy_type: &str, media_type: &str, status: &str) -> BackupCopy {
        BackupCopy::new(JobId(1), copy_type, media_type, status)
    }

    #[test]
    fn empty_copy_set_only_passes_zero_errors() {
        let (checks, stats) = run_checks(&[], &RulePolicy::default());
        assert_eq!(
            checks,
            RuleChecks {
                min_copies: false,
                different_media: false,
                offsite_copy: false,
                offline_copy: false,
                zero_errors: true,
            }
        );
        assert_eq!(stats.total_copies, 0);
        assert!(stats.media_types.is_empty());
        assert!((checks.score() - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn two_disk_copies_fail_four_rules() {
        let copies = [
            copy("primary", "disk", "success"),
            copy("secondary", "disk", "success"),
        ];
        let (checks, stats) = run_checks(&copies, &RulePolicy::default());
        assert!(!checks.min_copies);
        assert!(!checks.different_media);
        assert!(!checks.offsite_copy);
        assert!(!checks.offline_copy);
        assert!(checks.zero_errors);
        assert_eq!(stats.media_types.len(), 1);
    }

    #[test]
    fn full_three_two_one_one_zero_set_passes() {
        let copies = [
            copy("primary", "disk", "success"),
            copy("offsite", "cloud", "success"),
            copy("offline", "tape", "success"),
        ];
        let (checks, _) = run_checks(&copies, &RulePolicy::default());
        assert!(checks.all_pass());
        assert_eq!(checks.score(), 1.0);
        assert_eq!(checks.failing().count(), 0);
    }

    #[test]
    fn failed_copies_still_count_toward_other_rules() {
        let copies = [
            copy("primary", "disk", "success"),
            copy("offsite", "cloud", "failed"),
            copy("offline", "tape", "success"),
        ];
        let (checks, stats) = run_checks(&copies, &RulePolicy::default());
        assert!(checks.min_copies);
        assert!(checks.offsite_copy);
        assert!(!checks.zero_errors);
        assert_eq!(stats.failed_copies, 1);
        assert_eq!(checks.score(), 0.8);
    }

    #[test]
    fn unrecognised_copy_type_matches_nothing() {
        let copies = [
            copy("archive", "optical", "success"),
            copy("Offsite", "cloud", "success"),
            copy("OFFLINE", "tape", "success"),
        ];
        let (checks, stats) = run_checks(&copies, &RulePolicy::default());
        assert!(!checks.offsite_copy);
        assert!(!checks.offline_copy);
        assert!(checks.min_copies);
        assert!(checks.different_media);
        assert_eq!(
            stats.copy_types.iter().cloned().collect::<Vec<_>>(),
            vec!["OFFLINE", "Offsite", "archive"]
        );
    }

    #[test]
    fn pending_status_is_not_an_error() {
        let (checks, _) = run_checks(&[copy("primary", "disk", "pending")], &RulePolicy::default());
        assert!(checks.zero_errors);
    }

    #[test]
    fn failing_iterates_in_rule_order() {
        let checks = RuleChecks {
            min_copies: true,
            different_media: false,
            offsite_copy: true,
            offline_copy: false,
            zero_errors: false,
        };
        assert_eq!(
            checks.failing().collect::<Vec<_>>(),
            vec![Rule::DifferentMedia, Rule::OfflineCopy, Rule::ZeroErrors]
        );
        assert_eq!(checks.passed_count(), 2);
    }

    #[test]
    fn custom_policy_thresholds_apply() {
        let policy = RulePolicy {
            min_copies: 4,
            min_media_types: 3,
            warning_threshold: 3,
        };
        let copies = [
            copy("primary", "disk", "success"),
            copy("offsite", "cloud", "success"),
            copy("offline", "tape", "success"),
        ];
        let (checks, _) = run_checks(&copies, &policy);
        assert!(!checks.min_copies);
        assert!(checks.different_media);
    }

    #[test]
    fn default_policy_is_valid() {
        assert!(RulePolicy::default().validate().is_ok());
    }

    #[test]
    fn policy_rejects_out_of_range_values() {
        let zero_copies = RulePolicy {
            min_copies: 0,
            ..RulePolicy::default()
        };
        assert!(zero_copies.validate().is_err());

        let zero_media = RulePolicy {
            min_media_types: 0,
            ..RulePolicy::default()
        };
        assert!(zero_media.validate().is_err());

        for threshold in [0, 5, 9] {
            let policy = RulePolicy {
                warning_threshold: threshold,
                ..RulePolicy::default()
            };
            assert!(policy.validate().is_err(), "threshold {threshold} accepted");
        }
    }

    #[test]
    fn checks_serialize_with_rule_keys() {
        let checks = RuleChecks {
            min_copies: false,
            different_media: true,
            offsite_copy: true,
            offline_copy: true,
            zero_errors: true,
        };
        let json = serde_json::to_value(checks).unwrap();
        for rule in Rule::ALL {
            assert_eq!(json[rule.as_str()], checks.get(rule), "key {rule}");
        }
    }

    #[test]
    fn policy_deserializes_partial_documents() {
        let policy: RulePolicy = serde_json::from_str(r#"{"min_copies": 5}"#).unwrap();
        assert_eq!(policy.min_copies, 5);
        assert_eq!(policy.min_media_types, 2);
        assert_eq!(policy.warning_threshold, 3);
    }
}

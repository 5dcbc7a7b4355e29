//! # Issue and Recommendation Texts
//!
//! Operator-facing strings for each failing [`Rule`]. Japanese is the
//! default because existing snapshots, alert histories and reports store the
//! Japanese text verbatim; English is available for deployments that never
//! had the legacy data.
//!
//! Texts interpolate the policy thresholds, so the default policy reproduces
//! the stored strings exactly (`最低3コピー未満`, ...).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::rules::{Rule, RulePolicy};

/// Language of issue and recommendation texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    /// Japanese.
    #[default]
    Ja,
    /// English.
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ja" | "ja-jp" | "ja_jp" => Ok(Self::Ja),
            "en" | "en-us" | "en_us" | "en-gb" | "en_gb" => Ok(Self::En),
            other => Err(format!("unsupported locale \"{other}\" (expected ja or en)")),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ja => f.write_str("ja"),
            Self::En => f.write_str("en"),
        }
    }
}

/// Description of a failing rule.
pub fn issue_text(rule: Rule, policy: &RulePolicy, locale: Locale) -> String {
    match (locale, rule) {
        (Locale::Ja, Rule::MinCopies) => format!("最低{}コピー未満", policy.min_copies),
        (Locale::Ja, Rule::DifferentMedia) => {
            format!("{}種類以上の異なるメディア未使用", policy.min_media_types)
        }
        (Locale::Ja, Rule::OffsiteCopy) => "オフサイトコピーなし".into(),
        (Locale::Ja, Rule::OfflineCopy) => "オフラインコピーなし".into(),
        (Locale::Ja, Rule::ZeroErrors) => "検証エラーあり".into(),

        (Locale::En, Rule::MinCopies) => format!("fewer than {} copies", policy.min_copies),
        (Locale::En, Rule::DifferentMedia) => {
            format!("fewer than {} distinct media types", policy.min_media_types)
        }
        (Locale::En, Rule::OffsiteCopy) => "no offsite copy".into(),
        (Locale::En, Rule::OfflineCopy) => "no offline copy".into(),
        (Locale::En, Rule::ZeroErrors) => "verification errors present".into(),
    }
}

/// Remediation advice for a failing rule.
pub fn recommendation_text(rule: Rule, policy: &RulePolicy, locale: Locale) -> String {
    match (locale, rule) {
        (Locale::Ja, Rule::MinCopies) => format!(
            "バックアップコピーを追加し、合計{}つ以上のコピーを保持してください",
            policy.min_copies
        ),
        (Locale::Ja, Rule::DifferentMedia) => format!(
            "ディスク・テープ・クラウドなど{}種類以上の異なるメディアにコピーを分散してください",
            policy.min_media_types
        ),
        (Locale::Ja, Rule::OffsiteCopy) => {
            "クラウドストレージへのオフサイトコピーを追加してください".into()
        }
        (Locale::Ja, Rule::OfflineCopy) => {
            "テープなどのオフラインメディア（エアギャップ）へのコピーを追加してください".into()
        }
        (Locale::Ja, Rule::ZeroErrors) => {
            "失敗したバックアップコピーを確認し、検証エラーを解消してください".into()
        }

        (Locale::En, Rule::MinCopies) => format!(
            "Add backup copies so that at least {} copies are kept",
            policy.min_copies
        ),
        (Locale::En, Rule::DifferentMedia) => format!(
            "Spread copies across at least {} different media types (disk, tape, cloud)",
            policy.min_media_types
        ),
        (Locale::En, Rule::OffsiteCopy) => "Add an offsite copy to cloud storage".into(),
        (Locale::En, Rule::OfflineCopy) => {
            "Add a copy on offline (air-gapped) media such as tape".into()
        }
        (Locale::En, Rule::ZeroErrors) => {
            "Investigate the failed backup copies and resolve the verification errors".into()
        }
    }
}

/// Guidance returned for a job id that does not resolve to a job.
pub fn generic_guidance(locale: Locale) -> Vec<String> {
    match locale {
        Locale::Ja => vec!["少なくとも1つのバックアップコピーを作成してください".into()],
        Locale::En => vec!["Create at least one backup copy".into()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_reproduces_stored_japanese_issues() {
        let policy = RulePolicy::default();
        let issues: Vec<String> = Rule::ALL
            .iter()
            .map(|&rule| issue_text(rule, &policy, Locale::Ja))
            .collect();
        assert_eq!(
            issues,
            vec![
                "最低3コピー未満",
                "2種類以上の異なるメディア未使用",
                "オフサイトコピーなし",
                "オフラインコピーなし",
                "検証エラーあり",
            ]
        );
    }

    #[test]
    fn issue_text_follows_policy_thresholds() {
        let policy = RulePolicy {
            min_copies: 4,
            min_media_types: 3,
            warning_threshold: 3,
        };
        assert_eq!(issue_text(Rule::MinCopies, &policy, Locale::Ja), "最低4コピー未満");
        assert_eq!(
            issue_text(Rule::DifferentMedia, &policy, Locale::En),
            "fewer than 3 distinct media types"
        );
    }

    #[test]
    fn offsite_recommendation_mentions_cloud_storage() {
        let text = recommendation_text(Rule::OffsiteCopy, &RulePolicy::default(), Locale::Ja);
        assert_eq!(text, "クラウドストレージへのオフサイトコピーを追加してください");
    }

    #[test]
    fn japanese_recommendations_name_their_subject() {
        let policy = RulePolicy::default();
        assert!(recommendation_text(Rule::MinCopies, &policy, Locale::Ja).contains("コピー"));
        assert!(recommendation_text(Rule::OfflineCopy, &policy, Locale::Ja).contains("オフライン"));
        assert!(recommendation_text(Rule::ZeroErrors, &policy, Locale::Ja).contains("検証エラー"));
    }

    #[test]
    fn every_rule_has_distinct_texts_per_locale() {
        let policy = RulePolicy::default();
        for locale in [Locale::Ja, Locale::En] {
            let mut seen = std::collections::HashSet::new();
            for rule in Rule::ALL {
                assert!(seen.insert(issue_text(rule, &policy, locale)));
                assert!(seen.insert(recommendation_text(rule, &policy, locale)));
            }
        }
    }

    #[test]
    fn generic_guidance_is_never_empty() {
        assert_eq!(
            generic_guidance(Locale::Ja),
            vec!["少なくとも1つのバックアップコピーを作成してください"]
        );
        assert!(!generic_guidance(Locale::En).is_empty());
    }

    #[test]
    fn locale_parses_common_spellings() {
        assert_eq!("ja".parse::<Locale>().unwrap(), Locale::Ja);
        assert_eq!("EN-us".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
        assert_eq!(Locale::default(), Locale::Ja);
    }
}

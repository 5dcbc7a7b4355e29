//! # Identifier Newtypes
//!
//! Backup jobs are keyed by the integer primary key of the job table. The
//! [`JobId`] newtype keeps that key distinct from the other integers that
//! travel alongside it (owner ids, byte counts, retention days).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Identifier of a backup job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub i64);

impl JobId {
    /// Wrap a raw job key.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Access the raw integer key.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for JobId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl FromStr for JobId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| ValidationError::InvalidJobId(s.to_string()))
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_integers_with_whitespace() {
        assert_eq!(" 42 ".parse::<JobId>().unwrap(), JobId(42));
        assert_eq!("-1".parse::<JobId>().unwrap(), JobId(-1));
    }

    #[test]
    fn parse_rejects_non_numeric() {
        let err = "job-7".parse::<JobId>().unwrap_err();
        assert!(format!("{err}").contains("job-7"));
    }

    #[test]
    fn serializes_as_bare_integer() {
        assert_eq!(serde_json::to_string(&JobId(999_999)).unwrap(), "999999");
        let id: JobId = serde_json::from_str("17").unwrap();
        assert_eq!(id.get(), 17);
    }

    #[test]
    fn display_is_the_raw_key() {
        assert_eq!(JobId::new(5).to_string(), "5");
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn display_parses_back(raw in any::<i64>()) {
            let id = JobId(raw);
            prop_assert_eq!(id.to_string().parse::<JobId>().unwrap(), id);
        }

        #[test]
        fn non_numeric_text_is_rejected(text in "[a-z][a-z0-9-]{0,12}") {
            prop_assert!(text.parse::<JobId>().is_err());
        }
    }
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::record::ActionRecord;

/// Feed generation stamps are `YYYYMMDD_HHmm` with one-based months; `%m`
/// consumes them as-is, no index shifting.
const STAMP_FORMAT: &str = "%Y%m%d_%H%M";

/// One fetched catalog payload. Loaded once per session and immutable
/// afterwards; record order is the feed's order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub actions: Vec<ActionRecord>,
    /// Generation stamp, `YYYYMMDD_HHmm`.
    pub last_updated: String,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
}

#[derive(Debug, Error)]
#[error("malformed lastUpdated stamp: {stamp:?}")]
pub struct TimestampError {
    pub stamp: String,
}

impl CatalogSnapshot {
    /// Display label for the feed owner: the organization when present,
    /// otherwise the user account.
    pub fn owner_label(&self) -> Option<&str> {
        self.organization.as_deref().or(self.user.as_deref())
    }

    /// Parse `lastUpdated` into a calendar timestamp.
    pub fn parsed_last_updated(&self) -> Result<NaiveDateTime, TimestampError> {
        parse_last_updated(&self.last_updated)
    }

    /// First record whose `repo` matches exactly (case-sensitive).
    pub fn find_by_repo(&self, repo: &str) -> Option<&ActionRecord> {
        self.actions.iter().find(|a| a.repo == repo)
    }
}

/// Parse a `YYYYMMDD_HHmm` feed stamp.
pub fn parse_last_updated(stamp: &str) -> Result<NaiveDateTime, TimestampError> {
    NaiveDateTime::parse_from_str(stamp.trim(), STAMP_FORMAT).map_err(|_| TimestampError {
        stamp: stamp.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamp_parses_with_one_based_month() {
        let ts = parse_last_updated("20240315_0930").expect("parses");
        assert_eq!(ts.format("%Y-%m-%d %H:%M").to_string(), "2024-03-15 09:30");
    }

    #[test]
    fn december_stays_december() {
        let ts = parse_last_updated("20231201_0000").expect("parses");
        assert_eq!(ts.format("%Y-%m").to_string(), "2023-12");
    }

    #[test]
    fn malformed_stamps_are_errors() {
        for bad in ["2024-03-15", "20241315_0930", "20240315", "", "yesterday"] {
            assert!(parse_last_updated(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn organization_takes_precedence_over_user() {
        let snapshot: CatalogSnapshot = serde_json::from_str(
            r#"{"actions": [], "lastUpdated": "20240101_0000",
                "organization": "acme", "user": "alice"}"#,
        )
        .expect("parses");
        assert_eq!(snapshot.owner_label(), Some("acme"));
    }

    #[test]
    fn user_is_the_fallback_owner() {
        let snapshot: CatalogSnapshot = serde_json::from_str(
            r#"{"actions": [], "lastUpdated": "20240101_0000", "user": "alice"}"#,
        )
        .expect("parses");
        assert_eq!(snapshot.owner_label(), Some("alice"));
    }

    #[test]
    fn lookup_is_exact_and_first_match() {
        let snapshot: CatalogSnapshot = serde_json::from_str(
            r#"{"actions": [
                  {"name": "A", "repo": "act", "owner": "o", "description": "d"},
                  {"name": "B", "repo": "act", "owner": "o", "description": "d"}
                ],
                "lastUpdated": "20240101_0000"}"#,
        )
        .expect("parses");
        assert_eq!(snapshot.find_by_repo("act").map(|a| a.name.as_str()), Some("A"));
        assert!(snapshot.find_by_repo("ACT").is_none());
        assert!(snapshot.find_by_repo("other").is_none());
    }
}

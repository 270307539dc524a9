use indexmap::IndexMap;

use crate::catalog::{ActionRecord, Visibility};

/// Sentinel runtime kind for records without a usable `using` value.
pub const UNKNOWN_RUNTIME: &str = "unknown";

/// Normalized per-record attributes backing search and facet filtering.
///
/// Text fields are lower-cased once at index time; matching never touches
/// the raw record again. Entries sit in the same order as the records they
/// were derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetIndex {
    pub name: String,
    pub repo: String,
    pub author: String,
    pub description: String,
    pub is_fork: bool,
    pub is_archived: bool,
    pub visibility: Visibility,
    pub runtime: String,
}

impl FacetIndex {
    /// Derive the index entry for one record. An absent author indexes as
    /// the empty string (it can never match a non-empty search term); an
    /// absent or blank runtime indexes as [`UNKNOWN_RUNTIME`].
    pub fn from_record(record: &ActionRecord) -> Self {
        Self {
            name: record.name.to_lowercase(),
            repo: record.repo.to_lowercase(),
            author: record.author.as_deref().unwrap_or_default().to_lowercase(),
            description: record.description.to_lowercase(),
            is_fork: record.is_fork,
            is_archived: record.is_archived,
            visibility: record.effective_visibility(),
            runtime: match record.using.as_deref().map(str::trim) {
                Some(using) if !using.is_empty() => using.to_lowercase(),
                _ => UNKNOWN_RUNTIME.to_owned(),
            },
        }
    }
}

/// Index a collection, one entry per record, in input order.
pub fn index_records(records: &[ActionRecord]) -> Vec<FacetIndex> {
    records.iter().map(FacetIndex::from_record).collect()
}

/// Leading alphabetic prefix of a normalized runtime kind, the granularity
/// facet buttons and tallies group at: `node20` and `node16` both fall under
/// `node`. A runtime with no alphabetic prefix is its own family.
pub fn runtime_family(runtime: &str) -> &str {
    let end = runtime
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(runtime.len());
    if end == 0 { runtime } else { &runtime[..end] }
}

// ---------------------------------------------------------------------------
// Aggregate tallies
// ---------------------------------------------------------------------------

/// Per-facet-value counts over the whole collection.
///
/// Computed once when a snapshot is loaded. Filter changes never touch it:
/// the numbers describe catalog composition, not the currently visible
/// subset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetTally {
    pub total: usize,
    pub forks: usize,
    pub archived: usize,
    /// Count per visibility, ordered by first appearance in the feed.
    pub visibility: IndexMap<Visibility, usize>,
    /// Count per runtime family, ordered by first appearance in the feed.
    pub runtimes: IndexMap<String, usize>,
}

impl FacetTally {
    pub fn tally(indexes: &[FacetIndex]) -> Self {
        let mut out = Self {
            total: indexes.len(),
            ..Self::default()
        };
        for entry in indexes {
            if entry.is_fork {
                out.forks += 1;
            }
            if entry.is_archived {
                out.archived += 1;
            }
            *out.visibility.entry(entry.visibility).or_insert(0) += 1;
            *out
                .runtimes
                .entry(runtime_family(&entry.runtime).to_owned())
                .or_insert(0) += 1;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: serde_json::Value) -> ActionRecord {
        serde_json::from_value(json).expect("valid record")
    }

    fn sample() -> Vec<ActionRecord> {
        vec![
            record(serde_json::json!({
                "name": "Deploy Helper", "repo": "Deploy-Helper", "owner": "acme",
                "author": "Platform-Team", "description": "Ships Things",
                "using": "node20", "visibility": "private",
            })),
            record(serde_json::json!({
                "name": "Lint", "repo": "lint", "owner": "acme",
                "description": "Lints", "using": "docker",
                "isFork": true, "isArchived": true,
            })),
            record(serde_json::json!({
                "name": "Notes", "repo": "notes", "owner": "acme",
                "description": "Writes notes",
            })),
        ]
    }

    #[test]
    fn text_fields_are_lowercased_at_index_time() {
        let idx = index_records(&sample());
        assert_eq!(idx[0].name, "deploy helper");
        assert_eq!(idx[0].repo, "deploy-helper");
        assert_eq!(idx[0].author, "platform-team");
        assert_eq!(idx[0].description, "ships things");
    }

    #[test]
    fn absent_author_indexes_as_empty() {
        let idx = index_records(&sample());
        assert_eq!(idx[1].author, "");
    }

    #[test]
    fn absent_runtime_gets_the_unknown_sentinel() {
        let idx = index_records(&sample());
        assert_eq!(idx[2].runtime, UNKNOWN_RUNTIME);
    }

    #[test]
    fn blank_runtime_gets_the_unknown_sentinel() {
        let mut json = serde_json::json!({
            "name": "X", "repo": "x", "owner": "o", "description": "d",
        });
        json["using"] = "   ".into();
        assert_eq!(FacetIndex::from_record(&record(json)).runtime, UNKNOWN_RUNTIME);
    }

    #[test]
    fn runtime_families() {
        assert_eq!(runtime_family("node20"), "node");
        assert_eq!(runtime_family("node16"), "node");
        assert_eq!(runtime_family("docker"), "docker");
        assert_eq!(runtime_family("composite"), "composite");
        assert_eq!(runtime_family("unknown"), "unknown");
        assert_eq!(runtime_family("20weird"), "20weird");
    }

    #[test]
    fn tally_counts_every_facet() {
        let idx = index_records(&sample());
        let tally = FacetTally::tally(&idx);
        assert_eq!(tally.total, 3);
        assert_eq!(tally.forks, 1);
        assert_eq!(tally.archived, 1);
        assert_eq!(tally.visibility.get(&Visibility::Private), Some(&1));
        assert_eq!(tally.visibility.get(&Visibility::Public), Some(&2));
        assert_eq!(tally.runtimes.get("node"), Some(&1));
        assert_eq!(tally.runtimes.get("docker"), Some(&1));
        assert_eq!(tally.runtimes.get(UNKNOWN_RUNTIME), Some(&1));
    }

    #[test]
    fn tally_preserves_first_appearance_order() {
        let idx = index_records(&sample());
        let tally = FacetTally::tally(&idx);
        let runtimes: Vec<&str> = tally.runtimes.keys().map(String::as_str).collect();
        assert_eq!(runtimes, ["node", "docker", "unknown"]);
    }

    #[test]
    fn indexing_preserves_record_order() {
        let idx = index_records(&sample());
        let repos: Vec<&str> = idx.iter().map(|e| e.repo.as_str()).collect();
        assert_eq!(repos, ["deploy-helper", "lint", "notes"]);
    }
}

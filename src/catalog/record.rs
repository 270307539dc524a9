use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Repository visibility of a published action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    Internal,
}

impl Visibility {
    /// Wire / facet identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Internal => "internal",
        }
    }

    /// Human-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Public => "Public",
            Self::Private => "Private",
            Self::Internal => "Internal",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "public" => Some(Self::Public),
            "private" => Some(Self::Private),
            "internal" => Some(Self::Internal),
            _ => None,
        }
    }
}

/// One published action, as carried by the catalog feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    /// Display name from the action manifest.
    pub name: String,
    /// Repository name; the stable identity for detail lookups.
    pub repo: String,
    pub owner: String,
    #[serde(default)]
    pub author: Option<String>,
    pub description: String,
    /// Manifest path within the repository, when not at the root.
    #[serde(default)]
    pub path: Option<String>,
    /// Runtime kind from the manifest, e.g. `node20`, `docker`, `composite`.
    #[serde(default)]
    pub using: Option<String>,
    /// Explicit visibility; older feeds carry only the `private` flag.
    #[serde(default)]
    pub visibility: Option<Visibility>,
    /// Legacy visibility flag, superseded by `visibility`.
    #[serde(default)]
    pub private: Option<bool>,
    #[serde(default)]
    pub is_fork: bool,
    #[serde(default)]
    pub is_archived: bool,
    /// `owner/repo` this repository was forked from.
    #[serde(default)]
    pub forked_from: Option<String>,
    /// Base64-encoded UTF-8 Markdown; absent when the feed did not carry it.
    #[serde(default)]
    pub readme: Option<String>,
    /// Raw URL of the action manifest file.
    #[serde(default)]
    pub download_url: Option<String>,
}

impl ActionRecord {
    /// Effective visibility, reconciling the legacy `private` flag: an
    /// explicit `visibility` wins, otherwise `private: true` maps to
    /// [`Visibility::Private`] and everything else to public.
    pub fn effective_visibility(&self) -> Visibility {
        if let Some(v) = self.visibility {
            return v;
        }
        if self.private == Some(true) {
            Visibility::Private
        } else {
            Visibility::Public
        }
    }

    /// The `(owner, repo)` halves of `forkedFrom`, or `None` when the field
    /// is absent or not exactly `owner/repo`.
    pub fn forked_from_parts(&self) -> Option<(&str, &str)> {
        let raw = self.forked_from.as_deref()?;
        let (owner, repo) = raw.split_once('/')?;
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return None;
        }
        Some((owner, repo))
    }

    /// Canonical `https://github.com/{owner}/{repo}` location.
    pub fn repo_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repo)
    }
}

// ---------------------------------------------------------------------------
// README payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ReadmeError {
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("decoded payload is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Decode a base64 README payload into Markdown source.
///
/// Feeds that lift the payload straight from the GitHub contents API wrap
/// it across lines, so whitespace is stripped before decoding.
pub fn decode_readme(payload: &str) -> Result<String, ReadmeError> {
    let compact: String = payload.split_whitespace().collect();
    let bytes = STANDARD.decode(compact)?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: serde_json::Value) -> ActionRecord {
        serde_json::from_value(json).expect("valid record")
    }

    fn minimal() -> serde_json::Value {
        serde_json::json!({
            "name": "Checkout",
            "repo": "checkout",
            "owner": "acme",
            "description": "Checks out the repository",
        })
    }

    #[test]
    fn minimal_record_parses_with_defaults() {
        let r = record(minimal());
        assert_eq!(r.name, "Checkout");
        assert!(!r.is_fork);
        assert!(!r.is_archived);
        assert!(r.author.is_none());
        assert!(r.readme.is_none());
    }

    #[test]
    fn explicit_visibility_wins_over_legacy_flag() {
        let mut json = minimal();
        json["visibility"] = "internal".into();
        json["private"] = true.into();
        assert_eq!(record(json).effective_visibility(), Visibility::Internal);
    }

    #[test]
    fn legacy_private_flag_maps_to_private() {
        let mut json = minimal();
        json["private"] = true.into();
        assert_eq!(record(json).effective_visibility(), Visibility::Private);
    }

    #[test]
    fn absent_visibility_defaults_to_public() {
        assert_eq!(record(minimal()).effective_visibility(), Visibility::Public);
        let mut json = minimal();
        json["private"] = false.into();
        assert_eq!(record(json).effective_visibility(), Visibility::Public);
    }

    #[test]
    fn forked_from_splits_owner_and_repo() {
        let mut json = minimal();
        json["forkedFrom"] = "upstream/checkout".into();
        assert_eq!(
            record(json).forked_from_parts(),
            Some(("upstream", "checkout"))
        );
    }

    #[test]
    fn malformed_forked_from_is_rejected() {
        for bad in ["checkout", "/checkout", "upstream/", "a/b/c", ""] {
            let mut json = minimal();
            json["forkedFrom"] = bad.into();
            assert_eq!(record(json).forked_from_parts(), None, "accepted {bad:?}");
        }
    }

    #[test]
    fn camel_case_field_names_round_trip() {
        let mut json = minimal();
        json["isFork"] = true.into();
        json["isArchived"] = true.into();
        json["downloadUrl"] = "https://raw.example.com/action.yml".into();
        let r = record(json);
        assert!(r.is_fork);
        assert!(r.is_archived);
        let back = serde_json::to_value(&r).expect("serializes");
        assert_eq!(back["isFork"], serde_json::json!(true));
        assert!(back.get("is_fork").is_none());
    }

    #[test]
    fn readme_payload_decodes() {
        // "# Hi\n"
        assert_eq!(decode_readme("IyBIaQo=").expect("decodes"), "# Hi\n");
    }

    #[test]
    fn readme_payload_with_line_wrapping_decodes() {
        assert_eq!(decode_readme("IyBI\naQo=\n").expect("decodes"), "# Hi\n");
    }

    #[test]
    fn invalid_base64_is_an_error() {
        assert!(matches!(
            decode_readme("not-base64!!!"),
            Err(ReadmeError::Base64(_))
        ));
    }

    #[test]
    fn non_utf8_payload_is_an_error() {
        // 0xFF 0xFE is not valid UTF-8.
        assert!(matches!(decode_readme("//4="), Err(ReadmeError::Utf8(_))));
    }
}

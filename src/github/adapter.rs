//! One adapter per external API version. Both produce the same normalized
//! [`TagRef`] / [`CommitSummary`] values so the renderers never see raw JSON.

use super::types::{CommitAuthor, CommitSummary, TagRef};
use crate::error::{ChromeError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiFlavor {
    /// REST v3 (`api.github.com/repos/...`).
    V3,
    /// The retired v2 JSON API (`github.com/api/v2/json/...`).
    Legacy,
}

impl std::str::FromStr for ApiFlavor {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "v3" | "rest" => Ok(ApiFlavor::V3),
            "legacy" | "v2" => Ok(ApiFlavor::Legacy),
            _ => Err(format!("Unknown API flavor: {}", s)),
        }
    }
}

impl ApiFlavor {
    pub fn default_base_uri(self) -> &'static str {
        match self {
            ApiFlavor::V3 => "https://api.github.com",
            ApiFlavor::Legacy => "https://github.com",
        }
    }

    pub fn tags_route(self, repo: &str) -> String {
        match self {
            ApiFlavor::V3 => format!("/repos/{}/tags", repo),
            ApiFlavor::Legacy => format!("/api/v2/json/repos/show/{}/tags", repo),
        }
    }

    pub fn commits_route(self, repo: &str, branch: &str) -> String {
        match self {
            ApiFlavor::V3 => format!("/repos/{}/commits", repo),
            ApiFlavor::Legacy => format!("/api/v2/json/commits/list/{}/{}", repo, branch),
        }
    }

    /// Whether the commits route understands `sha`/`per_page` query parameters.
    pub fn supports_paging(self) -> bool {
        matches!(self, ApiFlavor::V3)
    }

    pub fn parse_tags(self, route: &str, body: &Value) -> Result<Vec<TagRef>> {
        match self {
            ApiFlavor::V3 => {
                let entries = list_or_envelope(body, "data").ok_or_else(|| shape(route, "expected a tag array"))?;
                Ok(normalize_each(route, entries, |tag: V3Tag| {
                    Some(TagRef {
                        name: tag.name,
                        sha: tag.commit.map(|c| c.sha),
                    })
                }))
            }
            ApiFlavor::Legacy => {
                let tags = body
                    .get("tags")
                    .and_then(Value::as_object)
                    .ok_or_else(|| shape(route, "expected a `tags` object"))?;
                Ok(tags
                    .iter()
                    .map(|(name, sha)| TagRef {
                        name: name.clone(),
                        sha: sha.as_str().map(str::to_string),
                    })
                    .collect())
            }
        }
    }

    pub fn parse_commits(self, route: &str, body: &Value) -> Result<Vec<CommitSummary>> {
        match self {
            ApiFlavor::V3 => {
                let entries =
                    list_or_envelope(body, "data").ok_or_else(|| shape(route, "expected a commit array"))?;
                Ok(normalize_each(route, entries, V3Commit::normalize))
            }
            ApiFlavor::Legacy => {
                let entries = body
                    .get("commits")
                    .and_then(Value::as_array)
                    .ok_or_else(|| shape(route, "expected a `commits` array"))?;
                Ok(normalize_each(route, entries, LegacyCommit::normalize))
            }
        }
    }
}

fn shape(route: &str, reason: &str) -> ChromeError {
    ChromeError::Shape {
        route: route.to_string(),
        reason: reason.to_string(),
    }
}

/// A bare array, or an object wrapping the array under `key`.
fn list_or_envelope<'a>(body: &'a Value, key: &str) -> Option<&'a [Value]> {
    match body {
        Value::Array(items) => Some(items.as_slice()),
        Value::Object(map) => map.get(key).and_then(Value::as_array).map(Vec::as_slice),
        _ => None,
    }
}

/// Deserializes each entry independently; entries that do not match are
/// logged and dropped.
fn normalize_each<T, U>(route: &str, entries: &[Value], normalize: impl Fn(T) -> Option<U>) -> Vec<U>
where
    T: DeserializeOwned,
{
    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match T::deserialize(entry) {
            Ok(raw) => {
                let normalized = normalize(raw);
                if normalized.is_none() {
                    warn!(route, index, "skipping incomplete entry");
                }
                normalized
            }
            Err(e) => {
                warn!(route, index, error = %e, "skipping malformed entry");
                None
            }
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct V3Tag {
    #[serde(alias = "tag_name")]
    name: String,
    #[serde(default)]
    commit: Option<V3TagCommit>,
}

#[derive(Debug, Deserialize)]
struct V3TagCommit {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct V3Commit {
    #[serde(default)]
    html_url: Option<String>,
    #[serde(default)]
    author: Option<V3User>,
    commit: V3CommitDetail,
}

#[derive(Debug, Deserialize)]
struct V3User {
    login: String,
}

#[derive(Debug, Deserialize)]
struct V3CommitDetail {
    #[serde(default)]
    url: Option<String>,
    message: String,
    author: V3GitAuthor,
}

#[derive(Debug, Deserialize)]
struct V3GitAuthor {
    name: String,
    #[serde(default)]
    login: Option<String>,
    date: String,
}

impl V3Commit {
    fn normalize(self) -> Option<CommitSummary> {
        let url = self.html_url.or(self.commit.url)?;
        Some(CommitSummary {
            url,
            message: self.commit.message,
            author: CommitAuthor {
                login: self.author.map(|u| u.login).or(self.commit.author.login),
                name: self.commit.author.name,
            },
            date: self.commit.author.date,
        })
    }
}

#[derive(Debug, Deserialize)]
struct LegacyCommit {
    url: String,
    message: String,
    author: LegacyAuthor,
    authored_date: String,
}

#[derive(Debug, Deserialize)]
struct LegacyAuthor {
    #[serde(default)]
    login: Option<String>,
    name: String,
}

impl LegacyCommit {
    fn normalize(self) -> Option<CommitSummary> {
        Some(CommitSummary {
            url: self.url,
            message: self.message,
            author: CommitAuthor {
                login: self.author.login.filter(|l| !l.is_empty()),
                name: self.author.name,
            },
            date: self.authored_date,
        })
    }
}

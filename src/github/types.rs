use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tag as reported by either API flavor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRef {
    pub name: String,
    pub sha: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitAuthor {
    pub login: Option<String>,
    pub name: String,
}

/// Normalized commit, independent of the API version it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
    pub url: String,
    pub message: String,
    pub author: CommitAuthor,
    /// Timestamp exactly as the API sent it.
    pub date: String,
}

impl CommitSummary {
    pub fn authored_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.date)
            .ok()
            .map(|d| d.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_offset_timestamps() {
        let commit = CommitSummary {
            url: String::new(),
            message: String::new(),
            author: CommitAuthor {
                login: None,
                name: "Tim".to_string(),
            },
            date: "2010-03-05T12:00:00-08:00".to_string(),
        };
        let at = commit.authored_at().unwrap();
        assert_eq!(at.to_rfc3339(), "2010-03-05T20:00:00+00:00");
    }

    #[test]
    fn unparseable_timestamp_is_none() {
        let commit = CommitSummary {
            url: String::new(),
            message: String::new(),
            author: CommitAuthor {
                login: None,
                name: "Tim".to_string(),
            },
            date: "yesterday".to_string(),
        };
        assert!(commit.authored_at().is_none());
    }
}

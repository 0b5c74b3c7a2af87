use super::adapter::ApiFlavor;
use super::types::{CommitSummary, TagRef};
use crate::config::GithubConfig;
use crate::error::Result;
use octocrab::Octocrab;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Serialize)]
struct CommitQuery<'a> {
    sha: &'a str,
    per_page: u8,
}

pub struct GitHubClient {
    client: Octocrab,
    flavor: ApiFlavor,
    branch: String,
    commit_limit: u8,
}

impl GitHubClient {
    pub fn new(token: Option<String>, config: &GithubConfig) -> Result<Self> {
        let mut builder = Octocrab::builder().base_uri(config.api_base())?;
        if let Some(token) = token {
            builder = builder.personal_token(token);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            flavor: config.api,
            branch: config.branch.clone(),
            commit_limit: config.commit_limit,
        })
    }

    pub fn flavor(&self) -> ApiFlavor {
        self.flavor
    }

    pub async fn list_tags(&self, repo: &str) -> Result<Vec<TagRef>> {
        let route = self.flavor.tags_route(repo);
        debug!(%route, "fetching tags");

        let body: Value = self.client.get(&route, None::<&()>).await?;
        let tags = self.flavor.parse_tags(&route, &body)?;

        debug!(repo, count = tags.len(), "fetched tags");
        Ok(tags)
    }

    pub async fn list_commits(&self, repo: &str) -> Result<Vec<CommitSummary>> {
        let route = self.flavor.commits_route(repo, &self.branch);
        debug!(%route, "fetching commits");

        let body: Value = if self.flavor.supports_paging() {
            let query = CommitQuery {
                sha: &self.branch,
                per_page: self.commit_limit,
            };
            self.client.get(&route, Some(&query)).await?
        } else {
            self.client.get(&route, None::<&()>).await?
        };

        let mut commits = self.flavor.parse_commits(&route, &body)?;
        commits.truncate(usize::from(self.commit_limit));

        debug!(repo, count = commits.len(), "fetched commits");
        Ok(commits)
    }
}

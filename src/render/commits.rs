use super::templates::{TemplateRegistry, GITCOMMITS};
use super::{RenderOutcome, SkipReason};
use crate::dom::Document;
use crate::error::Result;
use crate::github::{CommitSummary, GitHubClient};
use serde_json::json;
use tracing::{info, warn};

pub const MAX_WORDS: usize = 10;
pub const ELLIPSIS: &str = "...";

/// Collapses whitespace and keeps at most [`MAX_WORDS`] words, marking a cut
/// with [`ELLIPSIS`].
pub fn truncate_message(message: &str) -> String {
    let mut words: Vec<&str> = message.split_whitespace().collect();
    if words.len() > MAX_WORDS {
        words.truncate(MAX_WORDS);
        words.push(ELLIPSIS);
    }
    words.join(" ")
}

pub struct CommitRenderer<'t> {
    templates: &'t TemplateRegistry,
}

impl<'t> CommitRenderer<'t> {
    pub fn new(templates: &'t TemplateRegistry) -> Self {
        Self { templates }
    }

    /// Renders `commits` through the `gitcommits` template into a fresh node
    /// appended to the element with id `container_id`.
    pub fn render(
        &self,
        doc: &mut Document,
        container_id: &str,
        commits: &[CommitSummary],
    ) -> Result<RenderOutcome> {
        let Some(container) = doc.get_by_id(container_id) else {
            return Ok(RenderOutcome::Skipped(SkipReason::MissingTarget(format!(
                "#{}",
                container_id
            ))));
        };

        let commits: Vec<CommitSummary> = commits
            .iter()
            .map(|commit| CommitSummary {
                message: truncate_message(&commit.message),
                ..commit.clone()
            })
            .collect();
        let html = self.templates.render(GITCOMMITS, &json!({ "commits": commits }))?;

        let node = doc.create_element("div");
        doc.add_class(node, GITCOMMITS);
        let markup = doc.create_raw(&html);
        doc.append_child(node, markup)?;
        doc.append_child(container, node)?;

        Ok(RenderOutcome::Rendered {
            node,
            entries: commits.len(),
        })
    }
}

/// Fetches recent commits of `repo` and renders them into `container_id`.
///
/// The fetch is skipped when the page has no such container. A failed fetch
/// is logged and returned; the page is left as it was.
pub async fn show_commits(
    client: &GitHubClient,
    renderer: &CommitRenderer<'_>,
    doc: &mut Document,
    repo: &str,
    container_id: &str,
) -> Result<RenderOutcome> {
    if doc.get_by_id(container_id).is_none() {
        return Ok(RenderOutcome::Skipped(SkipReason::MissingTarget(format!(
            "#{}",
            container_id
        ))));
    }

    let commits = match client.list_commits(repo).await {
        Ok(commits) => commits,
        Err(e) => {
            warn!(repo, error = %e, "could not fetch commits");
            return Err(e);
        }
    };

    let outcome = renderer.render(doc, container_id, &commits)?;
    info!(repo, container = container_id, count = commits.len(), "rendered commits");
    Ok(outcome)
}

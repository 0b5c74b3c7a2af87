use super::{RenderOutcome, SkipReason};
use crate::dom::{Document, NodeId};
use crate::error::Result;
use crate::github::{GitHubClient, TagRef};
use crate::version::sort_tags;
use tracing::{info, warn};

/// Class of the element the download list is inserted after.
pub const DOWNLOADS_MARKER: &str = "downloads-link";
pub const TAG_LIST_CLASS: &str = "download-tag-list";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLinks {
    pub tag: String,
    pub zip: String,
    pub tgz: String,
}

pub fn download_links(download_base: &str, repo: &str, tag: &str) -> DownloadLinks {
    let base = download_base.trim_end_matches('/');
    DownloadLinks {
        tag: tag.to_string(),
        zip: format!("{}/{}/zipball/{}", base, repo, tag),
        tgz: format!("{}/{}/tarball/{}", base, repo, tag),
    }
}

pub struct TagRenderer {
    download_base: String,
}

impl TagRenderer {
    pub fn new(download_base: impl Into<String>) -> Self {
        Self {
            download_base: download_base.into(),
        }
    }

    pub fn marker(doc: &Document) -> Option<NodeId> {
        doc.first_by_class(DOWNLOADS_MARKER)
    }

    /// Tags sorted newest first, each with its archive links.
    pub fn links(&self, repo: &str, tags: &[TagRef]) -> Vec<DownloadLinks> {
        let mut names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        sort_tags(&mut names);
        names
            .into_iter()
            .map(|name| download_links(&self.download_base, repo, name))
            .collect()
    }

    /// Inserts `<ul class="download-tag-list">` right after the first
    /// downloads marker.
    pub fn render(&self, doc: &mut Document, repo: &str, tags: &[TagRef]) -> Result<RenderOutcome> {
        let Some(marker) = Self::marker(doc) else {
            return Ok(missing_marker());
        };

        let list = doc.create_element("ul");
        doc.add_class(list, TAG_LIST_CLASS);

        let links = self.links(repo, tags);
        for link in &links {
            let item = doc.append_element(list, "li", None, &[])?;
            let name = doc.create_text(&format!("{} ", link.tag));
            doc.append_child(item, name)?;
            append_link(doc, item, &link.zip, "zip")?;
            let separator = doc.create_text(" | ");
            doc.append_child(item, separator)?;
            append_link(doc, item, &link.tgz, "tgz")?;
        }

        doc.insert_after(marker, list)?;
        Ok(RenderOutcome::Rendered {
            node: list,
            entries: links.len(),
        })
    }
}

fn append_link(doc: &mut Document, parent: NodeId, href: &str, label: &str) -> Result<()> {
    let anchor = doc.append_element(parent, "a", None, &[])?;
    doc.set_attr(anchor, "href", href);
    let text = doc.create_text(label);
    doc.append_child(anchor, text)?;
    Ok(())
}

fn missing_marker() -> RenderOutcome {
    RenderOutcome::Skipped(SkipReason::MissingTarget(format!(".{}", DOWNLOADS_MARKER)))
}

/// Fetches the tags of `repo` and renders the download list.
///
/// Pages without a downloads marker never trigger a request.
pub async fn show_downloads(
    client: &GitHubClient,
    renderer: &TagRenderer,
    doc: &mut Document,
    repo: &str,
) -> Result<RenderOutcome> {
    if TagRenderer::marker(doc).is_none() {
        return Ok(missing_marker());
    }

    let tags = match client.list_tags(repo).await {
        Ok(tags) => tags,
        Err(e) => {
            warn!(repo, error = %e, "could not fetch tags");
            return Err(e);
        }
    };

    let outcome = renderer.render(doc, repo, &tags)?;
    info!(repo, count = tags.len(), "rendered download list");
    Ok(outcome)
}

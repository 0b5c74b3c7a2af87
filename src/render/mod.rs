pub mod commits;
pub mod tags;
pub mod templates;

use crate::dom::NodeId;

pub use commits::{show_commits, truncate_message, CommitRenderer};
pub use tags::{download_links, show_downloads, DownloadLinks, TagRenderer};
pub use templates::TemplateRegistry;

/// What a widget did to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered { node: NodeId, entries: usize },
    /// The page does not carry this widget; nothing was fetched or changed.
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingTarget(String),
}

//! Skeleton of the project index page: a language chooser, one tab panel per
//! language holding its recent commits, and the downloads marker.

use super::language::LanguageRegistry;
use crate::dom::{Document, NodeId};
use crate::error::Result;

/// Id of the element that receives rendered commits for `language`.
pub fn commits_container_id(language: &str) -> String {
    format!("{}commits", language)
}

pub struct IndexPage {
    pub doc: Document,
    pub downloads_marker: NodeId,
}

pub fn skeleton(title: &str, registry: &LanguageRegistry) -> Result<IndexPage> {
    let mut doc = Document::new();
    let root = doc.root();

    let heading = doc.append_element(root, "h1", None, &[])?;
    let text = doc.create_text(title);
    doc.append_child(heading, text)?;

    let chooser = doc.append_element(root, "div", Some("code-chooser"), &[])?;
    doc.hide(chooser);
    let set = doc.append_element(chooser, "div", None, &["fg-buttonset", "fg-buttonset-single"])?;
    for language in registry.iter() {
        let button = doc.append_element(
            set,
            "button",
            Some(format!("chooser-{}", language.id).as_str()),
            &["fg-button", "ui-state-default"],
        )?;
        let label = doc.create_text(&language.title);
        doc.append_child(button, label)?;
    }

    for language in registry.iter() {
        let class = format!("tab-{}", language.id);
        let panel = doc.append_element(root, "div", None, &[class.as_str()])?;
        let heading = doc.append_element(panel, "h3", None, &[])?;
        let text = doc.create_text("Recent commits");
        doc.append_child(heading, text)?;
        doc.append_element(panel, "div", Some(commits_container_id(&language.id).as_str()), &["commits"])?;
    }

    let downloads_marker = doc.append_element(root, "h2", None, &["downloads-link"])?;
    let text = doc.create_text("Downloads");
    doc.append_child(downloads_marker, text)?;

    Ok(IndexPage {
        doc,
        downloads_marker,
    })
}

//! Per-page language switching: chooser buttons and `.code` / `.refs` blocks.

use super::cookie::LanguageStore;
use super::language::{language_suffix, LanguageRegistry};
use crate::dom::{Document, NodeId};
use tracing::debug;

const BUTTON: &str = "fg-button";
const SINGLE_SET: &str = "fg-buttonset-single";
const MULTI_SET: &str = "fg-buttonset-multi";
const TOGGLEABLE: &str = "fg-button-toggleable";
const DISABLED: &str = "ui-state-disabled";
const HOVER: &str = "ui-state-hover";
const ACTIVE: &str = "ui-state-active";

/// Blocks whose visibility follows the active language.
const LANGUAGE_BLOCKS: [&str; 2] = ["code", "refs"];

#[derive(Debug, Clone, Copy)]
pub struct PageController<'r> {
    registry: &'r LanguageRegistry,
}

impl<'r> PageController<'r> {
    pub fn new(registry: &'r LanguageRegistry) -> Self {
        Self { registry }
    }

    /// Shows the chooser if the page opts in with `.show-chooser`, then
    /// applies the stored language. Returns the applied language.
    pub fn prepare(&self, doc: &mut Document, store: &mut (impl LanguageStore + ?Sized)) -> String {
        if let Some(chooser) = doc.get_by_id("code-chooser") {
            if doc.first_by_class("show-chooser").is_some() {
                doc.show(chooser);
            } else {
                doc.hide(chooser);
            }
        }
        self.show_code(doc, store, None)
    }

    /// A tab hook that applies the activated tab's language to the page.
    pub fn on_tab_show(&self) -> impl FnMut(&mut Document, &mut dyn LanguageStore, &str) + 'r {
        let page = *self;
        move |doc: &mut Document, store: &mut dyn LanguageStore, language: &str| {
            page.show_code(doc, store, Some(language));
        }
    }

    /// Enabled chooser buttons in document order.
    pub fn buttons(&self, doc: &Document) -> Vec<NodeId> {
        doc.find_by_class(BUTTON)
            .into_iter()
            .filter(|&b| !doc.has_class(b, DISABLED))
            .collect()
    }

    fn is_enabled_button(doc: &Document, node: NodeId) -> bool {
        doc.has_class(node, BUTTON) && !doc.has_class(node, DISABLED)
    }

    pub fn hover_enter(&self, doc: &mut Document, button: NodeId) {
        if Self::is_enabled_button(doc, button) {
            doc.add_class(button, HOVER);
        }
    }

    pub fn hover_leave(&self, doc: &mut Document, button: NodeId) {
        if Self::is_enabled_button(doc, button) {
            doc.remove_class(button, HOVER);
        }
    }

    /// Mouse-down on a button. In a single-select set the previously active
    /// sibling is released. Returns the language applied, if any.
    pub fn press(
        &self,
        doc: &mut Document,
        store: &mut (impl LanguageStore + ?Sized),
        button: NodeId,
    ) -> Option<String> {
        if !Self::is_enabled_button(doc, button) {
            return None;
        }

        if let Some(set) = doc.ancestor_with_class(button, SINGLE_SET) {
            for sibling in doc.find_in(set, BUTTON) {
                doc.remove_class(sibling, ACTIVE);
            }
        }

        let toggles_off = doc.has_class(button, ACTIVE)
            && (doc.has_class(button, TOGGLEABLE) || doc.ancestor_with_class(button, MULTI_SET).is_some());
        if toggles_off {
            doc.remove_class(button, ACTIVE);
            return None;
        }

        doc.add_class(button, ACTIVE);
        let language = doc.id(button).map(|id| language_suffix(id).to_string())?;
        Some(self.show_code(doc, store, Some(&language)))
    }

    /// Mouse-up: plain buttons pop back out; toggles and set members stay.
    pub fn release(&self, doc: &mut Document, button: NodeId) {
        if !Self::is_enabled_button(doc, button) {
            return;
        }
        let sticky = doc.has_class(button, TOGGLEABLE)
            || doc.ancestor_with_class(button, SINGLE_SET).is_some()
            || doc.ancestor_with_class(button, MULTI_SET).is_some();
        if !sticky {
            doc.remove_class(button, ACTIVE);
        }
    }

    /// Reveals the blocks of `language` and hides every other language's.
    /// Unknown or absent languages fall back to the stored one. The applied
    /// language is persisted and returned.
    pub fn show_code(
        &self,
        doc: &mut Document,
        store: &mut (impl LanguageStore + ?Sized),
        language: Option<&str>,
    ) -> String {
        let language = match language.and_then(|id| self.registry.get(id)) {
            Some(known) => known.id.clone(),
            None => store.current(self.registry).id.clone(),
        };
        debug!(%language, "showing code");

        for class in LANGUAGE_BLOCKS {
            for block in doc.find_by_class(class) {
                if doc.has_class(block, &language) {
                    doc.show(block);
                } else {
                    doc.hide(block);
                }
            }
        }

        if let Some(chooser) = doc.get_by_id(&format!("chooser-{}", language)) {
            if let Some(set) = doc.ancestor_with_class(chooser, SINGLE_SET) {
                for sibling in doc.find_in(set, BUTTON) {
                    if sibling != chooser {
                        doc.remove_class(sibling, ACTIVE);
                    }
                }
            }
            doc.add_class(chooser, ACTIVE);
        }

        store.save(&language);
        language
    }
}

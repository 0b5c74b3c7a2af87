//! Language tabs over the `tab-<lang>` panels of a page.

use super::cookie::LanguageStore;
use super::language::{language_suffix, Language, LanguageRegistry};
use crate::dom::{Document, NodeId};
use crate::error::{ChromeError, Result};
use tracing::{debug, info};

/// Called with the page, the store and the language id whenever a tab is
/// activated.
pub type ShowHook<'r> = Box<dyn FnMut(&mut Document, &mut dyn LanguageStore, &str) + 'r>;

#[derive(Debug, Clone)]
pub struct Tab {
    pub language: Language,
    pub panel: NodeId,
    /// The `<li>` of this tab in the navigation list.
    pub item: NodeId,
}

#[derive(Debug, Clone)]
pub struct TabGroup {
    pub container: NodeId,
    pub nav: NodeId,
    pub tabs: Vec<Tab>,
    pub selected: usize,
}

impl TabGroup {
    pub fn selected_tab(&self) -> &Tab {
        &self.tabs[self.selected]
    }
}

#[derive(Debug)]
enum TabState {
    Unbuilt,
    Built(TabGroup),
}

pub struct TabController<'r> {
    registry: &'r LanguageRegistry,
    state: TabState,
    on_show: Option<ShowHook<'r>>,
}

impl<'r> TabController<'r> {
    pub fn new(registry: &'r LanguageRegistry) -> Self {
        Self {
            registry,
            state: TabState::Unbuilt,
            on_show: None,
        }
    }

    pub fn on_show(mut self, hook: impl FnMut(&mut Document, &mut dyn LanguageStore, &str) + 'r) -> Self {
        self.on_show = Some(Box::new(hook));
        self
    }

    pub fn group(&self) -> Option<&TabGroup> {
        match &self.state {
            TabState::Built(group) => Some(group),
            TabState::Unbuilt => None,
        }
    }

    /// Builds the tab group. Returns `None` (and stays unbuilt) when the page
    /// has no `tab-<lang>` panels.
    pub fn build(&mut self, doc: &mut Document, store: &impl LanguageStore) -> Result<Option<&TabGroup>> {
        if matches!(self.state, TabState::Built(_)) {
            return Err(ChromeError::Tab("tab group already built".to_string()));
        }

        let current = store.current(self.registry).id.clone();

        let mut panels = Vec::new();
        for language in self.registry.iter() {
            let id = format!("tab-{}", language.id);
            if let Some(panel) = doc.first_by_class(&id) {
                doc.set_id(panel, &id);
                panels.push((language.clone(), panel));
            }
        }
        if panels.is_empty() {
            debug!("no language panels on page, skipping tabs");
            return Ok(None);
        }

        let selected = panels
            .iter()
            .position(|(language, _)| language.id == current)
            .unwrap_or(0);

        let container = doc.create_element("div");
        doc.set_id(container, "tab-group");
        doc.add_class(container, "ui-tabs");
        let nodes: Vec<NodeId> = panels.iter().map(|(_, panel)| *panel).collect();
        doc.wrap_all(&nodes, container)?;

        let nav = doc.create_element("ul");
        doc.add_class(nav, "ui-tabs-nav");
        let mut tabs = Vec::with_capacity(panels.len());
        for (language, panel) in panels {
            let item = doc.append_element(nav, "li", None, &[])?;
            let link = doc.append_element(item, "a", None, &[])?;
            doc.set_attr(link, "href", &format!("#tab-{}", language.id));
            let title = doc.create_text(&language.title);
            doc.append_child(link, title)?;
            tabs.push(Tab {
                language,
                panel,
                item,
            });
        }
        doc.prepend_child(container, nav)?;

        let group = TabGroup {
            container,
            nav,
            tabs,
            selected,
        };
        apply_selection(doc, &group);
        info!(
            tabs = group.tabs.len(),
            selected = %group.selected_tab().language.id,
            "built language tabs"
        );

        self.state = TabState::Built(group);
        Ok(self.group())
    }

    /// Activates the tab at `index`, persisting its language.
    pub fn activate(
        &mut self,
        doc: &mut Document,
        store: &mut impl LanguageStore,
        index: usize,
    ) -> Result<String> {
        let TabState::Built(group) = &mut self.state else {
            return Err(ChromeError::Tab("tab group has not been built".to_string()));
        };
        let tab = group
            .tabs
            .get(index)
            .ok_or_else(|| ChromeError::Tab(format!("no tab at index {}", index)))?;

        let panel_id = doc
            .id(tab.panel)
            .ok_or_else(|| ChromeError::Tab("tab panel lost its id".to_string()))?;
        let language = language_suffix(panel_id).to_string();

        group.selected = index;
        apply_selection(doc, group);
        store.save(&language);

        if let Some(hook) = self.on_show.as_mut() {
            let store: &mut dyn LanguageStore = store;
            hook(doc, store, &language);
        }
        Ok(language)
    }

    pub fn activate_language(
        &mut self,
        doc: &mut Document,
        store: &mut impl LanguageStore,
        language: &str,
    ) -> Result<String> {
        let index = self
            .group()
            .and_then(|g| g.tabs.iter().position(|t| t.language.id == language))
            .ok_or_else(|| ChromeError::Tab(format!("no tab for language {:?}", language)))?;
        self.activate(doc, store, index)
    }
}

fn apply_selection(doc: &mut Document, group: &TabGroup) {
    for (i, tab) in group.tabs.iter().enumerate() {
        if i == group.selected {
            doc.show(tab.panel);
            doc.add_class(tab.item, "ui-tabs-selected");
        } else {
            doc.hide(tab.panel);
            doc.remove_class(tab.item, "ui-tabs-selected");
        }
    }
}

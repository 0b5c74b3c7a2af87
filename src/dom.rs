//! A small arena-backed element tree standing in for the browser document.
//!
//! Controllers and renderers only need a handful of DOM operations: class and
//! id lookups, visibility, and a few structural edits. Nodes are addressed by
//! [`NodeId`] and never freed; detached nodes simply stop being reachable from
//! the root and are skipped by queries and serialization.

use crate::error::{ChromeError, Result};
use pulldown_cmark::escape::escape_html;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, String)>,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element(Element),
    Text(String),
    /// Pre-rendered markup, inserted verbatim.
    Raw(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let body = Node {
            kind: NodeKind::Element(Element {
                tag: "body".to_string(),
                ..Element::default()
            }),
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![body],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element(Element {
            tag: tag.to_string(),
            ..Element::default()
        }))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    pub fn create_raw(&mut self, html: &str) -> NodeId {
        self.push(NodeKind::Raw(html.to_string()))
    }

    /// Convenience for building trees: creates `<tag id=.. class=..>` and
    /// appends it to `parent`.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        id: Option<&str>,
        classes: &[&str],
    ) -> Result<NodeId> {
        let node = self.create_element(tag);
        if let Some(id) = id {
            self.set_id(node, id);
        }
        for class in classes {
            self.add_class(node, class);
        }
        self.append_child(parent, node)?;
        Ok(node)
    }

    pub fn kind(&self, node: NodeId) -> Option<&NodeKind> {
        self.nodes.get(node.0).map(|n| &n.kind)
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        match self.kind(node)? {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match self.nodes.get_mut(node.0).map(|n| &mut n.kind) {
            Some(NodeKind::Element(el)) => Some(el),
            _ => None,
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    fn check(&self, node: NodeId) -> Result<()> {
        if node.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(ChromeError::Dom(format!("unknown node {}", node.0)))
        }
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check(parent)?;
        self.check(child)?;
        if child == self.root {
            return Err(ChromeError::Dom("cannot move the document root".to_string()));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(ChromeError::Dom(format!(
                "node {} cannot be inserted into its own subtree",
                child.0
            )));
        }
        if self.element(parent).is_none() {
            return Err(ChromeError::Dom(format!("node {} is not an element", parent.0)));
        }
        Ok(())
    }

    /// Removes `node` from its parent, keeping its subtree intact.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.parent(node) {
            self.nodes[parent.0].children.retain(|&c| c != node);
            self.nodes[node.0].parent = None;
        }
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_insert(parent, child)?;
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        Ok(())
    }

    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_insert(parent, child)?;
        self.detach(child);
        self.nodes[parent.0].children.insert(0, child);
        self.nodes[child.0].parent = Some(parent);
        Ok(())
    }

    /// Inserts `node` as the next sibling of `reference`.
    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) -> Result<()> {
        let parent = self
            .parent(reference)
            .ok_or_else(|| ChromeError::Dom(format!("node {} has no parent", reference.0)))?;
        self.check_insert(parent, node)?;
        self.detach(node);
        let pos = self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == reference)
            .map_or(self.nodes[parent.0].children.len(), |p| p + 1);
        self.nodes[parent.0].children.insert(pos, node);
        self.nodes[node.0].parent = Some(parent);
        Ok(())
    }

    /// Moves every node of `nodes` into `wrapper` in document order. The
    /// wrapper takes the place of whichever node comes first in the tree.
    pub fn wrap_all(&mut self, nodes: &[NodeId], wrapper: NodeId) -> Result<()> {
        let nodes = self.in_document_order(nodes);
        let Some(&first) = nodes.first() else {
            return Ok(());
        };
        let parent = self
            .parent(first)
            .ok_or_else(|| ChromeError::Dom(format!("node {} has no parent", first.0)))?;
        self.check_insert(parent, wrapper)?;
        let pos = self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == first)
            .unwrap_or(0);
        self.detach(wrapper);
        self.nodes[parent.0].children.insert(pos, wrapper);
        self.nodes[wrapper.0].parent = Some(parent);
        for node in nodes {
            self.append_child(wrapper, node)?;
        }
        Ok(())
    }

    /// `nodes` sorted by position in the document; detached nodes go last.
    pub fn in_document_order(&self, nodes: &[NodeId]) -> Vec<NodeId> {
        let order = self.descendants(self.root);
        let mut sorted = nodes.to_vec();
        sorted.sort_by_key(|node| order.iter().position(|n| n == node).unwrap_or(usize::MAX));
        sorted
    }

    /// All attached nodes in document order.
    fn descendants(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![from];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev());
        }
        out
    }

    pub fn find_by_class(&self, class: &str) -> Vec<NodeId> {
        self.find_in(self.root, class)
    }

    pub fn find_in(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| self.has_class(n, class))
            .collect()
    }

    pub fn first_by_class(&self, class: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&n| self.has_class(n, class))
    }

    pub fn get_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&n| self.id(n) == Some(id))
    }

    /// Nearest proper ancestor carrying `class`.
    pub fn ancestor_with_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        let mut current = self.parent(node);
        while let Some(n) = current {
            if self.has_class(n, class) {
                return Some(n);
            }
            current = self.parent(n);
        }
        None
    }

    pub fn id(&self, node: NodeId) -> Option<&str> {
        self.element(node).and_then(|el| el.id.as_deref())
    }

    pub fn set_id(&mut self, node: NodeId, id: &str) {
        if let Some(el) = self.element_mut(node) {
            el.id = Some(id.to_string());
        }
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element_mut(node) {
            match el.attrs.iter_mut().find(|(k, _)| k == name) {
                Some((_, v)) => *v = value.to_string(),
                None => el.attrs.push((name.to_string(), value.to_string())),
            }
        }
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?
            .attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_some_and(|el| el.classes.iter().any(|c| c == class))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element_mut(node) {
            if !el.classes.iter().any(|c| c == class) {
                el.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element_mut(node) {
            el.classes.retain(|c| c != class);
        }
    }

    pub fn show(&mut self, node: NodeId) {
        if let Some(el) = self.element_mut(node) {
            el.hidden = false;
        }
    }

    pub fn hide(&mut self, node: NodeId) {
        if let Some(el) = self.element_mut(node) {
            el.hidden = true;
        }
    }

    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|el| el.hidden)
    }

    /// Concatenated text of a subtree, raw markup included as-is.
    pub fn text_content(&self, node: NodeId) -> String {
        self.descendants(node)
            .into_iter()
            .filter_map(|n| match self.kind(n)? {
                NodeKind::Text(t) | NodeKind::Raw(t) => Some(t.as_str()),
                NodeKind::Element(_) => None,
            })
            .collect()
    }

    /// Serializes the children of the root.
    pub fn to_html(&self) -> Result<String> {
        let mut out = String::new();
        for &child in self.children(self.root) {
            self.write_node(&mut out, child)?;
        }
        Ok(out)
    }

    pub fn node_html(&self, node: NodeId) -> Result<String> {
        self.check(node)?;
        let mut out = String::new();
        self.write_node(&mut out, node)?;
        Ok(out)
    }

    fn write_node(&self, out: &mut String, node: NodeId) -> Result<()> {
        match &self.nodes[node.0].kind {
            NodeKind::Text(text) => escape_html(&mut *out, text)?,
            NodeKind::Raw(html) => out.push_str(html),
            NodeKind::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);
                if let Some(id) = &el.id {
                    write_attr(out, "id", id)?;
                }
                if !el.classes.is_empty() {
                    write_attr(out, "class", &el.classes.join(" "))?;
                }
                for (name, value) in &el.attrs {
                    write_attr(out, name, value)?;
                }
                if el.hidden {
                    out.push_str(" style=\"display:none\"");
                }
                out.push('>');
                for &child in &self.nodes[node.0].children {
                    self.write_node(out, child)?;
                }
                out.push_str("</");
                out.push_str(&el.tag);
                out.push('>');
            }
        }
        Ok(())
    }
}

fn write_attr(out: &mut String, name: &str, value: &str) -> Result<()> {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    escape_html(&mut *out, value)?;
    out.push('"');
    Ok(())
}

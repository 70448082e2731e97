//! A small element tree standing in for the browser document.
//!
//! Nodes live in an arena owned by [`Document`] and are never freed, so a
//! [`NodeId`] issued by a document stays valid for that document's lifetime.
//! Removing a node only detaches it from its parent.
//!
//! The arena only grows: replaced text and removed blocks keep their nodes
//! until the document is dropped. Long-running sessions should reload the
//! page into a fresh [`Document`] rather than reuse one indefinitely.

use std::collections::BTreeMap;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
enum Kind {
    Element {
        tag: String,
        attrs: BTreeMap<String, String>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: Kind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    body: NodeId,
}

const VOID_TAGS: &[&str] = &["input", "br", "hr", "img"];

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            body: NodeId(0),
        };
        doc.body = doc.create_element("body");
        doc
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Kind::Element {
            tag: tag.to_string(),
            attrs: BTreeMap::new(),
        })
    }

    /// Element with the given classes, appended to `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag: &str, classes: &[&str]) -> NodeId {
        let node = self.create_element(tag);
        for class in classes {
            self.add_class(node, class);
        }
        self.append_child(parent, node);
        node
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(Kind::Text(text.to_string()))
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let node = self.create_text(text);
        self.append_child(parent, node);
        node
    }

    fn push(&mut self, kind: Kind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.remove(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        self.remove(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.insert(0, child);
    }

    /// Detach `node` from its parent. The subtree stays intact.
    pub fn remove(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != node);
        }
    }

    pub fn clear_children(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn child_count(&self, node: NodeId) -> usize {
        self.nodes[node.0].children.len()
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].kind {
            Kind::Element { tag, .. } => Some(tag),
            Kind::Text(_) => None,
        }
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[node.0].kind {
            Kind::Element { attrs, .. } => attrs.get(name).map(String::as_str),
            Kind::Text(_) => None,
        }
    }

    /// Setting an attribute on a text node is a no-op.
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Kind::Element { attrs, .. } = &mut self.nodes[node.0].kind {
            attrs.insert(name.to_string(), value.to_string());
        }
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Kind::Element { attrs, .. } = &mut self.nodes[node.0].kind {
            attrs.remove(name);
        }
    }

    pub fn classes(&self, node: NodeId) -> Vec<&str> {
        self.attr(node, "class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes(node).contains(&class)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        let mut classes: Vec<String> = self.classes(node).into_iter().map(String::from).collect();
        classes.push(class.to_string());
        self.set_attr(node, "class", &classes.join(" "));
    }

    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.attr(node, "hidden").is_some()
    }

    pub fn set_hidden(&mut self, node: NodeId, hidden: bool) {
        if hidden {
            self.set_attr(node, "hidden", "");
        } else {
            self.remove_attr(node, "hidden");
        }
    }

    /// Replace all children with a single text node, like `innerText = ...`.
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        self.clear_children(node);
        self.append_text(node, text);
    }

    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0].kind {
            Kind::Text(text) => out.push_str(text),
            Kind::Element { .. } => {
                for child in &self.nodes[node.0].children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    /// `node` and everything under it, in document order.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.nodes[current.0].children.iter().rev());
        }
        out
    }

    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        self.contains(self.body, node)
    }

    /// First attached element carrying `id="{id}"`.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.body)
            .into_iter()
            .find(|n| self.attr(*n, "id") == Some(id))
    }

    pub fn find_by_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|n| self.has_class(*n, class))
            .collect()
    }

    pub fn first_by_class(&self, root: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(root)
            .into_iter()
            .find(|n| self.has_class(*n, class))
    }

    pub fn find_by_tag(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|n| self.tag(*n) == Some(tag))
            .collect()
    }

    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, 0, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        match &self.nodes[node.0].kind {
            Kind::Text(text) => {
                let _ = writeln!(out, "{}{}", indent, escape(text));
            }
            Kind::Element { tag, attrs } => {
                let _ = write!(out, "{}<{}", indent, tag);
                for (name, value) in attrs {
                    if value.is_empty() {
                        let _ = write!(out, " {}", name);
                    } else {
                        let _ = write!(out, " {}=\"{}\"", name, escape(value));
                    }
                }
                if VOID_TAGS.contains(&tag.as_str()) {
                    out.push_str(">\n");
                    return;
                }
                out.push_str(">\n");
                for child in &self.nodes[node.0].children {
                    self.write_html(*child, depth + 1, out);
                }
                let _ = writeln!(out, "{}</{}>", indent, tag);
            }
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

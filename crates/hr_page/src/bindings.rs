use std::collections::HashMap;

use crate::dom::{Document, NodeId};

/// What happens when a node receives an event.
///
/// Each binding owns the targets it writes to, captured when it was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    RewriteForm {
        headline_id: String,
        input: NodeId,
        list: NodeId,
    },
    SwitchHeadline,
    DeleteRewrite {
        rewrite_id: String,
        block: NodeId,
    },
    CloseNotification {
        block: NodeId,
    },
}

#[derive(Debug, Default)]
pub struct Bindings {
    handlers: HashMap<NodeId, Binding>,
}

impl Bindings {
    pub fn bind(&mut self, node: NodeId, binding: Binding) {
        self.handlers.insert(node, binding);
    }

    pub fn get(&self, node: NodeId) -> Option<&Binding> {
        self.handlers.get(&node)
    }

    pub fn unbind(&mut self, node: NodeId) -> Option<Binding> {
        self.handlers.remove(&node)
    }

    /// Drop every binding on `root` or below it.
    pub fn unbind_within(&mut self, doc: &Document, root: NodeId) {
        for node in doc.descendants(root) {
            self.handlers.remove(&node);
        }
    }
}

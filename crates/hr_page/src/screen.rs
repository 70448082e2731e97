use std::collections::HashMap;

use hr_core::{Failure, Rewrite};

use crate::bindings::{Binding, Bindings};
use crate::dom::{Document, NodeId};
use crate::views::{self, Notification, RenderedRewrite};

/// The document together with its event bindings and the data behind each
/// rendered rewrite.
#[derive(Debug, Default)]
pub struct Screen {
    pub doc: Document,
    pub bindings: Bindings,
    rendered: HashMap<NodeId, Rewrite>,
}

impl Screen {
    pub fn new(doc: Document) -> Self {
        Self {
            doc,
            bindings: Bindings::default(),
            rendered: HashMap::new(),
        }
    }

    /// Render a rewrite at the head of `list` and bind its delete control.
    pub fn show_rewrite(&mut self, rewrite: &Rewrite, list: NodeId) -> RenderedRewrite {
        let rendered = views::render_rewrite(&mut self.doc, rewrite, list);
        self.track(rewrite, rendered);
        rendered
    }

    fn track(&mut self, rewrite: &Rewrite, rendered: RenderedRewrite) {
        self.bindings.bind(
            rendered.delete_button,
            Binding::DeleteRewrite {
                rewrite_id: rewrite.id.clone(),
                block: rendered.block,
            },
        );
        self.rendered.insert(rendered.block, rewrite.clone());
    }

    pub fn show_rewrites(&mut self, rewrites: &[Rewrite], list: NodeId) -> Vec<RenderedRewrite> {
        let rendered = views::render_rewrite_list(&mut self.doc, rewrites, list);
        for (rewrite, block) in rewrites.iter().zip(&rendered) {
            self.track(rewrite, *block);
        }
        rendered
    }

    /// Take a rewrite block off the page, hiding its list once empty.
    pub fn remove_rewrite(&mut self, block: NodeId) -> Option<Rewrite> {
        self.bindings.unbind_within(&self.doc, block);
        views::delete_rewrite_block(&mut self.doc, block);
        self.rendered.remove(&block)
    }

    /// Empty and hide `list`, forgetting what was rendered in it.
    pub fn clear_list(&mut self, list: NodeId) {
        self.bindings.unbind_within(&self.doc, list);
        for block in self.doc.children(list).to_vec() {
            self.rendered.remove(&block);
        }
        self.doc.clear_children(list);
        self.doc.set_hidden(list, true);
    }

    /// Rewrites currently shown in `list`, top to bottom.
    pub fn rewrites_in(&self, list: NodeId) -> Vec<Rewrite> {
        self.doc
            .children(list)
            .iter()
            .filter_map(|block| self.rendered.get(block).cloned())
            .collect()
    }

    pub fn notify(&mut self, body: NodeId, message: &str) -> Notification {
        let note = views::show_notification(&mut self.doc, body, message);
        self.bind_close(note)
    }

    pub fn notify_failure(&mut self, body: NodeId, failure: &Failure) -> Notification {
        let note = views::show_failure(&mut self.doc, body, failure);
        self.bind_close(note)
    }

    fn bind_close(&mut self, note: Notification) -> Notification {
        self.bindings.bind(
            note.close_button,
            Binding::CloseNotification { block: note.block },
        );
        note
    }
}

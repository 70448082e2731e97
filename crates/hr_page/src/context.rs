use hr_core::{Error, Result};

use crate::dom::{Document, NodeId};
use crate::markup::{ALL_REWRITES, HISTORY_HEADING, HISTORY_PANEL};
use crate::views::headline::hooks;

fn hook(doc: &Document, id: &str) -> Result<NodeId> {
    doc.find_by_id(id)
        .ok_or_else(|| Error::MissingHook(format!("#{}", id)))
}

/// Handles to the compose page's structural hooks, looked up once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageContext {
    pub body: NodeId,
    pub block: NodeId,
    pub link: NodeId,
    pub heading: NodeId,
    pub rewrite_form: NodeId,
    pub rewrite_input: NodeId,
    pub rewrite_list: NodeId,
    pub switch_form: NodeId,
    pub history_panel: NodeId,
    pub history_heading: NodeId,
}

impl PageContext {
    pub fn bind(doc: &Document) -> Result<Self> {
        let heading = hook(doc, hooks::HEADLINE)?;
        // The heading's parent is the anchor that carries the headline URL
        let link = doc
            .parent(heading)
            .filter(|p| doc.tag(*p) == Some("a"))
            .ok_or_else(|| Error::MissingHook(format!("a > #{}", hooks::HEADLINE)))?;

        Ok(Self {
            body: doc.body(),
            block: hook(doc, hooks::BLOCK)?,
            link,
            heading,
            rewrite_form: hook(doc, hooks::REWRITE_FORM)?,
            rewrite_input: hook(doc, hooks::REWRITE_INPUT)?,
            rewrite_list: hook(doc, hooks::REWRITE_LIST)?,
            switch_form: hook(doc, hooks::SWITCH_FORM)?,
            history_panel: hook(doc, HISTORY_PANEL)?,
            history_heading: hook(doc, HISTORY_HEADING)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryContext {
    pub body: NodeId,
    pub container: NodeId,
}

impl HistoryContext {
    pub fn bind(doc: &Document) -> Result<Self> {
        Ok(Self {
            body: doc.body(),
            container: hook(doc, ALL_REWRITES)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::{compose_page, history_page};

    #[test]
    fn test_bind_compose_page() {
        let doc = compose_page();
        let ctx = PageContext::bind(&doc).unwrap();
        assert_eq!(doc.tag(ctx.link), Some("a"));
        assert!(doc.contains(ctx.block, ctx.rewrite_list));
        assert!(doc.contains(ctx.rewrite_form, ctx.rewrite_input));
        assert!(doc.is_hidden(ctx.history_heading));
    }

    #[test]
    fn test_missing_hook() {
        let doc = history_page();
        match PageContext::bind(&doc) {
            Err(Error::MissingHook(hook)) => assert_eq!(hook, "#original-headline"),
            other => panic!("expected a missing hook, got {:?}", other),
        }
        assert!(HistoryContext::bind(&doc).is_ok());
        assert!(HistoryContext::bind(&compose_page()).is_err());
    }
}

use hr_core::Rewrite;

use crate::dom::{Document, NodeId};
use crate::views::graph::{difference_graph, sentiment_graph};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedRewrite {
    pub block: NodeId,
    pub delete_button: NodeId,
}

/// Prepend a rewrite to `list` and make the list visible.
pub fn render_rewrite(doc: &mut Document, rewrite: &Rewrite, list: NodeId) -> RenderedRewrite {
    let block = doc.create_element("li");
    doc.add_class(block, "rewrite");
    doc.set_attr(block, "data-id", &rewrite.id);

    let heading = doc.append_element(block, "h3", &["rewrite-text"]);
    doc.set_text(heading, &rewrite.text);

    let delete_button = doc.append_element(block, "button", &["delete-rewrite"]);
    doc.set_attr(delete_button, "type", "button");
    doc.set_text(delete_button, "Delete");

    let sentiment = sentiment_graph(doc, rewrite.sentiment_score);
    doc.append_child(block, sentiment);
    let difference = difference_graph(doc, rewrite.sentiment_match);
    doc.append_child(block, difference);

    doc.prepend_child(list, block);
    doc.set_hidden(list, false);

    RenderedRewrite {
        block,
        delete_button,
    }
}

/// Render every rewrite through [`render_rewrite`], so the last one ends up on top.
pub fn render_rewrite_list(
    doc: &mut Document,
    rewrites: &[Rewrite],
    list: NodeId,
) -> Vec<RenderedRewrite> {
    rewrites
        .iter()
        .map(|rewrite| render_rewrite(doc, rewrite, list))
        .collect()
}

/// Remove a rewrite block; an emptied list is hidden again.
pub fn delete_rewrite_block(doc: &mut Document, block: NodeId) {
    let list = doc.parent(block);
    doc.remove(block);
    if let Some(list) = list {
        if doc.child_count(list) == 0 {
            doc.set_hidden(list, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(id: &str, text: &str) -> Rewrite {
        Rewrite {
            id: id.to_string(),
            headline_id: "h1".to_string(),
            user_id: "u1".to_string(),
            text: text.to_string(),
            timestamp: String::new(),
            semantic_score: None,
            semantic_match: 1.0,
            sentiment_score: 0.1,
            sentiment_match: -0.3,
        }
    }

    fn hidden_list(doc: &mut Document) -> NodeId {
        let list = doc.append_element(doc.body(), "ul", &["rewrite-list"]);
        doc.set_hidden(list, true);
        list
    }

    #[test]
    fn test_render_rewrite() {
        let mut doc = Document::new();
        let list = hidden_list(&mut doc);

        let rendered = render_rewrite(&mut doc, &rewrite("r1", "Y triumphs"), list);

        assert!(!doc.is_hidden(list));
        assert_eq!(doc.children(list), &[rendered.block]);
        let text = doc.text_content(rendered.block);
        assert!(text.starts_with("Y triumphs"));
        assert!(text.contains("Positive (10% certainty)"));
        assert!(text.contains("Difference: 30"));
        let bar = doc.first_by_class(rendered.block, "difference").unwrap();
        assert_eq!(doc.attr(bar, "style"), Some("width: 15%"));
        assert!(doc.contains(rendered.block, rendered.delete_button));
    }

    #[test]
    fn test_newest_rewrite_first() {
        let mut doc = Document::new();
        let list = hidden_list(&mut doc);
        let rendered = render_rewrite_list(
            &mut doc,
            &[rewrite("r1", "first"), rewrite("r2", "second")],
            list,
        );
        assert_eq!(doc.children(list), &[rendered[1].block, rendered[0].block]);
    }

    #[test]
    fn test_delete_keeps_order_and_visibility() {
        let mut doc = Document::new();
        let list = hidden_list(&mut doc);
        let rendered = render_rewrite_list(
            &mut doc,
            &[rewrite("r1", "a"), rewrite("r2", "b"), rewrite("r3", "c")],
            list,
        );

        delete_rewrite_block(&mut doc, rendered[1].block);
        assert!(!doc.is_hidden(list));
        assert_eq!(doc.children(list), &[rendered[2].block, rendered[0].block]);

        delete_rewrite_block(&mut doc, rendered[2].block);
        delete_rewrite_block(&mut doc, rendered[0].block);
        assert!(doc.is_hidden(list));
    }
}

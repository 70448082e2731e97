use hr_core::Headline;

use crate::dom::{Document, NodeId};
use crate::views::graph::{sentiment_graph, SENTIMENT_GRAPH};

/// Element ids carried by the live block only.
pub mod hooks {
    pub const BLOCK: &str = "main-rewrite-container";
    pub const HEADLINE: &str = "original-headline";
    pub const REWRITE_FORM: &str = "rewrite-form";
    pub const REWRITE_INPUT: &str = "text";
    pub const REWRITE_LIST: &str = "rewrite-list";
    pub const SWITCH_FORM: &str = "switch-headline";
}

/// How a headline block is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockMode {
    /// The primary slot: element ids and a switch control.
    Live,
    /// A block in the history panel: still accepts rewrites, cannot switch.
    Archived,
    /// The full-history page: no forms.
    ReadOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlineBlock {
    pub root: NodeId,
    pub link: NodeId,
    pub heading: NodeId,
    pub form: Option<NodeId>,
    pub input: Option<NodeId>,
    pub list: NodeId,
    pub switch_form: Option<NodeId>,
}

/// Build an empty, detached headline block. The rewrite list starts hidden.
pub fn headline_block(doc: &mut Document, mode: BlockMode) -> HeadlineBlock {
    let root = doc.create_element("div");
    doc.add_class(root, "rewrite-container");

    let link = doc.append_element(root, "a", &["headline-link"]);
    let heading = doc.append_element(link, "h2", &["headline"]);

    let (form, input) = if mode == BlockMode::ReadOnly {
        (None, None)
    } else {
        let form = doc.append_element(root, "form", &["rewrite-form"]);
        let input = doc.append_element(form, "input", &[]);
        doc.set_attr(input, "type", "text");
        doc.set_attr(input, "name", "text");
        doc.set_attr(input, "placeholder", "Rewrite this headline");
        let submit = doc.append_element(form, "button", &[]);
        doc.set_attr(submit, "type", "submit");
        doc.set_text(submit, "Submit");
        (Some(form), Some(input))
    };

    let list = doc.append_element(root, "ul", &["rewrite-list"]);
    doc.set_hidden(list, true);

    let switch_form = if mode == BlockMode::Live {
        let switch = doc.append_element(root, "form", &["switch-headline"]);
        let button = doc.append_element(switch, "button", &[]);
        doc.set_attr(button, "type", "submit");
        doc.set_text(button, "New headline");
        Some(switch)
    } else {
        None
    };

    if mode == BlockMode::Live {
        doc.set_attr(root, "id", hooks::BLOCK);
        doc.set_attr(heading, "id", hooks::HEADLINE);
        doc.set_attr(list, "id", hooks::REWRITE_LIST);
        if let (Some(form), Some(input), Some(switch)) = (form, input, switch_form) {
            doc.set_attr(form, "id", hooks::REWRITE_FORM);
            doc.set_attr(input, "id", hooks::REWRITE_INPUT);
            doc.set_attr(switch, "id", hooks::SWITCH_FORM);
        }
    }

    HeadlineBlock {
        root,
        link,
        heading,
        form,
        input,
        list,
        switch_form,
    }
}

/// Render `headline` into an existing heading and its link.
///
/// Re-rendering replaces the previous text, source label and graph.
pub fn render_headline(doc: &mut Document, heading: NodeId, link: NodeId, headline: &Headline) {
    doc.set_text(heading, &headline.text);
    doc.set_attr(heading, "data-id", &headline.id);
    doc.set_attr(link, "href", &headline.url);

    let source = doc.append_element(heading, "span", &["headline-source"]);
    doc.set_text(source, &format!(" Source: {}", headline.source));

    let stale: Vec<NodeId> = doc
        .children(link)
        .iter()
        .copied()
        .filter(|n| doc.has_class(*n, SENTIMENT_GRAPH))
        .collect();
    for graph in stale {
        doc.remove(graph);
    }

    let graph = sentiment_graph(doc, headline.sentiment_score);
    doc.append_child(link, graph);
}
